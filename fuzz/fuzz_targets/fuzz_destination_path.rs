#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use scaffold_sync::DestinationPath;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(path) = DestinationPath::new(raw) {
            let root = Path::new("/project");
            assert!(path.to_path(root).starts_with(root));
            assert!(path.segments().all(|s| s != ".." && !s.is_empty()));
        }
    }
});
