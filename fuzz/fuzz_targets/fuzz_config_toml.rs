#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use scaffold_sync::config::parse_with_warnings;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok((config, _warnings)) = parse_with_warnings(content, Path::new("scaffold.toml")) {
            let _ = config.locations();
            let _ = config.descriptors(Path::new("/project"));
        }
    }
});
