#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use scaffold_sync::infrastructure::repositories::{parse_manifest, render_manifest};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let path = Path::new("scaffold-manifest.toml");
        if let Ok(manifest) = parse_manifest(content, path) {
            // Whatever loads must render and load again
            let rendered = render_manifest(&manifest).expect("render loaded manifest");
            let reparsed = parse_manifest(&rendered, path).expect("reparse rendered manifest");
            assert_eq!(reparsed.managed_paths(), manifest.managed_paths());
        }
    }
});
