#![no_main]

use libfuzzer_sys::fuzz_target;
use stevedore::domain::services::parse_manifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Manifest parsing never fails; every asset must carry a usable key
        let manifest = parse_manifest(content);
        for asset in manifest.assets() {
            assert!(!asset.id().name().is_empty());
            assert!(!asset.id().tag().is_empty());
        }
    }
});
