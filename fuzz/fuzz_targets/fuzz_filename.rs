#![no_main]

use libfuzzer_sys::fuzz_target;
use stevedore::domain::services::identity_from_filename;
use stevedore::AssetId;

fuzz_target!(|data: &[u8]| {
    if let Ok(filename) = std::str::from_utf8(data) {
        if let Ok(id) = identity_from_filename(filename) {
            // A derived identity must survive the ledger key round trip
            if !id.name().contains(':') && !id.tag().contains(':') {
                let parsed: Result<AssetId, _> = id.key().parse();
                assert_eq!(parsed.ok(), Some(id));
            }
        }
    }
});
