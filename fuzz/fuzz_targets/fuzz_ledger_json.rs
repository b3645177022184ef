#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use stevedore::infrastructure::JsonProgressRepository;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz ledger parsing - this should never panic
        let repo = JsonProgressRepository::new();
        if let Ok(ledger) = repo.parse(content, Path::new(".progress.json")) {
            let rendered = repo.render(&ledger).unwrap();
            let reparsed = repo.parse(&rendered, Path::new(".progress.json")).unwrap();
            assert_eq!(reparsed.len(), ledger.len());
        }
    }
});
