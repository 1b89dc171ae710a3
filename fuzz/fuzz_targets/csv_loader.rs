#![no_main]

use libfuzzer_sys::fuzz_target;
use launchdash::dataset::Dataset;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed input must surface as an error, never a panic
        let _ = Dataset::from_csv(input);
    }
});
