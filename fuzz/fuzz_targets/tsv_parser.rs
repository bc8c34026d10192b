#![no_main]

use adsplit::pipeline::classify_text;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Arbitrary text must parse or fail cleanly, never panic
        let _ = classify_text(input, '\t');
    }
});
