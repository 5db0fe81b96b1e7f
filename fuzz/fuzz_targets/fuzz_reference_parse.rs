//! Fuzz target for reference parsing (`data.aws_kms_key.main.arn`, `var.x`, ...).
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_reference_parse
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tfguard_parser::fuzz::parse_reference(text);
    }
});
