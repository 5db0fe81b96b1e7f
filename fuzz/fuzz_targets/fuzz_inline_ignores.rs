//! Fuzz target for inline `tfguard:ignore` comment scanning.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_inline_ignores
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = tfguard_parser::fuzz::scan_ignores(text);
    }
});
