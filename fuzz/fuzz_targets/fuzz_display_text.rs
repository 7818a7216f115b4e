//! Fuzz target: `DisplayText` construction
//!
//! Feeds arbitrary UTF-8 into a display row and verifies:
//! - No panics, including on multi-byte characters at the cut point
//! - The row is pure ASCII and at most `LINE_CHARS` characters
//!
//! cargo fuzz run fuzz_display_text

#![no_main]

use libfuzzer_sys::fuzz_target;
use lifeline::fsm::context::{DisplayText, LINE_CHARS};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = core::str::from_utf8(data) else {
        return;
    };
    let row = DisplayText::new(s);
    assert!(row.as_str().is_ascii());
    assert!(row.as_str().len() <= LINE_CHARS);
    assert_eq!(row.as_str().len(), s.chars().count().min(LINE_CHARS));

    let formatted = DisplayText::from_fmt(format_args!("Tempo: {} seg", s));
    assert!(formatted.as_str().len() <= LINE_CHARS);
});
