//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use maskfield::{MaskOptions, MaskState, Selection};

/// US phone number mask used across suites
pub const PHONE: &str = "(111) 111-1111";

/// Date mask with two literal separators
pub const DATE: &str = "11/11/1111";

/// Create a mask with default options
pub fn mask(pattern: &str) -> MaskState {
    MaskState::new(MaskOptions::pattern(pattern)).expect("pattern should compile")
}

/// Create a mask seeded with a value
pub fn mask_with_value(pattern: &str, value: &str) -> MaskState {
    let mut options = MaskOptions::pattern(pattern);
    options.value = value.to_string();
    MaskState::new(options).expect("pattern should compile")
}

/// Create a revealing mask
pub fn revealing_mask(pattern: &str) -> MaskState {
    let mut options = MaskOptions::pattern(pattern);
    options.is_revealing = true;
    MaskState::new(options).expect("pattern should compile")
}

/// Create a mask with a custom placeholder ("" omits empty slots)
pub fn mask_with_placeholder(pattern: &str, placeholder: &str) -> MaskState {
    let mut options = MaskOptions::pattern(pattern);
    options.placeholder = placeholder.to_string();
    MaskState::new(options).expect("pattern should compile")
}

/// Type a string one character at a time, asserting each is accepted
pub fn type_str(mask: &mut MaskState, text: &str) {
    for ch in text.chars() {
        assert!(mask.input(ch), "input({:?}) should be accepted", ch);
    }
}

/// Install a range selection
pub fn select(mask: &mut MaskState, start: usize, end: usize) {
    mask.set_selection(Selection::new(start, end));
}
