//! Text editing tests - input, backspace, value formatting

mod common;

use common::{mask, mask_with_placeholder, mask_with_value, select, type_str, DATE, PHONE};
use maskfield::Selection;

// ========================================================================
// Value formatting
// ========================================================================

#[test]
fn test_empty_value_shows_placeholders() {
    let mask = mask(PHONE);
    assert_eq!(mask.value(), "(___) ___-____");
}

#[test]
fn test_set_value_formats_raw_input() {
    let mut mask = mask(DATE);
    mask.set_value("12345678");
    assert_eq!(mask.value(), "12/34/5678");
}

#[test]
fn test_set_value_accepts_formatted_input() {
    let mut mask = mask(DATE);
    mask.set_value("12/34/5678");
    assert_eq!(mask.value(), "12/34/5678");
}

#[test]
fn test_set_value_drops_excess_characters() {
    let mut mask = mask(DATE);
    mask.set_value("123456789999");
    assert_eq!(mask.value(), "12/34/5678");
}

#[test]
fn test_set_value_partial_pads_with_placeholders() {
    let mut mask = mask(DATE);
    mask.set_value("12");
    assert_eq!(mask.value(), "12/__/____");
}

#[test]
fn test_value_length_always_matches_pattern() {
    let mut mask = mask(PHONE);
    assert_eq!(mask.value().chars().count(), 14);
    mask.set_value("555");
    assert_eq!(mask.value().chars().count(), 14);
    mask.set_value("5551234567");
    assert_eq!(mask.value().chars().count(), 14);
}

#[test]
fn test_raw_value_strips_literals() {
    let mut mask = mask(PHONE);
    type_str(&mut mask, "50");
    assert_eq!(mask.raw_value(), "50________");
}

#[test]
fn test_raw_value_round_trip_is_idempotent() {
    let mut mask = mask(DATE);
    type_str(&mut mask, "12");
    mask.backspace();
    type_str(&mut mask, "93");

    let before = mask.value();
    let raw = mask.raw_value();
    mask.set_value(&raw);
    assert_eq!(mask.value(), before);
}

#[test]
fn test_custom_placeholder() {
    let mask = mask_with_placeholder(PHONE, "#");
    assert_eq!(mask.value(), "(###) ###-####");
}

#[test]
fn test_empty_placeholder_omits_unfilled_slots() {
    let mut mask = mask_with_placeholder("11/11", "");
    type_str(&mut mask, "12");
    assert_eq!(mask.value(), "12/");
    assert_eq!(mask.raw_value(), "12");
}

// ========================================================================
// Input
// ========================================================================

#[test]
fn test_input_lands_on_first_editable_slot() {
    let mut mask = mask(PHONE);
    assert!(mask.input('5'));
    assert_eq!(mask.value(), "(5__) ___-____");
    assert_eq!(mask.selection(), Selection::collapsed(2));
}

#[test]
fn test_input_advances_over_literal_runs() {
    let mut mask = mask(DATE);
    type_str(&mut mask, "12");
    // Cursor skipped the separator and sits on the next editable slot
    assert_eq!(mask.selection(), Selection::collapsed(3));
    assert_eq!(mask.value(), "12/__/____");
}

#[test]
fn test_input_fills_whole_pattern() {
    let mut mask = mask(PHONE);
    type_str(&mut mask, "5551234567");
    assert_eq!(mask.value(), "(555) 123-4567");
    assert_eq!(mask.selection(), Selection::collapsed(14));
}

#[test]
fn test_input_at_end_of_pattern_is_rejected() {
    let mut mask = mask(PHONE);
    type_str(&mut mask, "5551234567");
    assert!(!mask.input('9'));
    assert_eq!(mask.value(), "(555) 123-4567");
}

#[test]
fn test_input_rejected_by_validator() {
    let mut mask = mask("aa");
    assert!(!mask.input('1'));
    assert_eq!(mask.value(), "__");
    assert_eq!(mask.selection(), Selection::collapsed(0));
}

#[test]
fn test_input_applies_transform() {
    let mut mask = mask("AA-11");
    type_str(&mut mask, "ab");
    assert_eq!(mask.value(), "AB-__");
}

#[test]
fn test_input_over_range_selection_clears_remainder() {
    let mut mask = mask_with_value(DATE, "12345678");
    select(&mut mask, 0, 5);
    assert!(mask.input('9'));
    assert_eq!(mask.value(), "9_/__/5678");
    assert_eq!(mask.selection(), Selection::collapsed(1));
}

#[test]
fn test_input_at_literal_slot_is_tolerated() {
    let mut mask = mask(DATE);
    type_str(&mut mask, "12");
    mask.set_selection(Selection::collapsed(2));

    // The separator slot stores nothing but the cursor still advances
    assert!(mask.input('7'));
    assert_eq!(mask.value(), "12/__/____");
    assert_eq!(mask.selection(), Selection::collapsed(3));
}

// ========================================================================
// Backspace
// ========================================================================

#[test]
fn test_backspace_at_start_is_rejected() {
    let mut mask = mask(DATE);
    assert!(!mask.backspace());
    assert_eq!(mask.value(), "__/__/____");
}

#[test]
fn test_backspace_clears_previous_slot() {
    let mut mask = mask(DATE);
    type_str(&mut mask, "12");
    assert!(mask.backspace());
    // Cursor was past the separator, which backspace steps over first
    assert_eq!(mask.value(), "12/__/____");
    assert_eq!(mask.selection(), Selection::collapsed(2));

    assert!(mask.backspace());
    assert_eq!(mask.value(), "1_/__/____");
    assert_eq!(mask.selection(), Selection::collapsed(1));
}

#[test]
fn test_backspace_over_range_clears_editable_slots() {
    let mut mask = mask_with_value(DATE, "12345678");
    select(&mut mask, 1, 4);
    assert!(mask.backspace());
    assert_eq!(mask.value(), "1_/_4/5678");
    assert_eq!(mask.selection(), Selection::collapsed(1));
}

#[test]
fn test_backspace_then_retype() {
    let mut mask = mask(DATE);
    type_str(&mut mask, "1234");
    assert_eq!(mask.value(), "12/34/____");

    // First backspace steps over the separator, second clears a digit
    mask.backspace();
    mask.backspace();
    assert_eq!(mask.value(), "12/3_/____");
    assert_eq!(mask.selection(), Selection::collapsed(4));

    type_str(&mut mask, "56");
    assert_eq!(mask.value(), "12/35/6___");
}
