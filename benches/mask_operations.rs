//! Benchmarks for mask editing operations
//!
//! Run with: cargo bench mask_operations

use maskfield::{FormatRegistry, MaskOptions, MaskState, Pattern, Selection};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const PHONE: &str = "(111) 111-1111";

fn phone_mask() -> MaskState {
    MaskState::new(MaskOptions::pattern(PHONE)).unwrap()
}

// ============================================================================
// Compilation and formatting
// ============================================================================

#[divan::bench]
fn compile_phone_pattern() {
    let pattern = Pattern::compile(
        divan::black_box(PHONE),
        FormatRegistry::built_in(),
        false,
    );
    divan::black_box(pattern.unwrap());
}

#[divan::bench]
fn compile_long_pattern() {
    let source = "1111-".repeat(40);
    let pattern = Pattern::compile(
        divan::black_box(&source),
        FormatRegistry::built_in(),
        false,
    );
    divan::black_box(pattern.unwrap());
}

#[divan::bench]
fn format_value_long_pattern() {
    let source = "1111-".repeat(40);
    let pattern = Pattern::compile(&source, FormatRegistry::built_in(), false).unwrap();
    let candidates: Vec<char> = "1234".repeat(40).chars().collect();
    divan::black_box(pattern.format_value(divan::black_box(&candidates)));
}

// ============================================================================
// Editing operations
// ============================================================================

#[divan::bench]
fn type_full_phone_number() {
    let mut mask = phone_mask();
    for ch in "5551234567".chars() {
        mask.input(divan::black_box(ch));
    }
    divan::black_box(mask.value());
}

#[divan::bench]
fn backspace_through_full_value() {
    let mut mask = phone_mask();
    mask.set_value("5551234567");
    mask.set_selection(Selection::collapsed(14));
    while mask.backspace() {}
    divan::black_box(mask.value());
}

#[divan::bench]
fn paste_with_literal_prefix() {
    let mut mask = phone_mask();
    mask.paste(divan::black_box("(5551234567"));
    divan::black_box(mask.value());
}

#[divan::bench]
fn paste_rolled_back() {
    let mut mask = phone_mask();
    mask.paste(divan::black_box("(555123x"));
    divan::black_box(mask.value());
}

// ============================================================================
// History
// ============================================================================

#[divan::bench]
fn undo_redo_cycle() {
    let mut mask = phone_mask();
    // Alternating operations record a history step per keystroke
    for ch in "5551234567".chars() {
        mask.input(divan::black_box(ch));
        mask.backspace();
        mask.input(divan::black_box(ch));
    }
    while mask.undo() {}
    while mask.redo() {}
    divan::black_box(mask.value());
}
