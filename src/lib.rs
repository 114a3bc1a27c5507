//! Fixed-shape masked input editing for UI text fields.
//!
//! Compiles a mask definition (e.g. `(111) 111-1111`) into an indexed
//! template of literal and editable slots, then maintains a value buffer
//! that conforms to that template through every edit: character input,
//! backspace, paste, and linear undo/redo. The consuming text-field
//! component forwards keystrokes and selection changes, and reads back the
//! formatted value to render; rendering and event wiring stay outside this
//! crate.
//!
//! # Architecture
//!
//! The core components are:
//!
//! - [`FormatRegistry`]: maps mask symbols to validation and transforms
//! - [`Pattern`]: a compiled, immutable mask template
//! - [`Selection`]: start/end offsets into the value buffer
//! - [`EditHistory`]: bounded undo/redo snapshots
//! - [`MaskState`]: the engine owning the live buffer, selection, and
//!   history
//!
//! # Example
//!
//! ```
//! use maskfield::{MaskOptions, MaskState};
//!
//! let mut mask = MaskState::new(MaskOptions::pattern("(111) 111-1111")).unwrap();
//! mask.input('5');
//! mask.input('0');
//! assert_eq!(mask.value(), "(50_) ___-____");
//! assert_eq!(mask.raw_value(), "50________");
//! ```

mod format;
mod history;
mod pattern;
mod selection;
mod state;

// Re-export main types
pub use format::{CharTransform, CharValidator, FormatChar, FormatOverride, FormatRegistry};
pub use history::{EditHistory, EditOp, HistoryCursor, Snapshot, DEFAULT_HISTORY_LIMIT};
pub use pattern::{Pattern, PatternError, Slot, ESCAPE_CHAR};
pub use selection::Selection;
pub use state::{MaskError, MaskOptions, MaskState, DEFAULT_PLACEHOLDER};
