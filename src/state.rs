//! MaskState - the masked input engine.
//!
//! Owns the live value buffer, the current selection, and the undo/redo
//! history, and reads a compiled [`Pattern`] to validate, transform, and
//! place every edit. The consuming text field forwards keystrokes and
//! selection changes and reads back the formatted value to render.

use std::fmt;

use crate::format::{FormatOverride, FormatRegistry};
use crate::history::{EditHistory, EditOp, Snapshot, DEFAULT_HISTORY_LIMIT};
use crate::pattern::{Pattern, PatternError};
use crate::selection::Selection;

/// Default placeholder shown at empty editable slots
pub const DEFAULT_PLACEHOLDER: char = '_';

/// Construction options for [`MaskState`].
#[derive(Debug, Clone)]
pub struct MaskOptions {
    /// Mask source string (required)
    pub pattern: String,
    /// Format character overrides; a `None` entry removes a built-in symbol
    pub format_chars: Vec<FormatOverride>,
    /// Reveal only the typed prefix instead of padding with placeholders
    pub is_revealing: bool,
    /// Placeholder for empty editable slots: one character, or empty to
    /// omit them from the formatted value
    pub placeholder: String,
    /// Initial value, raw or formatted
    pub value: String,
    /// Initial selection
    pub selection: Selection,
    /// Maximum number of undo snapshots kept
    pub history_limit: usize,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            format_chars: Vec::new(),
            is_revealing: false,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            value: String::new(),
            selection: Selection::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MaskOptions {
    /// Options for the given mask with defaults for everything else
    pub fn pattern(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..Self::default()
        }
    }
}

/// Errors from [`MaskState`] construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// No pattern was provided
    MissingPattern,
    /// The placeholder is longer than a single character
    InvalidPlaceholder { got: String },
    /// The pattern source failed to compile
    Pattern(PatternError),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPattern => write!(f, "a mask pattern is required"),
            Self::InvalidPlaceholder { got } => {
                write!(
                    f,
                    "placeholder should be a single character or empty, got {:?}",
                    got
                )
            }
            Self::Pattern(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PatternError> for MaskError {
    fn from(err: PatternError) -> Self {
        Self::Pattern(err)
    }
}

/// The masked input engine.
///
/// The value buffer holds one cell per pattern slot: literal slots always
/// carry the pattern's literal, editable slots carry an accepted character
/// (post-transform) or `None` when empty. A revealing mask keeps only the
/// typed prefix plus the literals already passed, so its buffer may be
/// shorter than the pattern.
#[derive(Debug, Clone)]
pub struct MaskState {
    pattern: Pattern,
    value: Vec<Option<char>>,
    selection: Selection,
    placeholder: Option<char>,
    history: EditHistory,
    history_limit: usize,
    last_op: Option<EditOp>,
    last_selection: Option<Selection>,
}

impl MaskState {
    pub fn new(options: MaskOptions) -> Result<Self, MaskError> {
        if options.pattern.is_empty() {
            return Err(MaskError::MissingPattern);
        }
        if options.placeholder.chars().count() > 1 {
            return Err(MaskError::InvalidPlaceholder {
                got: options.placeholder,
            });
        }
        let placeholder = options.placeholder.chars().next();
        let registry = FormatRegistry::with_overrides(&options.format_chars);
        let pattern = Pattern::compile(&options.pattern, registry, options.is_revealing)?;

        let mut state = Self {
            pattern,
            value: Vec::new(),
            selection: Selection::default(),
            placeholder,
            history: EditHistory::with_max_size(options.history_limit),
            history_limit: options.history_limit,
            last_op: None,
            last_selection: None,
        };
        state.set_value(&options.value);
        state.selection = options.selection.clamp_to(state.pattern.len());
        Ok(state)
    }

    /// The compiled pattern currently installed
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The placeholder character, None when configured empty
    pub fn placeholder(&self) -> Option<char> {
        self.placeholder
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Install a new pattern, reseeding the value and clearing all history.
    /// The format character registry and revealing mode carry over.
    pub fn set_pattern(
        &mut self,
        pattern: &str,
        value: &str,
        selection: Selection,
    ) -> Result<(), MaskError> {
        if pattern.is_empty() {
            return Err(MaskError::MissingPattern);
        }
        let compiled = Pattern::compile(
            pattern,
            self.pattern.registry().clone(),
            self.pattern.is_revealing(),
        )?;
        tracing::debug!("installing pattern {:?}", pattern);
        self.pattern = compiled;
        self.set_value(value);
        self.selection = selection.clamp_to(self.pattern.len());
        self.history = EditHistory::with_max_size(self.history_limit);
        self.last_op = None;
        self.last_selection = None;
        Ok(())
    }

    /// Seed the buffer from a raw or formatted value string
    pub fn set_value(&mut self, value: &str) {
        let chars: Vec<char> = value.chars().collect();
        self.value = self.pattern.format_value(&chars);
    }

    /// The formatted value.
    ///
    /// A revealing mask recomputes it from the raw value on every call and
    /// stops at the first unfilled editable slot.
    pub fn value(&self) -> String {
        if self.pattern.is_revealing() {
            let raw = self.raw_chars();
            let buffer = self.pattern.format_value(&raw);
            return self.join(&buffer);
        }
        self.join(&self.value)
    }

    /// Editable-slot characters only, literals stripped.
    ///
    /// Empty slots render as the placeholder, or are omitted when the
    /// placeholder is configured empty. A revealing mask's buffer stops at
    /// the typed prefix, so its raw value is exactly what was typed.
    pub fn raw_value(&self) -> String {
        self.raw_chars().into_iter().collect()
    }

    /// The formatted value of an untouched field
    pub fn empty_value(&self) -> String {
        self.join(&self.pattern.format_value(&[]))
    }

    /// Apply a single typed character at the current selection.
    ///
    /// Returns false with no state change when the cursor has nowhere to go
    /// or the slot rejects the character. A range selection is overwritten:
    /// the character lands at its start and the remainder is cleared.
    pub fn input(&mut self, ch: char) -> bool {
        // Additional input at the end of the pattern has nowhere to go
        if self.selection.is_collapsed() && self.selection.start == self.pattern.len() {
            return false;
        }

        let value_before = self.value.clone();
        let selection_before = self.selection;

        // Input before the editable region lands on its first slot
        let input_index = self.selection.start.max(self.pattern.first_editable());

        if self.pattern.is_editable(input_index) {
            if !self.pattern.is_valid_at(ch, input_index) {
                return false;
            }
            let transformed = self.pattern.transform_at(ch, input_index);
            self.set_cell(input_index, Some(transformed));
        }

        // Blank out the rest of an overwritten selection
        let mut end = selection_before.end.saturating_sub(1);
        while end > input_index {
            if self.pattern.is_editable(end) {
                self.set_cell(end, None);
            }
            end -= 1;
        }

        // Step past the slot just written and any literal run after it
        let mut next = input_index + 1;
        while next < self.pattern.len() && !self.pattern.is_editable(next) {
            next += 1;
        }
        self.selection = Selection::collapsed(next);

        self.record(EditOp::Input, value_before, selection_before);
        true
    }

    /// Delete backward from the cursor, or clear a selected range.
    ///
    /// A collapsed cursor empties the editable slot just behind it and
    /// steps back; a range empties every editable slot it covers and
    /// collapses to its start. A revealing mask truncates from the deletion
    /// point instead of leaving placeholders.
    pub fn backspace(&mut self) -> bool {
        // Nothing behind the start of the pattern
        if self.selection.start == 0 && self.selection.end == 0 {
            return false;
        }

        let value_before = self.value.clone();
        let selection_before = self.selection;

        if self.selection.is_collapsed() {
            let index = self.selection.start - 1;
            if self.pattern.is_editable(index) {
                if self.pattern.is_revealing() {
                    self.value.truncate(index);
                } else {
                    self.value[index] = None;
                }
            }
            self.selection = Selection::collapsed(index);
        } else {
            if self.pattern.is_revealing() {
                self.value.truncate(self.selection.start);
            } else {
                for index in self.selection.start..self.selection.end {
                    if self.pattern.is_editable(index) {
                        self.value[index] = None;
                    }
                }
            }
            self.selection = Selection::collapsed(self.selection.start);
        }

        self.record(EditOp::Backspace, value_before, selection_before);
        true
    }

    /// Apply multi-character input atomically.
    ///
    /// Every character is fed through [`input`](Self::input); pasted text
    /// may spell out the mask's own literals, both as a leading literal
    /// prefix and as separators between groups. Any other rejection rolls
    /// the engine back to its exact pre-paste state and returns false.
    pub fn paste(&mut self, input: &str) -> bool {
        let value_before = self.value.clone();
        let selection_before = self.selection;
        let history_before = self.history.clone();
        let last_op_before = self.last_op;
        let last_selection_before = self.last_selection;

        if self.try_paste(input) {
            return true;
        }

        tracing::debug!("paste of {:?} rolled back", input);
        self.value = value_before;
        self.selection = selection_before;
        self.history = history_before;
        self.last_op = last_op_before;
        self.last_selection = last_selection_before;
        false
    }

    fn try_paste(&mut self, input: &str) -> bool {
        let chars: Vec<char> = input.chars().collect();
        let mut next = 0;

        // A cursor inside the literal prefix requires the pasted text to
        // spell that prefix out exactly
        let first = self.pattern.first_editable();
        if self.selection.start < first {
            let prefix = first - self.selection.start;
            for offset in 0..prefix {
                let expected = self.pattern.literal_at(self.selection.start + offset);
                if chars.get(offset).copied() != expected {
                    return false;
                }
            }
            next = prefix;
            self.selection.start = first;
            if self.selection.end < first {
                self.selection.end = first;
            }
        }

        while next < chars.len() && self.selection.start <= self.pattern.last_editable() {
            let ch = chars[next];
            next += 1;
            if self.input(ch) {
                continue;
            }
            // input() steps over literal runs, so a pasted copy of the
            // mask's own separator shows up as a rejection just after the
            // skip; consume it and carry on
            match self.selection.start.checked_sub(1) {
                Some(index)
                    if !self.pattern.is_editable(index)
                        && self.pattern.literal_at(index) == Some(ch) => {}
                _ => return false,
            }
        }
        true
    }

    /// Step back to the previous recorded state
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::new(self.value.clone(), self.selection, self.last_op);
        let Some(snapshot) = self.history.undo(move || current) else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Step forward to the next recorded state
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    /// Install a selection reported by the UI.
    ///
    /// A collapsed cursor is snapped into the editable region: never before
    /// the first editable slot, and never beyond the filled run of
    /// characters behind it. Returns true when the collapsed position was
    /// normalized, false for range selections, which are stored as given.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        self.selection = selection.clamp_to(self.pattern.len());
        if !self.selection.is_collapsed() {
            return false;
        }

        let first = self.pattern.first_editable();
        if self.selection.start < first {
            self.selection = Selection::collapsed(first);
            return true;
        }

        let mut index = self.selection.start;
        while index >= first {
            if index == first || (self.pattern.is_editable(index - 1) && self.is_filled(index - 1))
            {
                self.selection = Selection::collapsed(index);
                break;
            }
            index -= 1;
        }
        true
    }

    /// Write a cell, extending a revealing mask's buffer through any slots
    /// the cursor already stepped over
    fn set_cell(&mut self, index: usize, cell: Option<char>) {
        while self.value.len() < index {
            let passed = self.value.len();
            self.value.push(self.pattern.literal_at(passed));
        }
        if index < self.value.len() {
            self.value[index] = cell;
        } else {
            self.value.push(cell);
        }
    }

    fn is_filled(&self, index: usize) -> bool {
        matches!(self.value.get(index), Some(Some(_)))
    }

    fn raw_chars(&self) -> Vec<char> {
        self.value
            .iter()
            .enumerate()
            .filter(|(index, _)| self.pattern.is_editable(*index))
            .filter_map(|(_, cell)| cell.or(self.placeholder))
            .collect()
    }

    fn join(&self, buffer: &[Option<char>]) -> String {
        buffer
            .iter()
            .filter_map(|cell| cell.or(self.placeholder))
            .collect()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.value = snapshot.value;
        self.selection = snapshot.selection;
        self.last_op = snapshot.last_op;
    }

    /// Record a pre-operation snapshot, coalescing consecutive edits of the
    /// same kind typed from a stable cursor into one undo step
    fn record(&mut self, op: EditOp, value_before: Vec<Option<char>>, selection_before: Selection) {
        if self.history.commit_live() {
            tracing::debug!("discarded redo branch after new {:?}", op);
        }
        let coalesce = self.last_op == Some(op)
            && selection_before.is_collapsed()
            && self
                .last_selection
                .map_or(true, |last| selection_before.start == last.start);
        if !coalesce {
            self.history
                .push(Snapshot::new(value_before, selection_before, self.last_op));
        }
        self.last_op = Some(op);
        self.last_selection = Some(self.selection);
    }
}
