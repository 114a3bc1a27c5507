//! Mask pattern compilation.
//!
//! A pattern source mixes literal characters with registered format symbols.
//! Prefixing any character with the escape character forces it to be treated
//! as a literal, including the escape character itself and registered
//! symbols. Compilation resolves the source into an indexed template of
//! slots that the edit engine reads but never mutates.

use std::fmt;

use crate::format::FormatRegistry;

/// Escape character in pattern sources
pub const ESCAPE_CHAR: char = '\\';

/// One fixed position in a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Rendered verbatim, never edited
    Literal(char),
    /// Accepts input matching the registered symbol
    Editable(char),
}

/// Errors from pattern compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The source ends with a raw escape character
    UnterminatedEscape,
    /// The source resolves to literal slots only
    NoEditableSlots { source: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedEscape => {
                write!(f, "pattern ends with a raw {:?}", ESCAPE_CHAR)
            }
            Self::NoEditableSlots { source } => {
                write!(f, "pattern {:?} does not contain any editable slots", source)
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A compiled mask pattern: an immutable, indexed template distinguishing
/// editable slots from literal slots.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    slots: Vec<Slot>,
    first_editable: usize,
    last_editable: usize,
    registry: FormatRegistry,
    revealing: bool,
}

impl Pattern {
    /// Compile a mask source against a resolved registry.
    ///
    /// Fails on a trailing raw escape or when no slot is editable, so a
    /// constructed pattern always has concrete first/last editable indices.
    pub fn compile(
        source: &str,
        registry: FormatRegistry,
        revealing: bool,
    ) -> Result<Self, PatternError> {
        let chars: Vec<char> = source.chars().collect();
        let mut slots = Vec::with_capacity(chars.len());
        let mut first_editable = None;
        let mut last_editable = 0;

        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if ch == ESCAPE_CHAR {
                if i + 1 == chars.len() {
                    return Err(PatternError::UnterminatedEscape);
                }
                i += 1;
                slots.push(Slot::Literal(chars[i]));
            } else if registry.contains(ch) {
                if first_editable.is_none() {
                    first_editable = Some(slots.len());
                }
                last_editable = slots.len();
                slots.push(Slot::Editable(ch));
            } else {
                slots.push(Slot::Literal(ch));
            }
            i += 1;
        }

        let Some(first_editable) = first_editable else {
            return Err(PatternError::NoEditableSlots {
                source: source.to_string(),
            });
        };

        Ok(Self {
            source: source.to_string(),
            slots,
            first_editable,
            last_editable,
            registry,
            revealing,
        })
    }

    /// The original mask source string
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of slots after escape resolution
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the pattern reveals only the typed prefix
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// The resolved slot sequence
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Index of the first editable slot
    pub fn first_editable(&self) -> usize {
        self.first_editable
    }

    /// Index of the last editable slot
    pub fn last_editable(&self) -> usize {
        self.last_editable
    }

    /// Indices of all editable slots, in order
    pub fn editable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Slot::Editable(_)))
            .map(|(i, _)| i)
    }

    /// The registry this pattern was compiled against
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn is_editable(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Editable(_)))
    }

    /// The literal character at a slot, None for editable slots
    pub fn literal_at(&self, index: usize) -> Option<char> {
        match self.slots.get(index) {
            Some(Slot::Literal(ch)) => Some(*ch),
            _ => None,
        }
    }

    /// Check a character against the slot's validator.
    /// Literal slots accept nothing.
    pub fn is_valid_at(&self, ch: char, index: usize) -> bool {
        match self.slots.get(index) {
            Some(Slot::Editable(symbol)) => self
                .registry
                .get(*symbol)
                .map(|format| format.is_valid(ch))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Transform a character for the slot; identity when the slot has no
    /// transform.
    pub fn transform_at(&self, ch: char, index: usize) -> char {
        match self.slots.get(index) {
            Some(Slot::Editable(symbol)) => self
                .registry
                .get(*symbol)
                .map(|format| format.apply(ch))
                .unwrap_or(ch),
            _ => ch,
        }
    }

    /// Fill a buffer from candidate input characters.
    ///
    /// Literal slots emit their literal and absorb a matching candidate so
    /// raw values containing the mask's own separators stay aligned.
    /// Editable slots consume one candidate each; a candidate the slot
    /// rejects is consumed rather than carried forward to later slots.
    /// A revealing pattern stops at the first editable slot with no
    /// candidates left, yielding a shortened buffer.
    pub fn format_value(&self, candidates: &[char]) -> Vec<Option<char>> {
        let mut buffer = Vec::with_capacity(self.slots.len());
        let mut next = 0;

        for (i, slot) in self.slots.iter().enumerate() {
            match *slot {
                Slot::Editable(_) => {
                    if self.revealing && next >= candidates.len() {
                        break;
                    }
                    match candidates.get(next) {
                        Some(&ch) if self.is_valid_at(ch, i) => {
                            buffer.push(Some(self.transform_at(ch, i)));
                            next += 1;
                        }
                        Some(_) => {
                            buffer.push(None);
                            next += 1;
                        }
                        None => buffer.push(None),
                    }
                }
                Slot::Literal(lit) => {
                    buffer.push(Some(lit));
                    if candidates.get(next) == Some(&lit) {
                        next += 1;
                    }
                }
            }
        }

        buffer
    }
}
