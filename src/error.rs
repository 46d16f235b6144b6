use std::fmt::Display;

use thiserror::Error;

use crate::signal::{Signal, State};

/// Names the kind of header that a lookup was performed on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum HeaderKind {
    /// A row header, i.e. an input of the automaton.
    Transition,
    /// A column header, i.e. a state of the automaton.
    State,
}

impl Display for HeaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderKind::Transition => write!(f, "transition"),
            HeaderKind::State => write!(f, "state"),
        }
    }
}

/// Describes what exactly is wrong with a token that could not be parsed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TokenDefect {
    /// Signals need at least two characters, mealy cells at least five.
    TooShort {
        /// The minimal number of characters.
        minimum: usize,
    },
    /// The first character is not an ASCII letter.
    NonAlphabeticLabel,
    /// Something other than a decimal digit follows the label.
    NonDigitIndex,
    /// The index has a leading zero, e.g. `q01`, and would not be written back the same way.
    LeadingZero,
    /// The index does not fit into a `u32`.
    IndexOverflow,
    /// A mealy cell has no separator between its state and its signal.
    MissingSeparator,
}

impl Display for TokenDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenDefect::TooShort { minimum } => {
                write!(f, "must contain at least {minimum} characters")
            }
            TokenDefect::NonAlphabeticLabel => write!(f, "label must be a letter"),
            TokenDefect::NonDigitIndex => write!(f, "index must consist of decimal digits"),
            TokenDefect::LeadingZero => write!(f, "index must not start with a zero"),
            TokenDefect::IndexOverflow => write!(f, "index is too large"),
            TokenDefect::MissingSeparator => {
                write!(f, "state and signal must be separated by a single character")
            }
        }
    }
}

/// Everything that can go wrong while building, converting or minimizing a table.
/// None of these is recoverable, the table at hand simply is not well-formed.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TableError {
    /// A signal, state or mealy cell token does not follow its grammar.
    #[error("malformed token `{token}`: {defect}")]
    MalformedToken {
        /// The offending token as it was read.
        token: String,
        /// What is wrong with it.
        defect: TokenDefect,
    },
    /// A lookup by value found no matching header.
    #[error("table does not contain {kind} `{value}`")]
    UnknownHeader {
        /// Whether a row or a column header was searched.
        kind: HeaderKind,
        /// The value that was searched for.
        value: State,
    },
    /// A derived index points past the end of the array it indexes.
    #[error("index {index} is out of range for {len} signals")]
    LookupOutOfRange {
        /// The derived index.
        index: usize,
        /// Length of the indexed array.
        len: usize,
    },
    /// The source of a conversion is empty or inconsistent.
    #[error("conversion is incomplete: {0}")]
    ConversionIncomplete(String),
    /// Signals of different families have no order.
    #[error("cannot compare `{0}` with `{1}`, their labels differ")]
    IncomparableLabels(Signal, Signal),
    /// The cell grid does not match the headers.
    #[error("expected {expected} {what} but found {found}")]
    ShapeMismatch {
        /// What was counted, e.g. `rows`.
        what: &'static str,
        /// The count the headers demand.
        expected: usize,
        /// The count that is present.
        found: usize,
    },
    /// Column headers must be unique.
    #[error("state `{0}` appears more than once in the header")]
    DuplicateState(State),
}

impl TableError {
    pub(crate) fn malformed(token: &str, defect: TokenDefect) -> Self {
        Self::MalformedToken {
            token: token.to_string(),
            defect,
        }
    }

    pub(crate) fn unknown_state(value: State) -> Self {
        Self::UnknownHeader {
            kind: HeaderKind::State,
            value,
        }
    }

    pub(crate) fn unknown_transition(value: State) -> Self {
        Self::UnknownHeader {
            kind: HeaderKind::Transition,
            value,
        }
    }
}
