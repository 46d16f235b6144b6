use std::{cmp::Ordering, fmt::Display, str::FromStr};

use crate::error::{TableError, TokenDefect};

/// A symbol consisting of a single letter `label` and a numeric `index`, written
/// without separator, e.g. `q0` or `a12`.
///
/// The same representation names inputs, outputs and states of an automaton. Signals
/// are only ordered within one family, i.e. when their labels agree. Comparing `a1`
/// with `q0` has no answer, [`Signal::try_cmp`] reports this as
/// [`TableError::IncomparableLabels`] and [`PartialOrd`] returns `None`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Signal {
    label: char,
    index: u32,
}

/// States are named exactly like signals, conventionally with label `q`.
pub type State = Signal;

impl Signal {
    /// Creates a signal from its parts.
    pub fn new(label: char, index: u32) -> Self {
        Self { label, index }
    }

    /// The letter naming the family of this signal.
    pub fn label(&self) -> char {
        self.label
    }

    /// The position of this signal within its family.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Compares two signals of the same family by their index.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, TableError> {
        if self.label != other.label {
            return Err(TableError::IncomparableLabels(*self, *other));
        }
        Ok(self.index.cmp(&other.index))
    }
}

impl PartialOrd for Signal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl FromStr for Signal {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(label), Some(_)) = (chars.next(), chars.next()) else {
            return Err(TableError::malformed(s, TokenDefect::TooShort { minimum: 2 }));
        };
        if !label.is_ascii_alphabetic() {
            return Err(TableError::malformed(s, TokenDefect::NonAlphabeticLabel));
        }

        let digits = &s[label.len_utf8()..];
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TableError::malformed(s, TokenDefect::NonDigitIndex));
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(TableError::malformed(s, TokenDefect::LeadingZero));
        }
        let index = digits
            .parse()
            .map_err(|_| TableError::malformed(s, TokenDefect::IndexOverflow))?;

        Ok(Self { label, index })
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.label, self.index)
    }
}

/// The content of a cell in a [`crate::MooreTable`]: the state that is reached.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct MooreState(pub State);

impl MooreState {
    /// The state this cell leads to.
    pub fn state(&self) -> State {
        self.0
    }
}

impl From<State> for MooreState {
    fn from(value: State) -> Self {
        Self(value)
    }
}

impl FromStr for MooreState {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Display for MooreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The content of a cell in a [`crate::MealyTable`]: the state that is reached
/// together with the signal that is emitted on the way. Written as `q1/a0`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct MealyState {
    /// Target of the transition.
    pub state: State,
    /// Output emitted by the transition.
    pub signal: Signal,
}

impl MealyState {
    /// Minimal length of the textual form, two characters for each token and one separator.
    pub const MIN_LEN: usize = 5;

    /// Creates a cell from its target state and output signal.
    pub fn new(state: State, signal: Signal) -> Self {
        Self { state, signal }
    }

    /// Orders by state first and breaks ties with the signal.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, TableError> {
        match self.state.try_cmp(&other.state)? {
            Ordering::Equal => self.signal.try_cmp(&other.signal),
            unequal => Ok(unequal),
        }
    }
}

impl PartialOrd for MealyState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl FromStr for MealyState {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() < Self::MIN_LEN {
            return Err(TableError::malformed(
                s,
                TokenDefect::TooShort {
                    minimum: Self::MIN_LEN,
                },
            ));
        }

        // the state token ends where its digits end, exactly one separator follows
        let split = s
            .char_indices()
            .skip(1)
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(pos, _)| pos)
            .ok_or_else(|| TableError::malformed(s, TokenDefect::MissingSeparator))?;
        let separator = s[split..]
            .chars()
            .next()
            .ok_or_else(|| TableError::malformed(s, TokenDefect::MissingSeparator))?;
        if separator.is_ascii_alphanumeric() {
            return Err(TableError::malformed(s, TokenDefect::MissingSeparator));
        }

        Ok(Self {
            state: s[..split].parse()?,
            signal: s[split + separator.len_utf8()..].parse()?,
        })
    }
}

impl Display for MealyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.state, self.signal)
    }
}
