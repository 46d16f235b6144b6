//! Library for converting between Mealy and Moore machines given as transition tables,
//! and for minimizing them.
//!
//! A Mealy machine emits a signal on every transition, a Moore machine emits a signal
//! in every state. Both are represented as tables whose columns are the states and
//! whose rows are the transitions (the inputs of the machine). A cell of a
//! [`MealyTable`] holds the reached state together with the emitted signal, a cell of a
//! [`MooreTable`] only holds the reached state while the signal of each state is kept
//! in a separate header row.
//!
//! The central operations are
//! - [`MooreTable::from_mealy`], which splits every state of a Mealy machine into one
//!   state per signal that is emitted when entering it,
//! - [`MealyTable::from_moore`], which moves the output of a state onto the
//!   transitions leading into it,
//! - `minimize` on both tables, which removes unreachable states and merges states
//!   that cannot be told apart by their outputs.
//!
//! Tables are read from and written to a simple delimited text format, see [`format`].
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use mealy_moore::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        error::{HeaderKind, TableError, TokenDefect},
        format::{ReadError, TableFormat, WriteTable},
        pipeline::{Mode, PipelineError},
        signal::{MealyState, MooreState, Signal, State},
        table::{MealyTable, MooreTable, TransitionTable},
    };
}

/// Defines the errors that building, converting and minimizing tables can raise.
pub mod error;
pub use error::TableError;

/// Tokens that name inputs, outputs and states, as well as the contents of table cells.
pub mod signal;
pub use signal::{MealyState, MooreState, Signal, State};

/// Some mathematical objects that are used throughout the crate, such as
/// bijections and partitions.
pub mod math;

/// The Mealy and Moore tables together with the functionality they share.
pub mod table;
pub use table::{MealyTable, MooreTable, TransitionTable};

pub mod convert;

/// Removal of unreachable states and merging of equivalent states.
pub mod minimization;

pub mod format;

/// Ties reading, processing and writing of tables together.
pub mod pipeline;
pub use pipeline::Mode;
