#![forbid(unsafe_code)]

//! Step-generating sorting engines.
//!
//! Every engine mutates an [`ArrayModel`] in place and calls
//! [`Stepper::step`] after each visible mutation. An engine stops early only
//! when the stepper reports [`Cancelled`](crate::step::Cancelled).
//!
//! | Engine    | Steps after                                  |
//! |-----------|----------------------------------------------|
//! | Bubble    | every adjacent comparison (swapped or not)   |
//! | Insertion | every shift and every placement              |
//! | Merge     | every copy-back from the scratch buffer      |
//! | Quick     | every partition exchange and pivot placement |
//! | Heap      | every root extraction and every sift swap    |

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;

use std::fmt;
use std::str::FromStr;

use crate::array::ArrayModel;
use crate::step::{StepResult, Stepper};

/// The selectable sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    /// All algorithms in selector order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Display name, as shown in the selector.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
        }
    }

    /// Short lowercase name, accepted on the command line.
    pub const fn short_name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Position in [`Algorithm::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&a| a == self).unwrap_or(0)
    }

    /// The next algorithm in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous algorithm in selector order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Run this algorithm to completion (or cancellation) on `array`.
    pub fn run<A, S>(self, array: &mut A, stepper: &mut S) -> StepResult
    where
        A: ArrayModel + ?Sized,
        S: Stepper + ?Sized,
    {
        let _span = tracing::debug_span!("sort", algorithm = self.short_name(), len = array.len())
            .entered();
        match self {
            Algorithm::Bubble => bubble_sort(array, stepper),
            Algorithm::Insertion => insertion_sort(array, stepper),
            Algorithm::Merge => merge_sort(array, stepper),
            Algorithm::Quick => quick_sort(array, stepper),
            Algorithm::Heap => heap_sort(array, stepper),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm name that matched nothing in [`Algorithm::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    name: String,
}

impl ParseAlgorithmError {
    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm: {:?}", self.name)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| {
                wanted.eq_ignore_ascii_case(a.name()) || wanted.eq_ignore_ascii_case(a.short_name())
            })
            .ok_or_else(|| ParseAlgorithmError {
                name: s.to_string(),
            })
    }
}
