#![forbid(unsafe_code)]

//! Bubble sort: adjacent compare-and-swap passes.

use crate::array::ArrayModel;
use crate::step::{StepKind, StepResult, Stepper};

/// Sort `array` in place, stepping after every inner-loop comparison.
///
/// A step is emitted whether or not the pair was swapped, so an already
/// sorted array still animates `n(n-1)/2` comparison steps.
pub fn bubble_sort<A, S>(array: &mut A, stepper: &mut S) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    let n = array.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            if array.get(j) > array.get(j + 1) {
                array.swap(j, j + 1);
                stepper.step(StepKind::Swap)?;
            } else {
                stepper.step(StepKind::Compare)?;
            }
        }
    }
    Ok(())
}
