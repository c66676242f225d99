#![forbid(unsafe_code)]

//! Insertion sort with one-at-a-time shifting.

use crate::array::ArrayModel;
use crate::step::{StepKind, StepResult, Stepper};

/// Sort `array` in place.
///
/// For each element from index 1, larger predecessors shift right one slot
/// at a time (a step per shift) and the element is then placed into the gap
/// (one more step).
pub fn insertion_sort<A, S>(array: &mut A, stepper: &mut S) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    for i in 1..array.len() {
        let key = array.get(i);
        let mut hole = i;
        while hole > 0 && array.get(hole - 1) > key {
            let shifted = array.get(hole - 1);
            array.set(hole, shifted);
            hole -= 1;
            stepper.step(StepKind::Write)?;
        }
        array.set(hole, key);
        stepper.step(StepKind::Write)?;
    }
    Ok(())
}
