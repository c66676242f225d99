#![forbid(unsafe_code)]

//! Heap sort on an implicit binary max-heap.

use crate::array::ArrayModel;
use crate::step::{StepKind, StepResult, Stepper};

/// Sort `array` in place.
///
/// Builds a max-heap bottom-up, then repeatedly swaps the root behind the
/// shrinking heap and sifts the new root down. Every swap steps.
pub fn heap_sort<A, S>(array: &mut A, stepper: &mut S) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    let n = array.len();
    for root in (0..n / 2).rev() {
        sift_down(array, stepper, n, root)?;
    }
    for end in (1..n).rev() {
        array.swap(0, end);
        stepper.step(StepKind::Swap)?;
        sift_down(array, stepper, end, 0)?;
    }
    Ok(())
}

/// Restore the heap property for the subtree at `node` within `array[..heap_len]`.
fn sift_down<A, S>(array: &mut A, stepper: &mut S, heap_len: usize, node: usize) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    let mut largest = node;
    let left = 2 * node + 1;
    let right = 2 * node + 2;

    if left < heap_len && array.get(left) > array.get(largest) {
        largest = left;
    }
    if right < heap_len && array.get(right) > array.get(largest) {
        largest = right;
    }

    if largest != node {
        array.swap(node, largest);
        stepper.step(StepKind::Swap)?;
        sift_down(array, stepper, heap_len, largest)?;
    }
    Ok(())
}
