#![forbid(unsafe_code)]

//! Quick sort with Lomuto partitioning.

use crate::array::ArrayModel;
use crate::step::{Cancelled, StepKind, StepResult, Stepper};

/// Sort `array` in place using the last element of each range as pivot.
///
/// Steps follow every partition exchange and the final pivot placement.
/// An exchange of an index with itself changes nothing and is reported as
/// [`StepKind::Compare`], but it still steps so the animation keeps pace.
pub fn quick_sort<A, S>(array: &mut A, stepper: &mut S) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    if array.len() < 2 {
        return Ok(());
    }
    sort_range(array, stepper, 0, array.len() - 1)
}

fn sort_range<A, S>(array: &mut A, stepper: &mut S, low: usize, high: usize) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    if low >= high {
        return Ok(());
    }
    let pivot = partition(array, stepper, low, high)?;
    if pivot > low {
        sort_range(array, stepper, low, pivot - 1)?;
    }
    sort_range(array, stepper, pivot + 1, high)
}

fn partition<A, S>(
    array: &mut A,
    stepper: &mut S,
    low: usize,
    high: usize,
) -> Result<usize, Cancelled>
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    let pivot = array.get(high);
    let mut store = low;
    for j in low..high {
        if array.get(j) < pivot {
            exchange(array, stepper, store, j)?;
            store += 1;
        }
    }
    exchange(array, stepper, store, high)?;
    Ok(store)
}

fn exchange<A, S>(array: &mut A, stepper: &mut S, a: usize, b: usize) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    if a == b {
        return stepper.step(StepKind::Compare);
    }
    array.swap(a, b);
    stepper.step(StepKind::Swap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::CountingStepper;

    #[test]
    fn sorts_with_duplicates() {
        let mut v = vec![3u32, 1, 3, 2, 1, 3];
        quick_sort(v.as_mut_slice(), &mut CountingStepper::new()).unwrap();
        assert_eq!(v, vec![1, 1, 2, 3, 3, 3]);
    }

    #[test]
    fn sorted_input_has_no_real_swaps() {
        let mut v = vec![1u32, 2, 3, 4];
        let mut stepper = CountingStepper::new();
        quick_sort(v.as_mut_slice(), &mut stepper).unwrap();
        assert_eq!(v, vec![1, 2, 3, 4]);
        assert_eq!(stepper.stats().swaps, 0);
        assert!(stepper.stats().steps > 0);
    }

    #[test]
    fn pivot_lands_in_final_position() {
        let mut v = vec![7u32, 2, 9, 4, 5];
        let mut stepper = CountingStepper::new();
        let p = partition(v.as_mut_slice(), &mut stepper, 0, 4).unwrap();
        assert_eq!(p, 2);
        assert_eq!(v[p], 5);
        assert!(v[..p].iter().all(|&x| x < 5));
        assert!(v[p + 1..].iter().all(|&x| x >= 5));
    }
}
