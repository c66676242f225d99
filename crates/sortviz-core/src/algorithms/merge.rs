#![forbid(unsafe_code)]

//! Top-down merge sort over inclusive index ranges.

use crate::array::ArrayModel;
use crate::step::{StepKind, StepResult, Stepper};

/// Sort `array` in place with a stable merge sort.
///
/// Each merge fills a scratch buffer sized to the merged range, then copies
/// it back one element at a time with a step after every write.
pub fn merge_sort<A, S>(array: &mut A, stepper: &mut S) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    if array.len() < 2 {
        return Ok(());
    }
    let mut scratch = Vec::with_capacity(array.len());
    split(array, stepper, &mut scratch, 0, array.len() - 1)
}

fn split<A, S>(
    array: &mut A,
    stepper: &mut S,
    scratch: &mut Vec<A::Value>,
    left: usize,
    right: usize,
) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    if left >= right {
        return Ok(());
    }
    let mid = left + (right - left) / 2;
    split(array, stepper, scratch, left, mid)?;
    split(array, stepper, scratch, mid + 1, right)?;
    merge(array, stepper, scratch, left, mid, right)
}

fn merge<A, S>(
    array: &mut A,
    stepper: &mut S,
    scratch: &mut Vec<A::Value>,
    left: usize,
    mid: usize,
    right: usize,
) -> StepResult
where
    A: ArrayModel + ?Sized,
    S: Stepper + ?Sized,
{
    scratch.clear();
    let (mut i, mut j) = (left, mid + 1);
    while i <= mid && j <= right {
        // `<=` takes from the left run on ties, which keeps the sort stable.
        if array.get(i) <= array.get(j) {
            scratch.push(array.get(i));
            i += 1;
        } else {
            scratch.push(array.get(j));
            j += 1;
        }
    }
    scratch.extend((i..=mid).map(|k| array.get(k)));
    scratch.extend((j..=right).map(|k| array.get(k)));

    for (offset, &value) in scratch.iter().enumerate() {
        array.set(left + offset, value);
        stepper.step(StepKind::Write)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::CountingStepper;

    #[test]
    fn sorts_odd_length() {
        let mut v = vec![9u32, 4, 7, 1, 8];
        merge_sort(v.as_mut_slice(), &mut CountingStepper::new()).unwrap();
        assert_eq!(v, vec![1, 4, 7, 8, 9]);
    }

    #[test]
    fn writes_every_element_at_every_level() {
        // n = 4: two merges of 2 plus one merge of 4
        let mut v = vec![4u32, 3, 2, 1];
        let mut stepper = CountingStepper::new();
        merge_sort(v.as_mut_slice(), &mut stepper).unwrap();
        assert_eq!(stepper.stats().writes, 8);
        assert_eq!(stepper.stats().steps, 8);
    }

    #[test]
    fn single_element_is_untouched() {
        let mut v = vec![42u32];
        let mut stepper = CountingStepper::new();
        merge_sort(v.as_mut_slice(), &mut stepper).unwrap();
        assert_eq!(stepper.stats().steps, 0);
    }
}
