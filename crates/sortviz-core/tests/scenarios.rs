//! Worked examples for individual engines.

use sortviz_core::array::SharedArray;
use sortviz_core::step::{CountingStepper, RecordingStepper};
use sortviz_core::{Algorithm, StepKind};

#[test]
fn bubble_sort_four_values() {
    let mut array = SharedArray::from_values(&[5, 3, 8, 1]);
    let mut rec = RecordingStepper::new(array.clone());
    Algorithm::Bubble.run(&mut array, &mut rec).unwrap();

    let frames = rec.into_frames();
    // 3 + 2 + 1 comparisons, each one a step
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[0], (StepKind::Swap, vec![3, 5, 8, 1]));
    assert_eq!(frames[1], (StepKind::Compare, vec![3, 5, 8, 1]));
    assert_eq!(frames[2], (StepKind::Swap, vec![3, 5, 1, 8]));
    assert_eq!(array.snapshot(), vec![1, 3, 5, 8]);
}

#[test]
fn heap_sort_two_values() {
    let mut array = SharedArray::from_values(&[2, 1]);
    let mut rec = RecordingStepper::new(array.clone());
    Algorithm::Heap.run(&mut array, &mut rec).unwrap();
    assert_eq!(rec.frames(), &[(StepKind::Swap, vec![1, 2])]);
    assert_eq!(array.snapshot(), vec![1, 2]);
}

#[test]
fn empty_array_emits_nothing() {
    for algo in Algorithm::ALL {
        let mut empty: Vec<u32> = Vec::new();
        let mut stepper = CountingStepper::new();
        algo.run(empty.as_mut_slice(), &mut stepper).unwrap();
        assert_eq!(stepper.stats().steps, 0, "{algo} stepped on empty input");
    }
}

#[test]
fn single_element_emits_nothing() {
    for algo in Algorithm::ALL {
        let mut one = vec![77u32];
        let mut stepper = CountingStepper::new();
        algo.run(one.as_mut_slice(), &mut stepper).unwrap();
        assert_eq!(stepper.stats().steps, 0, "{algo} stepped on one element");
        assert_eq!(one, vec![77]);
    }
}

#[test]
fn insertion_sort_shifts_then_places() {
    let mut array = SharedArray::from_values(&[3, 1, 2]);
    let mut rec = RecordingStepper::new(array.clone());
    Algorithm::Insertion.run(&mut array, &mut rec).unwrap();
    let states: Vec<Vec<u32>> = rec.into_frames().into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        states,
        vec![
            vec![3, 3, 2], // shift 3 right
            vec![1, 3, 2], // place 1
            vec![1, 3, 3], // shift 3 right
            vec![1, 2, 3], // place 2
        ]
    );
}

#[test]
fn merge_sort_copies_back_per_element() {
    let mut array = SharedArray::from_values(&[2, 1, 4, 3]);
    let mut rec = RecordingStepper::new(array.clone());
    Algorithm::Merge.run(&mut array, &mut rec).unwrap();
    let frames = rec.into_frames();
    assert!(frames.iter().all(|(kind, _)| *kind == StepKind::Write));
    assert_eq!(frames[1].1, vec![1, 2, 4, 3]);
    assert_eq!(frames[3].1, vec![1, 2, 3, 4]);
    assert_eq!(frames.len(), 8);
}

#[test]
fn quick_sort_steps_on_pivot_placement() {
    // pivot 1 is the smallest: no partition swaps, one placement swap
    let mut array = SharedArray::from_values(&[3, 2, 1]);
    let mut rec = RecordingStepper::new(array.clone());
    Algorithm::Quick.run(&mut array, &mut rec).unwrap();
    let frames = rec.into_frames();
    assert_eq!(frames[0], (StepKind::Swap, vec![1, 2, 3]));
    assert_eq!(array.snapshot(), vec![1, 2, 3]);
}
