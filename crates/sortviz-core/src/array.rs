#![forbid(unsafe_code)]

//! The array being sorted.
//!
//! Engines are written against [`ArrayModel`] so the same code drives a
//! plain slice (tests, benches) and a [`SharedArray`] that the foreground
//! reads while a background run mutates it.
//!
//! Indices are always produced by the engines themselves, so an
//! out-of-range access is a bug and panics like slice indexing does.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Indexed, fixed-length storage that a sorting engine mutates in place.
pub trait ArrayModel {
    /// Element type. Engines only ever compare and copy values.
    type Value: Copy + Ord;

    /// Number of elements. Constant for the lifetime of a run.
    fn len(&self) -> usize;

    /// Whether the array has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn get(&self, index: usize) -> Self::Value;

    /// Overwrite the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn set(&mut self, index: usize, value: Self::Value);

    /// Exchange the values at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize) {
        let va = self.get(a);
        let vb = self.get(b);
        self.set(a, vb);
        self.set(b, va);
    }
}

impl<T: Copy + Ord> ArrayModel for [T] {
    type Value = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }
}

/// Bar heights shared between one writer (the active run) and readers
/// (the renderer).
///
/// Cloning is cheap and yields a handle to the same storage. Values are
/// stored in relaxed atomics: a reader may observe a run mid-swap, which is
/// exactly the in-progress state the visualization wants to show.
///
/// Replacing the array wholesale is done by building a new `SharedArray`;
/// handles held by an old run keep pointing at the old storage, so stale
/// writes can never leak into the replacement.
#[derive(Clone)]
pub struct SharedArray {
    cells: Arc<[AtomicU32]>,
}

impl SharedArray {
    /// Create a zero-filled array of `len` bars.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    /// Create an array holding a copy of `values`.
    pub fn from_values(values: &[u32]) -> Self {
        Self {
            cells: values.iter().map(|&v| AtomicU32::new(v)).collect(),
        }
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no bars.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read one bar.
    #[inline]
    pub fn load(&self, index: usize) -> u32 {
        self.cells[index].load(Ordering::Relaxed)
    }

    /// Write one bar.
    #[inline]
    pub fn store(&self, index: usize, value: u32) {
        self.cells[index].store(value, Ordering::Relaxed);
    }

    /// Copy the current values out.
    pub fn snapshot(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.len());
        self.snapshot_into(&mut out);
        out
    }

    /// Copy the current values into `out`, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.load(Ordering::Relaxed)));
    }

    /// Whether two handles refer to the same storage.
    #[inline]
    pub fn same_storage(&self, other: &SharedArray) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl fmt::Debug for SharedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot()).finish()
    }
}

impl ArrayModel for SharedArray {
    type Value = u32;

    #[inline]
    fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn get(&self, index: usize) -> u32 {
        self.load(index)
    }

    #[inline]
    fn set(&mut self, index: usize, value: u32) {
        self.store(index, value);
    }
}

/// Whether `values` is in non-decreasing order.
pub fn is_sorted<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}
