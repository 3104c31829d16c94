use core::mem::ManuallyDrop;
use core::ptr;

/// Sorts `v` in ascending order with respect to `is_less`.
///
/// Any ascending run is a valid poplar forest, so this is the base case used
/// for runs of up to [`SMALL_POPLAR_SIZE`](crate::poplar::SMALL_POPLAR_SIZE)
/// elements.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for tail in 1..v.len() {
        insert_tail(&mut v[..=tail], is_less);
    }
}

/// Moves the last element of `v` left until `v` is sorted, assuming
/// `v[..v.len() - 1]` already is.
fn insert_tail<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let tail = v.len() - 1;

    // Compare first so an element already in place costs no moves.
    if !is_less(&v[tail], &v[tail - 1]) {
        return;
    }

    // SAFETY: tail < v.len()
    let mut hole = unsafe { Hole::new(v, tail) };
    // SAFETY: tail - 1 < tail < v.len(), so the index is in bounds and
    //  differs from the hole position.
    unsafe { hole.move_to(tail - 1) };

    while hole.pos() > 0 {
        let prev = hole.pos() - 1;
        // SAFETY: prev < hole.pos() < v.len().
        if !is_less(hole.element(), unsafe { hole.get(prev) }) {
            break;
        }
        // SAFETY: same as above.
        unsafe { hole.move_to(prev) };
    }
}

/// A slot of `data` whose value has been lifted out.
///
/// The lifted element is written back at the current position when the
/// `Hole` is dropped, including during unwinding out of a comparator, so the
/// slice always ends up holding a permutation of its original contents.
struct Hole<'a, T: 'a> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Lift the element at `pos` out of `data`.
    ///
    /// Unsafe because pos must be within the data slice.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: pos is inside the slice, and the bitwise copy is written
        //  back exactly once by `Drop`.
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// The lifted element.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    /// Shift the element at `index` into the hole, leaving the hole at `index`.
    ///
    /// Unsafe because index must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.get_unchecked_mut(pos), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::insertion_sort;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn sorts_small_runs() {
        let mut v = [5, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9];
        insertion_sort(&mut v, &mut |a: &i32, b: &i32| a < b);
        assert_eq!(v, [1, 1, 2, 3, 4, 5, 5, 5, 5, 6, 7, 8, 9, 9, 9]);

        let mut empty: [i32; 0] = [];
        insertion_sort(&mut empty, &mut |a: &i32, b: &i32| a < b);

        let mut one = [42];
        insertion_sort(&mut one, &mut |a: &i32, b: &i32| a < b);
        assert_eq!(one, [42]);
    }

    #[test]
    fn panicking_comparator_keeps_a_permutation() {
        let original: Vec<String> = (0..12).rev().map(|i| i.to_string()).collect();
        let mut v = original.clone();
        let mut calls = 0;

        let result = catch_unwind(AssertUnwindSafe(|| {
            insertion_sort(&mut v, &mut |a: &String, b: &String| {
                calls += 1;
                if calls == 20 {
                    panic!("comparator gave up");
                }
                a.len() < b.len() || (a.len() == b.len() && a < b)
            })
        }));
        assert!(result.is_err());

        let mut seen = v.clone();
        let mut expected = original;
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected);
    }
}
