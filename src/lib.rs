//! In-place heap algorithms over slices built on the poplar heap.
//!
//! A poplar heap keeps a slice as a forest of perfect binary trees
//! ("poplars") stored in post-order, each with its root at the *last* index
//! of its segment. It offers the same operations as a classic binary heap
//! laid over a slice (build, push, pop, sort, check) while doing fewer
//! comparisons and moves, and it never allocates.
//!
//! Unlike [`BinaryHeap`], the greatest element of a poplar heap is not at a
//! fixed index; [`pop_heap`] finds it among the poplar roots and moves it to
//! the *end* of the slice, so the heap shrinks from the back.
//!
//! # Examples
//!
//! ```
//! let mut v = vec![3, 1, 4, 1, 5, 9, 2, 6];
//!
//! poplar_heap::make_heap(&mut v);
//! assert!(poplar_heap::is_heap(&v));
//!
//! // Add an element.
//! v.push(7);
//! poplar_heap::push_heap(&mut v);
//! assert!(poplar_heap::is_heap(&v));
//!
//! // Take the greatest one back out.
//! poplar_heap::pop_heap(&mut v);
//! assert_eq!(v.pop(), Some(9));
//! assert!(poplar_heap::is_heap(&v));
//!
//! poplar_heap::sort_heap(&mut v);
//! assert_eq!(v, [1, 1, 2, 3, 4, 5, 6, 7]);
//! ```
//!
//! ## Min-heap
//!
//! Every operation has a `_by` form taking an `is_less` comparator.
//! Inverting it, or wrapping the elements in [`core::cmp::Reverse`], gives a
//! min-heap whose [`pop_heap`] moves the smallest element to the end.
//!
//! ```
//! let mut v = vec![3, 1, 4, 1, 5];
//! poplar_heap::make_heap_by(&mut v, |a, b| a > b);
//!
//! poplar_heap::pop_heap_by(&mut v, |a, b| a > b);
//! assert_eq!(v.pop(), Some(1));
//! ```
//!
//! # Contract
//!
//! `is_less` must implement a strict weak ordering. Operations that expect
//! a heap (`push_heap`, `pop_heap`, `sort_heap`) do not check for one. Calling
//! them on a slice that is not a heap, or with an inconsistent comparator,
//! is a logic error: the resulting order is unspecified and may not be a
//! heap, but it is still a permutation of the input and never undefined
//! behavior. The same holds if `is_less` panics.
//!
//! # Time complexity
//!
//! | [make\_heap] | [push\_heap]    | [pop\_heap]     | [sort\_heap]         | [is\_heap] |
//! |--------------|-----------------|-----------------|----------------------|------------|
//! | *O*(*n*)     | *O*(log(*n*))   | *O*(log(*n*))   | *O*(*n* \* log(*n*)) | *O*(*n*)   |
//!
//! [`BinaryHeap`]: std::collections::BinaryHeap
//! [make\_heap]: make_heap
//! [push\_heap]: push_heap
//! [pop\_heap]: pop_heap
//! [sort\_heap]: sort_heap
//! [is\_heap]: is_heap

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod insertion;
mod poplar;

#[cfg(test)]
mod proptests;

/// Rearranges `v` into a poplar heap.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let mut v = [5, 9, 3, 7, 1];
/// poplar_heap::make_heap(&mut v);
/// assert!(poplar_heap::is_heap(&v));
/// ```
///
/// # Time complexity
///
/// *O*(*n*) comparisons and swaps.
pub fn make_heap<T: Ord>(v: &mut [T]) {
    poplar::make_forest(v, &mut T::lt);
}

/// Rearranges `v` into a poplar heap with respect to the comparator
/// `is_less`.
///
/// `is_less(a, b)` returns `true` when `a` must end up below `b`.
///
/// # Examples
///
/// ```
/// let mut v = ["pear", "fig", "banana", "kiwi"];
/// poplar_heap::make_heap_by(&mut v, |a, b| a.len() < b.len());
/// assert!(poplar_heap::is_heap_by(&v, |a, b| a.len() < b.len()));
/// ```
pub fn make_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    poplar::make_forest(v, &mut is_less);
}

/// Inserts the last element of `v` into the poplar heap formed by the other
/// elements, making the whole of `v` a heap.
///
/// `v[..v.len() - 1]` must already be a heap.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let mut v = vec![2, 4, 9];
/// poplar_heap::make_heap(&mut v);
///
/// v.push(11);
/// poplar_heap::push_heap(&mut v);
/// assert!(poplar_heap::is_heap(&v));
/// ```
///
/// # Time complexity
///
/// *O*(log(*n*)): finding the poplar the new element closes takes one step
/// per poplar, then a single sift runs over that poplar.
pub fn push_heap<T: Ord>(v: &mut [T]) {
    poplar::push_forest(v, &mut T::lt);
}

/// Inserts the last element of `v` into the poplar heap formed by the other
/// elements, with respect to the comparator `is_less`.
///
/// `v[..v.len() - 1]` must already be a heap under the same comparator.
pub fn push_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    poplar::push_forest(v, &mut is_less);
}

/// Moves the greatest element of the poplar heap `v` to its last position.
///
/// Afterwards `v[..v.len() - 1]` is a heap again; the caller shrinks the
/// heap by one, typically with [`Vec::pop`] or by re-slicing.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let mut v = vec![1, 5, 2, 8, 3];
/// poplar_heap::make_heap(&mut v);
///
/// poplar_heap::pop_heap(&mut v);
/// assert_eq!(v.pop(), Some(8));
/// poplar_heap::pop_heap(&mut v);
/// assert_eq!(v.pop(), Some(5));
/// assert!(poplar_heap::is_heap(&v));
/// ```
///
/// # Time complexity
///
/// *O*(log(*n*)). Only the poplar roots are compared to find the maximum,
/// and only the poplar that received the displaced last element is sifted.
pub fn pop_heap<T: Ord>(v: &mut [T]) {
    poplar::pop_forest(v, &mut T::lt);
}

/// Moves the greatest element of the poplar heap `v` to its last position,
/// with respect to the comparator `is_less`.
pub fn pop_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    poplar::pop_forest(v, &mut is_less);
}

/// Sorts the poplar heap `v` in ascending order.
///
/// # Examples
///
/// Basic usage:
///
/// ```
/// let mut v = [2, 4, 6, 2, 1, 8, 10, 3, 5, 7, 0, 9, 1];
/// poplar_heap::make_heap(&mut v);
/// poplar_heap::sort_heap(&mut v);
/// assert_eq!(v, [0, 1, 1, 2, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
/// ```
///
/// # Time complexity
///
/// *O*(*n* \* log(*n*)).
pub fn sort_heap<T: Ord>(v: &mut [T]) {
    sort_forest(v, &mut T::lt);
}

/// Sorts the poplar heap `v` in ascending order with respect to the
/// comparator `is_less`.
///
/// ```
/// let mut v = [2, 4, 6, 2, 1, 8];
/// poplar_heap::make_heap_by(&mut v, |a, b| a > b);
/// poplar_heap::sort_heap_by(&mut v, |a, b| a > b);
/// assert_eq!(v, [8, 6, 4, 2, 2, 1]);
/// ```
pub fn sort_heap_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    sort_forest(v, &mut is_less);
}

fn sort_forest<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut end = v.len();
    while end > 1 {
        poplar::pop_forest(&mut v[..end], is_less);
        end -= 1;
    }
}

/// Sorts `v` in ascending order by building a poplar heap and sorting it.
///
/// This sort is unstable, in-place and *O*(*n* \* log(*n*)) worst-case.
///
/// # Examples
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
/// poplar_heap::sort(&mut v);
/// assert_eq!(v, [-5, -3, 1, 2, 4]);
/// ```
pub fn sort<T: Ord>(v: &mut [T]) {
    sort_by(v, T::lt);
}

/// Sorts `v` with the comparator `is_less` by building a poplar heap and
/// sorting it.
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
/// poplar_heap::sort_by(&mut v, |a, b| b < a);
/// assert_eq!(v, [4, 2, 1, -3, -5]);
/// ```
pub fn sort_by<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    poplar::make_forest(v, &mut is_less);
    sort_forest(v, &mut is_less);
}

/// Sorts `v` by the keys `f` extracts, through a poplar heap.
///
/// The key function is called on both operands of every comparison.
///
/// ```
/// let mut v = [-5i32, 4, 1, -3, 2];
/// poplar_heap::sort_by_key(&mut v, |k| k.abs());
/// assert_eq!(v, [1, 2, -3, 4, -5]);
/// ```
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    sort_by(v, |a, b| f(a).lt(&f(b)));
}

/// Returns the length of the longest prefix of `v` that is a poplar heap.
///
/// The result is `v.len()` when the whole slice is a heap. Otherwise it is
/// the index of the first poplar root that is smaller than one of its two
/// child roots.
///
/// # Examples
///
/// ```
/// let mut v = [1, 2, 3, 4, 5, 6, 7];
/// assert_eq!(poplar_heap::is_heap_until(&v), 7);
///
/// v[5] = 0;
/// assert_eq!(poplar_heap::is_heap_until(&v), 5);
/// ```
pub fn is_heap_until<T: Ord>(v: &[T]) -> usize {
    poplar::forest_until(v, &mut T::lt)
}

/// Returns the length of the longest prefix of `v` that is a poplar heap
/// with respect to the comparator `is_less`.
pub fn is_heap_until_by<T, F>(v: &[T], mut is_less: F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    poplar::forest_until(v, &mut is_less)
}

/// Checks whether `v` is a poplar heap.
///
/// Empty and single-element slices are heaps.
///
/// # Examples
///
/// ```
/// assert!(poplar_heap::is_heap::<i32>(&[]));
/// assert!(poplar_heap::is_heap(&[1, 2, 3]));
/// assert!(!poplar_heap::is_heap(&[3, 2, 1]));
/// ```
#[must_use]
pub fn is_heap<T: Ord>(v: &[T]) -> bool {
    is_heap_until(v) == v.len()
}

/// Checks whether `v` is a poplar heap with respect to the comparator
/// `is_less`.
#[must_use]
pub fn is_heap_by<T, F>(v: &[T], is_less: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    is_heap_until_by(v, is_less) == v.len()
}
