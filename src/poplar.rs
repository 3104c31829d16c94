//! Poplar forest primitives.
//!
//! A poplar of size `2^k - 1` occupies a contiguous segment with its root at
//! the *last* index. For `k > 0` its two children are poplars of size
//! `2^(k-1) - 1` filling the first and second half of the remaining
//! elements, so their roots sit at `root - 1` and at `size / 2 - 1` relative
//! to the start of the segment.
//!
//! A slice of length `n` is a forest when it splits, left to right, into the
//! greedy decomposition of `n` into poplar sizes (each poplar as large as
//! still fits) and every poplar root is not smaller than its two child roots.

use crate::insertion::insertion_sort;

/// Poplars up to this size are built with an insertion sort; an ascending run
/// satisfies the poplar property for any decomposition.
pub(crate) const SMALL_POPLAR_SIZE: usize = 15;

/// Returns `2^floor(log2(n))`, the largest power of two not above `n`.
///
/// `n` must be non-zero.
#[inline]
pub(crate) fn hyperfloor(mut n: usize) -> usize {
    debug_assert!(n > 0);
    let mut shift = 1;
    while shift <= usize::BITS / 2 {
        n |= n >> shift;
        shift <<= 1;
    }
    n & !(n >> 1)
}

/// Size of the largest poplar (`2^k - 1`) that fits in `len` elements.
#[inline]
pub(crate) fn largest_poplar(len: usize) -> usize {
    match len.checked_add(1) {
        Some(bound) => hyperfloor(bound) - 1,
        None => usize::MAX,
    }
}

/// Size of the last poplar of a forest over `len` elements.
///
/// Walks the greedy decomposition one poplar at a time, so it takes
/// *O*(log(*len*)) steps.
pub(crate) fn last_poplar(mut len: usize) -> usize {
    let mut poplar_size = largest_poplar(len);
    while len != poplar_size {
        len -= poplar_size;
        poplar_size = largest_poplar(len);
    }
    poplar_size
}

#[inline]
fn is_poplar_size(size: usize) -> bool {
    size.checked_add(1).map_or(true, usize::is_power_of_two)
}

/// Restores the poplar property over `v`, one whole poplar whose two child
/// poplars are valid and whose root may be out of place.
pub(crate) fn sift<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let mut size = v.len();
    debug_assert!(is_poplar_size(size));
    if size < 2 {
        return;
    }

    let mut root = size - 1;
    let mut child_root1 = root - 1;
    let mut child_root2 = size / 2 - 1;

    loop {
        // Ties keep the candidate already chosen.
        let mut max_root = root;
        if is_less(&v[max_root], &v[child_root1]) {
            max_root = child_root1;
        }
        if is_less(&v[max_root], &v[child_root2]) {
            max_root = child_root2;
        }
        if max_root == root {
            return;
        }

        v.swap(root, max_root);

        size /= 2;
        if size < 2 {
            return;
        }

        root = max_root;
        child_root1 = root - 1;
        child_root2 = root - (size - size / 2);
    }
}

/// Turns `v`, whose length is a poplar size, into a single poplar.
///
/// Runs of [`SMALL_POPLAR_SIZE`] are insertion sorted, then pairs of equal
/// poplars are fused through the element that follows them. The fusing
/// follows the binary carry sequence of the chunk counter, which keeps the
/// whole build linear.
pub(crate) fn make_poplar<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    debug_assert!(is_poplar_size(size));
    if size <= SMALL_POPLAR_SIZE {
        insertion_sort(v, is_less);
        return;
    }

    let mut level: usize = 1;
    let mut start = 0;
    let mut next = SMALL_POPLAR_SIZE;
    loop {
        insertion_sort(&mut v[start..next], is_less);

        let mut poplar_size = SMALL_POPLAR_SIZE;
        let mut begin = start;
        let mut carry = (level & level.wrapping_neg()) >> 1;
        while carry != 0 {
            begin -= poplar_size;
            poplar_size = 2 * poplar_size + 1;
            sift(&mut v[begin..begin + poplar_size], is_less);
            next += 1;
            carry >>= 1;
        }

        if next == size {
            return;
        }
        start = next;
        next += SMALL_POPLAR_SIZE;
        level += 1;
    }
}

/// Builds a forest over the whole of `v`.
pub(crate) fn make_forest<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let mut poplar_size = largest_poplar(len);
    let mut start = 0;
    while poplar_size >= SMALL_POPLAR_SIZE {
        if len - start >= poplar_size {
            make_poplar(&mut v[start..start + poplar_size], is_less);
            start += poplar_size;
        } else {
            poplar_size /= 2;
        }
    }

    // Less than one small poplar is left; sorted, it is a forest of its own.
    insertion_sort(&mut v[start..], is_less);
}

/// Fixes the forest after `v[len - 1]` was appended to a forest over
/// `v[..len - 1]`.
pub(crate) fn push_forest<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }
    let poplar_size = last_poplar(len);
    sift(&mut v[len - poplar_size..], is_less);
}

/// Moves the greatest element of the forest `v` to its last position and
/// leaves a forest over `v[..len - 1]`.
pub(crate) fn pop_forest<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let last_root = len - 1;
    let mut poplar_size = largest_poplar(len);
    let mut bigger = last_root;
    let mut bigger_size = poplar_size;

    // The maximum is one of the poplar roots.
    let mut start = 0;
    loop {
        if len - start >= poplar_size {
            let root = start + poplar_size - 1;
            if root == last_root {
                break;
            }
            if is_less(&v[bigger], &v[root]) {
                bigger = root;
                bigger_size = poplar_size;
            }
            start = root + 1;
        } else {
            poplar_size /= 2;
        }
    }

    if bigger != last_root {
        v.swap(bigger, last_root);
        sift(&mut v[bigger + 1 - bigger_size..=bigger], is_less);
    }
}

/// Returns the length of the longest prefix of `v` that is a forest.
///
/// Positions are visited in the order a poplar would be built one element at
/// a time: each position is either a new leaf or the root fusing the two
/// poplars before it, following the binary carry sequence of the leaf count.
pub(crate) fn forest_until<T, F>(v: &[T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return len;
    }

    // v[0] is the first leaf.
    let mut level: usize = 1;
    let mut next = 1;
    loop {
        let mut poplar_size = 1;
        let mut carry = (level & level.wrapping_neg()) >> 1;
        while carry != 0 {
            if next == len {
                return len;
            }
            poplar_size = 2 * poplar_size + 1;
            let root = next;
            let first = root + 1 - poplar_size;
            if is_less(&v[root], &v[root - 1])
                || is_less(&v[root], &v[first + poplar_size / 2 - 1])
            {
                return root;
            }
            next += 1;
            carry >>= 1;
        }

        if next == len {
            return len;
        }
        next += 1;
        level += 1;
    }
}
