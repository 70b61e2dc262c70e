//! Various simple utilities for working with index arrays.

#![no_std]

/// Returns `[0, ..., N - 1]`.
#[must_use]
pub const fn indices_arr<const N: usize>() -> [usize; N] {
    let mut indices_arr = [0; N];
    let mut i = 0;
    while i < N {
        indices_arr[i] = i;
        i += 1;
    }
    indices_arr
}

/// Reverses the order of the elements inside every consecutive chunk of length `CHUNK`.
///
/// Chunk boundaries are left untouched, so applying this twice is the identity.
///
/// # Panics
/// Panics if `vals.len()` is not a multiple of `CHUNK`.
#[inline]
pub fn reverse_within_chunks<T, const CHUNK: usize>(vals: &mut [T]) {
    const {
        assert!(CHUNK > 0);
    }
    assert_eq!(
        vals.len() % CHUNK,
        0,
        "Length {} is not a multiple of the chunk size {CHUNK}",
        vals.len()
    );
    vals.chunks_exact_mut(CHUNK).for_each(<[T]>::reverse);
}

/// Returns the inverse of `indices`, i.e. `inv` with `inv[indices[j]] == j` for all `j`.
///
/// Returns `None` if `indices` is not a bijection on `0..N`.
#[must_use]
pub fn invert_indices<const N: usize>(indices: &[usize; N]) -> Option<[usize; N]> {
    // `N` marks an unfilled slot, no valid index can take that value.
    let mut inverse = [N; N];
    for (j, &idx) in indices.iter().enumerate() {
        let slot = inverse.get_mut(idx)?;
        if *slot != N {
            return None;
        }
        *slot = j;
    }
    Some(inverse)
}
