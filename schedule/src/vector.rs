use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use ftpad_util::{indices_arr, invert_indices};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{KEY_BYTES, PermutationError};

/// A bijection on `0..N`: entry `j` names the original position that now occupies slot `j`.
///
/// Vectors are immutable once built; every transformation returns a fresh vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct PermutationVector<const N: usize = KEY_BYTES>([usize; N]);

/// The permutation mapping one schedule vector onto the next.
pub type InverseMatrix<const N: usize = KEY_BYTES> = PermutationVector<N>;

impl<const N: usize> PermutationVector<N> {
    /// Checks that `values` is a bijection on `0..N`.
    pub fn new(values: [usize; N]) -> Result<Self, PermutationError> {
        let mut first_seen = [None; N];
        for (position, &value) in values.iter().enumerate() {
            let slot = first_seen
                .get_mut(value)
                .ok_or(PermutationError::OutOfRange {
                    position,
                    value,
                    size: N,
                })?;
            if let Some(first) = *slot {
                return Err(PermutationError::Duplicate {
                    value,
                    first,
                    second: position,
                });
            }
            *slot = Some(position);
        }
        // N distinct values below N: every index is present.
        Ok(Self(values))
    }

    pub fn from_slice(values: &[usize]) -> Result<Self, PermutationError> {
        let array: [usize; N] = values
            .try_into()
            .map_err(|_| PermutationError::WrongLength {
                expected: N,
                actual: values.len(),
            })?;
        Self::new(array)
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self(indices_arr::<N>())
    }

    #[must_use]
    pub const fn as_array(&self) -> &[usize; N] {
        &self.0
    }

    #[must_use]
    pub const fn into_array(self) -> [usize; N] {
        self.0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Returns the slot holding `value`, if any.
    #[must_use]
    pub fn position_of(&self, value: usize) -> Option<usize> {
        self.0.iter().position(|&v| v == value)
    }

    /// Gathers `input` through this permutation: `out[j] = input[self[j]]`.
    #[must_use]
    pub fn apply<T: Copy>(&self, input: &[T; N]) -> [T; N] {
        core::array::from_fn(|j| input[self.0[j]])
    }

    /// Gathers another vector through this permutation.
    ///
    /// A composition of bijections is a bijection, so no re-validation is needed.
    #[must_use]
    pub fn permute(&self, other: &Self) -> Self {
        Self(self.apply(&other.0))
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        match invert_indices(&self.0) {
            Some(inverse) => Self(inverse),
            None => unreachable!("permutation vectors are always bijections"),
        }
    }

    /// Returns a copy with `f` applied to the raw entries.
    ///
    /// `f` must map bijections to bijections; the result is re-checked.
    pub(crate) fn map_entries(
        &self,
        f: impl FnOnce([usize; N]) -> [usize; N],
    ) -> Result<Self, PermutationError> {
        Self::new(f(self.0))
    }
}

impl<const N: usize> Default for PermutationVector<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> Index<usize> for PermutationVector<N> {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.0[index]
    }
}

impl<const N: usize> TryFrom<[usize; N]> for PermutationVector<N> {
    type Error = PermutationError;

    fn try_from(values: [usize; N]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl<const N: usize> TryFrom<Vec<usize>> for PermutationVector<N> {
    type Error = PermutationError;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl<const N: usize> From<PermutationVector<N>> for Vec<usize> {
    fn from(vector: PermutationVector<N>) -> Self {
        vector.0.to_vec()
    }
}

impl<const N: usize> fmt::Debug for PermutationVector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const N: usize> fmt::Display for PermutationVector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}
