use alloc::vec::Vec;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::{
    ByteOrder, InverseMatrix, KEY_BYTES, LookupError, PermutationVector, Schedule, ScheduleError,
    ScheduleResult,
};

/// The identity ordering already split into 4-byte little-endian groups.
///
/// Used as the predecessor of the first schedule step. It is a fixed constant of the round function
/// and is deliberately spelled out rather than computed.
#[rustfmt::skip]
pub const WORD_SPLIT_SEED: [usize; KEY_BYTES] = [
    3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12,
    19, 18, 17, 16, 23, 22, 21, 20, 27, 26, 25, 24, 31, 30, 29, 28,
];

/// [`WORD_SPLIT_SEED`] as a permutation vector.
#[must_use]
pub fn word_split_seed() -> PermutationVector {
    match PermutationVector::new(WORD_SPLIT_SEED) {
        Ok(seed) => seed,
        Err(_) => unreachable!("the word split seed is a bijection"),
    }
}

/// Finds the permutation `M` with `curr[j] == prev[M[j]]` for every `j`.
///
/// Both vectors must be expressed in the same byte order. Since they are bijections over the same
/// universe a lookup cannot miss; see [`extract_inverse_indices`] for unchecked input.
pub fn extract_inverse<const N: usize>(
    prev: &PermutationVector<N>,
    curr: &PermutationVector<N>,
) -> Result<InverseMatrix<N>, LookupError> {
    let matrix = extract_inverse_indices(prev.as_array(), curr.as_array())?;
    match PermutationVector::from_slice(&matrix) {
        Ok(matrix) => Ok(matrix),
        Err(_) => unreachable!("distinct values are found at distinct positions"),
    }
}

/// Like [`extract_inverse`], on raw index sequences that have not been checked to be bijections.
///
/// Fails unless both sequences have the same length and every value of `curr` occurs exactly once
/// in `prev` and once in `curr`. On success the result is a bijection on `0..curr.len()`.
pub fn extract_inverse_indices(prev: &[usize], curr: &[usize]) -> Result<Vec<usize>, LookupError> {
    if prev.len() != curr.len() {
        return Err(LookupError::LengthMismatch {
            previous: prev.len(),
            current: curr.len(),
        });
    }
    curr.iter()
        .enumerate()
        .map(|(position, &value)| -> Result<usize, LookupError> {
            if let Some(first) = curr[..position].iter().position(|&v| v == value) {
                return Err(LookupError::Repeated {
                    value,
                    first,
                    second: position,
                });
            }
            let mut matches = prev.iter().positions(|&v| v == value);
            let first = matches
                .next()
                .ok_or(LookupError::Missing { position, value })?;
            match matches.next() {
                Some(second) => Err(LookupError::Ambiguous {
                    value,
                    first,
                    second,
                }),
                None => Ok(first),
            }
        })
        .collect()
}

/// Extracts the per-step matrices of a schedule, expressed in `order`.
///
/// Step 0 is related to `seed`, every later step to the step before it.
#[instrument(name = "extract inverse chain", skip_all, fields(order = %order))]
pub fn inverse_chain<const N: usize>(
    schedule: &Schedule<N>,
    order: ByteOrder,
    seed: &PermutationVector<N>,
) -> ScheduleResult<Vec<InverseMatrix<N>>> {
    let schedule = schedule.in_order(order);
    core::iter::once(seed)
        .chain(schedule.iter())
        .zip(schedule.iter())
        .enumerate()
        .map(|(step, (prev, curr))| -> ScheduleResult<InverseMatrix<N>> {
            let matrix = extract_inverse(prev, curr)
                .map_err(|source| ScheduleError::Lookup { step, source })?;
            debug!(step, %matrix, "extracted step matrix");
            Ok(matrix)
        })
        .collect()
}

/// Replays a chain of matrices from `seed`, giving back the schedule steps it was extracted from.
pub fn replay_chain<const N: usize>(
    seed: &PermutationVector<N>,
    matrices: &[InverseMatrix<N>],
) -> Vec<PermutationVector<N>> {
    matrices
        .iter()
        .scan(*seed, |prev, matrix| {
            *prev = matrix.permute(prev);
            Some(*prev)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_STEPS, generate_schedule, to_other_byte_order};

    #[test]
    fn test_seed_is_reversed_identity() {
        assert_eq!(
            word_split_seed(),
            to_other_byte_order(&PermutationVector::identity())
        );
    }

    #[test]
    fn test_extract_inverse_small() {
        let prev = PermutationVector::new([2, 0, 1]).unwrap();
        let curr = PermutationVector::new([0, 1, 2]).unwrap();
        let matrix = extract_inverse(&prev, &curr).unwrap();
        assert_eq!(matrix.as_array(), &[1, 2, 0]);
        assert_eq!(matrix.apply(prev.as_array()), *curr.as_array());
    }

    #[test]
    fn test_extract_inverse_against_identity() {
        let curr = PermutationVector::new([3, 1, 0, 2]).unwrap();
        assert_eq!(
            extract_inverse(&PermutationVector::identity(), &curr).unwrap(),
            curr
        );
    }

    #[test]
    fn test_extract_inverse_indices_reports_missing_value() {
        assert_eq!(
            extract_inverse_indices(&[0, 1, 2, 3], &[3, 1, 7, 0]),
            Err(LookupError::Missing {
                position: 2,
                value: 7
            })
        );
        assert_eq!(
            extract_inverse_indices(&[4, 5, 6], &[6, 4, 5]),
            Ok(alloc::vec![2, 0, 1])
        );
    }

    #[test]
    fn test_extract_inverse_indices_rejects_length_mismatch() {
        assert_eq!(
            extract_inverse_indices(&[0, 1, 2, 3], &[1, 0]),
            Err(LookupError::LengthMismatch {
                previous: 4,
                current: 2
            })
        );
        assert_eq!(
            extract_inverse_indices(&[6, 4], &[4, 5, 6]),
            Err(LookupError::LengthMismatch {
                previous: 2,
                current: 3
            })
        );
    }

    #[test]
    fn test_extract_inverse_indices_rejects_duplicates() {
        assert_eq!(
            extract_inverse_indices(&[0, 1, 1, 3], &[1, 1, 3, 0]),
            Err(LookupError::Ambiguous {
                value: 1,
                first: 1,
                second: 2
            })
        );
        assert_eq!(
            extract_inverse_indices(&[0, 1, 2, 3], &[2, 0, 2, 3]),
            Err(LookupError::Repeated {
                value: 2,
                first: 0,
                second: 2
            })
        );
    }

    #[test]
    fn test_extract_inverse_seed_golden() {
        let schedule = generate_schedule();
        let matrix = extract_inverse(&word_split_seed(), schedule.get(0).unwrap()).unwrap();
        #[rustfmt::skip]
        let expected = [
            3, 7, 11, 15, 19, 23, 27, 31, 2, 6, 10, 14, 18, 22, 26, 30,
            1, 5, 9, 13, 17, 21, 25, 29, 0, 4, 8, 12, 16, 20, 24, 28,
        ];
        assert_eq!(matrix.as_array(), &expected);
    }

    #[test]
    fn test_chain_reconstructs_each_step() {
        let schedule = generate_schedule();
        let seed = word_split_seed();
        for order in [ByteOrder::Big, ByteOrder::Little] {
            let steps = schedule.in_order(order);
            let matrices = inverse_chain(&schedule, order, &seed).unwrap();
            assert_eq!(matrices.len(), NUM_STEPS);

            let mut prev = &seed;
            for (matrix, curr) in matrices.iter().zip(steps.iter()) {
                assert_eq!(matrix.apply(prev.as_array()), *curr.as_array());
                prev = curr;
            }
            assert_eq!(replay_chain(&seed, &matrices), steps.steps());
        }
    }

    #[test]
    fn test_rotation_steps_are_block_rotations() {
        // Within a round, step k+1 is step k rotated once more inside every block.
        let matrices =
            inverse_chain(&generate_schedule(), ByteOrder::Big, &word_split_seed()).unwrap();
        #[rustfmt::skip]
        let rotate_once = [
            1, 2, 3, 0, 5, 6, 7, 4, 9, 10, 11, 8, 13, 14, 15, 12,
            17, 18, 19, 16, 21, 22, 23, 20, 25, 26, 27, 24, 29, 30, 31, 28,
        ];
        for step in [1, 2, 3, 5, 6, 7, 9, 10, 11, 13, 14, 15] {
            assert_eq!(matrices[step].as_array(), &rotate_once, "step {step}");
        }
    }
}
