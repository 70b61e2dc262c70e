use alloc::vec::Vec;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    ByteOrder, KEY_BYTES, NUM_SPREADS, NUM_STEPS, PermutationError, PermutationVector,
    ROTATIONS_PER_SPREAD, ScheduleError, ScheduleResult, WORD_BYTES, to_other_byte_order,
};

/// Regroups the vector into `WORD_BYTES` lanes by striding over it word by word.
///
/// Lane `l` collects byte `l` of every word: `out[i + l * N / WORD_BYTES] = v[WORD_BYTES * i + l]`.
pub fn spread<const N: usize>(
    vector: &PermutationVector<N>,
) -> Result<PermutationVector<N>, PermutationError> {
    let lane_len = N / WORD_BYTES;
    vector.map_entries(|entries| {
        core::array::from_fn(|j| {
            let (lane, i) = (j / lane_len, j % lane_len);
            entries[WORD_BYTES * i + lane]
        })
    })
}

/// Rotates every word-sized block of the vector left by `shift` positions.
pub fn rotate_blocks<const N: usize>(
    vector: &PermutationVector<N>,
    shift: usize,
) -> Result<PermutationVector<N>, PermutationError> {
    vector.map_entries(|mut entries| {
        entries
            .chunks_exact_mut(WORD_BYTES)
            .for_each(|block| block.rotate_left(shift % WORD_BYTES));
        entries
    })
}

/// The ordered sequence of permutation vectors produced by the generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schedule<const N: usize = KEY_BYTES> {
    order: ByteOrder,
    steps: Vec<PermutationVector<N>>,
}

impl<const N: usize> Schedule<N> {
    /// Builds a schedule from externally supplied steps, checking each of them.
    pub fn from_steps(order: ByteOrder, steps: &[[usize; N]]) -> ScheduleResult<Self> {
        if steps.len() != NUM_STEPS {
            return Err(ScheduleError::WrongStepCount {
                expected: NUM_STEPS,
                actual: steps.len(),
            });
        }
        let steps = steps
            .iter()
            .enumerate()
            .map(|(step, &values)| {
                PermutationVector::new(values)
                    .map_err(|source| ScheduleError::InvariantViolation { step, source })
            })
            .collect::<ScheduleResult<_>>()?;
        Ok(Self { order, steps })
    }

    #[must_use]
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    #[must_use]
    pub fn steps(&self) -> &[PermutationVector<N>] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, step: usize) -> Option<&PermutationVector<N>> {
        self.steps.get(step)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PermutationVector<N>> {
        self.steps.iter()
    }

    /// The same schedule with every step re-expressed in the opposite byte order.
    #[must_use]
    pub fn to_other_byte_order(&self) -> Self {
        Self {
            order: self.order.opposite(),
            steps: self.steps.iter().map(to_other_byte_order).collect(),
        }
    }

    /// Returns the schedule expressed in `order`, converting only if needed.
    #[must_use]
    pub fn in_order(&self, order: ByteOrder) -> Self {
        if self.order == order {
            self.clone()
        } else {
            self.to_other_byte_order()
        }
    }
}

impl<'a, const N: usize> IntoIterator for &'a Schedule<N> {
    type Item = &'a PermutationVector<N>;
    type IntoIter = core::slice::Iter<'a, PermutationVector<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Generates the 16-step schedule over the 32 key bytes.
#[must_use]
pub fn generate_schedule() -> Schedule {
    generate_schedule_for::<KEY_BYTES>()
}

/// Generates the schedule over `N` positions, in big-endian word layout.
///
/// Each spread step regroups the previous round's output; the three rotations that follow all start
/// from that spread, rotating by 1, 2 and 3 positions. The last rotation seeds the next spread.
///
/// # Panics
/// Panics if a produced vector is not a bijection. The steps are fixed reorderings, so this only
/// fires on a bug in the generator.
#[must_use]
#[instrument(name = "generate permutation schedule", skip_all, fields(size = N))]
pub fn generate_schedule_for<const N: usize>() -> Schedule<N> {
    const {
        assert!(N >= WORD_BYTES && N % WORD_BYTES == 0);
    }
    let mut steps = Vec::with_capacity(NUM_STEPS);
    let mut previous = PermutationVector::<N>::identity();

    for _ in 0..NUM_SPREADS {
        let spread_step = emit(&mut steps, spread(&previous));
        for shift in 1..=ROTATIONS_PER_SPREAD {
            previous = emit(&mut steps, rotate_blocks(&spread_step, shift));
        }
    }

    debug_assert_eq!(steps.len(), NUM_STEPS);
    Schedule {
        order: ByteOrder::Big,
        steps,
    }
}

fn emit<const N: usize>(
    steps: &mut Vec<PermutationVector<N>>,
    produced: Result<PermutationVector<N>, PermutationError>,
) -> PermutationVector<N> {
    let step = steps.len();
    match produced {
        Ok(vector) => {
            debug!(step, %vector, "emitted schedule step");
            steps.push(vector);
            vector
        }
        Err(source) => {
            let err = ScheduleError::InvariantViolation { step, source };
            panic!("{err}: {source}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_identity() {
        let spread_step = spread(&PermutationVector::<8>::identity()).unwrap();
        assert_eq!(spread_step.as_array(), &[0, 4, 1, 5, 2, 6, 3, 7]);
    }

    #[test]
    fn test_rotate_blocks() {
        let v = PermutationVector::<8>::identity();
        assert_eq!(
            rotate_blocks(&v, 1).unwrap().as_array(),
            &[1, 2, 3, 0, 5, 6, 7, 4]
        );
        assert_eq!(
            rotate_blocks(&v, 3).unwrap().as_array(),
            &[3, 0, 1, 2, 7, 4, 5, 6]
        );
        assert_eq!(rotate_blocks(&v, 4).unwrap(), v);
    }

    #[test]
    fn test_schedule_shape() {
        let schedule = generate_schedule();
        assert_eq!(schedule.len(), NUM_STEPS);
        assert_eq!(schedule.order(), ByteOrder::Big);
    }

    #[test]
    fn test_every_step_is_a_bijection() {
        for (step, vector) in generate_schedule().iter().enumerate() {
            let mut sorted = vector.into_array();
            sorted.sort_unstable();
            assert_eq!(sorted, ftpad_util::indices_arr::<KEY_BYTES>(), "step {step}");
        }
    }

    #[test]
    fn test_rotations_share_their_spread() {
        let schedule = generate_schedule();
        for round in 0..NUM_SPREADS {
            let base = 4 * round;
            let spread_step = schedule.get(base).unwrap();
            for shift in 1..=ROTATIONS_PER_SPREAD {
                assert_eq!(
                    schedule.get(base + shift).unwrap(),
                    &rotate_blocks(spread_step, shift).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_small_universe() {
        let schedule = generate_schedule_for::<8>();
        assert_eq!(schedule.len(), NUM_STEPS);
        assert_eq!(schedule.get(0).unwrap().as_array(), &[0, 4, 1, 5, 2, 6, 3, 7]);
        assert_eq!(schedule.get(1).unwrap().as_array(), &[4, 1, 5, 0, 6, 3, 7, 2]);
    }

    #[test]
    #[should_panic(expected = "step 3: invariant violation: value 2 occurs at both position 0")]
    fn test_emit_panics_on_broken_step() {
        let mut steps = Vec::new();
        for _ in 0..3 {
            emit(&mut steps, Ok(PermutationVector::<4>::identity()));
        }
        emit(
            &mut steps,
            Err(PermutationError::Duplicate {
                value: 2,
                first: 0,
                second: 3,
            }),
        );
    }

    #[test]
    fn test_from_steps() {
        let generated = generate_schedule();
        let raw = generated.iter().map(|v| v.into_array()).collect::<Vec<_>>();
        assert_eq!(
            Schedule::from_steps(ByteOrder::Big, &raw).unwrap(),
            generated
        );

        assert_eq!(
            Schedule::<KEY_BYTES>::from_steps(ByteOrder::Big, &raw[..3]),
            Err(ScheduleError::WrongStepCount {
                expected: NUM_STEPS,
                actual: 3
            })
        );

        let mut broken = raw.clone();
        broken[6][0] = broken[6][1];
        let err = Schedule::from_steps(ByteOrder::Big, &broken).unwrap_err();
        assert!(matches!(err, ScheduleError::InvariantViolation { step: 6, .. }));
    }

    #[test]
    fn test_schedule_byte_order_round_trip() {
        let schedule = generate_schedule();
        let little = schedule.to_other_byte_order();
        assert_eq!(little.order(), ByteOrder::Little);
        assert_ne!(little.steps(), schedule.steps());
        assert_eq!(little.to_other_byte_order(), schedule);
        assert_eq!(schedule.in_order(ByteOrder::Little), little);
        assert_eq!(schedule.in_order(ByteOrder::Big), schedule);
    }
}
