use alloc::vec::Vec;

use serde::Serialize;
use tracing::instrument;

use crate::{
    ByteOrder, KEY_BYTES, NUM_STEPS, PermutationVector, Schedule, ScheduleError, ScheduleResult,
    extract_inverse, generate_schedule, to_other_byte_order, word_split_seed,
};

/// The per-round byte permutations consumed by the round function, for one byte order.
///
/// Round `i` maps a key to `key'[j] = key[rows[i][j]]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundTable {
    order: ByteOrder,
    rows: Vec<PermutationVector>,
}

impl RoundTable {
    /// Derives the table for `order` from the generated schedule.
    ///
    /// The big-endian table is the schedule itself. Little-endian rows are the schedule steps moved
    /// to the little-endian layout and expressed relative to [`word_split_seed`].
    #[instrument(name = "derive round table", skip_all, fields(order = %order))]
    pub fn derive(order: ByteOrder) -> ScheduleResult<Self> {
        Self::from_schedule(&generate_schedule(), order)
    }

    /// Derives the table for `order` from a big-endian `schedule`.
    pub fn from_schedule(schedule: &Schedule, order: ByteOrder) -> ScheduleResult<Self> {
        let schedule = schedule.in_order(ByteOrder::Big);
        let rows = match order {
            ByteOrder::Big => schedule.steps().to_vec(),
            ByteOrder::Little => {
                let seed = word_split_seed();
                schedule
                    .iter()
                    .enumerate()
                    .map(|(step, vector)| {
                        extract_inverse(&seed, &to_other_byte_order(vector))
                            .map_err(|source| ScheduleError::Lookup { step, source })
                    })
                    .collect::<ScheduleResult<Vec<_>>>()?
            }
        };
        Ok(Self { order, rows })
    }

    /// The table for the byte order of the compilation target.
    pub fn native() -> ScheduleResult<Self> {
        Self::derive(ByteOrder::native())
    }

    #[must_use]
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    #[must_use]
    pub fn rows(&self) -> &[PermutationVector] {
        &self.rows
    }

    /// The permutation used in round `round`.
    ///
    /// # Panics
    /// Panics if `round >= NUM_STEPS`.
    #[must_use]
    pub fn row(&self, round: usize) -> &PermutationVector {
        &self.rows[round]
    }

    /// The table as plain byte indices.
    #[must_use]
    pub fn to_bytes(&self) -> [[u8; KEY_BYTES]; NUM_STEPS] {
        // Indices are below `KEY_BYTES`, so they always fit in a byte.
        core::array::from_fn(|round| self.rows[round].into_array().map(|idx| idx as u8))
    }
}
