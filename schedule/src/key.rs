use alloc::vec::Vec;

use ftpad_symmetric::{Permutation, RoundPermutation};

use crate::{
    ByteOrder, KEY_BYTES, NUM_STEPS, PermutationVector, RoundTable, ScheduleResult, WORD_BYTES,
    key_words,
};

/// The byte-permutation layer of the round function, applied to a 32-byte key.
///
/// Round `i` rearranges the key through row `i` of a [`RoundTable`]. Running all rounds through
/// [`ftpad_symmetric::Permutation`] permutes the key by every row in turn.
#[derive(Clone, Debug)]
pub struct KeyPermutation {
    table: RoundTable,
    inverse_rows: Vec<PermutationVector>,
}

impl KeyPermutation {
    pub fn new(table: RoundTable) -> Self {
        let inverse_rows = table.rows().iter().map(PermutationVector::inverse).collect();
        Self {
            table,
            inverse_rows,
        }
    }

    pub fn for_byte_order(order: ByteOrder) -> ScheduleResult<Self> {
        RoundTable::derive(order).map(Self::new)
    }

    /// The permutation using the table for the compilation target's byte order.
    pub fn native() -> ScheduleResult<Self> {
        RoundTable::native().map(Self::new)
    }

    #[must_use]
    pub const fn table(&self) -> &RoundTable {
        &self.table
    }

    /// Runs every round over `key` and reads the result as words in the table's byte order.
    #[must_use]
    pub fn permute_to_words(&self, key: [u8; KEY_BYTES]) -> [u32; KEY_BYTES / WORD_BYTES] {
        key_words(&self.permute(key), self.table.order())
    }
}

impl RoundPermutation<[u8; KEY_BYTES]> for KeyPermutation {
    const NUM_ROUNDS: usize = NUM_STEPS;

    fn permute_round_mut(&self, input: &mut [u8; KEY_BYTES], round: usize) {
        *input = self.table.row(round).apply(input);
    }

    fn invert_round_mut(&self, input: &mut [u8; KEY_BYTES], round: usize) {
        *input = self.inverse_rows[round].apply(input);
    }
}
