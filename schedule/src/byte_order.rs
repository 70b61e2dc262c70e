use core::fmt;

use ftpad_util::reverse_within_chunks;
use serde::{Deserialize, Serialize};

use crate::{KEY_BYTES, PermutationVector, WORD_BYTES};

/// Which byte of a 4-byte word is stored first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// The byte order of the compilation target.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Big => Self::Little,
            Self::Little => Self::Big,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Big => f.write_str("big-endian"),
            Self::Little => f.write_str("little-endian"),
        }
    }
}

/// Re-expresses `vector` in the other word layout by reversing each 4-element group.
///
/// This is an involution: applying it twice returns the original vector.
///
/// # Panics
/// Panics at compile time if `N` is not a multiple of the word size.
#[must_use]
pub fn to_other_byte_order<const N: usize>(vector: &PermutationVector<N>) -> PermutationVector<N> {
    const {
        assert!(N % WORD_BYTES == 0);
    }
    let reversed = vector.map_entries(|mut entries| {
        reverse_within_chunks::<_, WORD_BYTES>(&mut entries);
        entries
    });
    match reversed {
        Ok(vector) => vector,
        Err(_) => unreachable!("reordering entries keeps the vector a bijection"),
    }
}

/// Reads a key as eight 32-bit words in the given byte order.
#[must_use]
pub fn key_words(key: &[u8; KEY_BYTES], order: ByteOrder) -> [u32; KEY_BYTES / WORD_BYTES] {
    core::array::from_fn(|i| {
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&key[i * WORD_BYTES..(i + 1) * WORD_BYTES]);
        match order {
            ByteOrder::Big => u32::from_be_bytes(word),
            ByteOrder::Little => u32::from_le_bytes(word),
        }
    })
}
