/// A permutation in the mathematical sense.
pub trait Permutation<T: Clone>: Clone {
    fn permute(&self, input: T) -> T;

    fn permute_mut(&self, input: &mut T) {
        *input = self.permute(input.clone());
    }
}

/// A permutation built from a fixed number of invertible rounds, applied in order.
///
/// Every round-structured permutation is a [`Permutation`] through the blanket impl below, which
/// runs rounds `0..NUM_ROUNDS`.
pub trait RoundPermutation<T: Clone>: Clone {
    const NUM_ROUNDS: usize;

    /// Applies round `round` to `input` in place.
    fn permute_round_mut(&self, input: &mut T, round: usize);

    /// Undoes round `round`, so that `invert_round_mut` after `permute_round_mut` is the identity.
    fn invert_round_mut(&self, input: &mut T, round: usize);

    /// Applies every round in `rounds`, in ascending order.
    fn permute_rounds_mut(&self, input: &mut T, rounds: core::ops::Range<usize>) {
        for round in rounds {
            self.permute_round_mut(input, round);
        }
    }

    /// Undoes every round in `rounds`, last round first.
    fn invert_rounds_mut(&self, input: &mut T, rounds: core::ops::Range<usize>) {
        for round in rounds.rev() {
            self.invert_round_mut(input, round);
        }
    }
}

impl<T: Clone, P: RoundPermutation<T>> Permutation<T> for P {
    fn permute(&self, mut input: T) -> T {
        self.permute_mut(&mut input);
        input
    }

    fn permute_mut(&self, input: &mut T) {
        self.permute_rounds_mut(input, 0..P::NUM_ROUNDS);
    }
}

/// The inverse of a round-structured permutation: runs the inverted rounds back to front.
#[derive(Clone, Debug)]
pub struct Inverse<P>(pub P);

impl<T: Clone, P: RoundPermutation<T>> RoundPermutation<T> for Inverse<P> {
    const NUM_ROUNDS: usize = P::NUM_ROUNDS;

    fn permute_round_mut(&self, input: &mut T, round: usize) {
        self.0.invert_round_mut(input, P::NUM_ROUNDS - 1 - round);
    }

    fn invert_round_mut(&self, input: &mut T, round: usize) {
        self.0.permute_round_mut(input, P::NUM_ROUNDS - 1 - round);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rotates a 4-element array left by `round + 1` positions in each round.
    #[derive(Clone)]
    struct Rotations;

    impl RoundPermutation<[u8; 4]> for Rotations {
        const NUM_ROUNDS: usize = 3;

        fn permute_round_mut(&self, input: &mut [u8; 4], round: usize) {
            input.rotate_left(round + 1);
        }

        fn invert_round_mut(&self, input: &mut [u8; 4], round: usize) {
            input.rotate_right(round + 1);
        }
    }

    #[test]
    fn test_blanket_permutation_runs_all_rounds() {
        // 1 + 2 + 3 = 6 = 2 mod 4.
        assert_eq!(Rotations.permute([0, 1, 2, 3]), [2, 3, 0, 1]);
    }

    #[test]
    fn test_inverse_undoes_permutation() {
        let input = [10, 20, 30, 40];
        let permuted = Rotations.permute(input);
        assert_eq!(Inverse(Rotations).permute(permuted), input);
    }

    #[test]
    fn test_partial_rounds() {
        let mut state = [0, 1, 2, 3];
        Rotations.permute_rounds_mut(&mut state, 0..2);
        assert_eq!(state, [3, 0, 1, 2]);
        Rotations.invert_rounds_mut(&mut state, 0..2);
        assert_eq!(state, [0, 1, 2, 3]);
    }
}
