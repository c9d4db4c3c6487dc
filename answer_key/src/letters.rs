use rand::Rng;

use crate::config::Code;

/// Source of the random draws used to pick the answer key's code.
///
/// Implementations must return an index uniformly distributed in `0..bound`.
pub trait LetterSource {
    fn pick(&mut self, bound: usize) -> usize;

    /// Draws one of the five codes.
    fn pick_code(&mut self) -> Code {
        Code::ALL[self.pick(Code::ALL.len()) % Code::ALL.len()]
    }
}

/// Draws from any `rand` generator.
///
/// ```
/// use answer_key::letters::{LetterSource, RandomLetters};
/// use rand::SeedableRng;
///
/// let mut letters = RandomLetters::new(rand::rngs::StdRng::seed_from_u64(7));
/// assert!(letters.pick(5) < 5);
/// ```
pub struct RandomLetters<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomLetters<R> {
    pub fn new(rng: R) -> RandomLetters<R> {
        RandomLetters { rng }
    }
}

impl<R: Rng> LetterSource for RandomLetters<R> {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FixedLetters {
    picks: Vec<usize>,
    pos: usize,
}

impl FixedLetters {
    pub fn new(picks: &[usize]) -> FixedLetters {
        FixedLetters {
            picks: picks.to_vec(),
            pos: 0,
        }
    }

    /// Forces the given codes, in column order.
    pub fn codes(codes: &[Code]) -> FixedLetters {
        let picks: Vec<usize> = codes
            .iter()
            .filter_map(|c| Code::ALL.iter().position(|x| x == c))
            .collect();
        FixedLetters::new(&picks)
    }
}

impl LetterSource for FixedLetters {
    fn pick(&mut self, bound: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let x = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        x % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fixed_letters_cycle() {
        let mut l = FixedLetters::codes(&[Code::D, Code::A]);
        assert_eq!(l.pick_code(), Code::D);
        assert_eq!(l.pick_code(), Code::A);
        assert_eq!(l.pick_code(), Code::D);
    }

    #[test]
    fn seeded_draws_repeat() {
        let mut l1 = RandomLetters::new(StdRng::seed_from_u64(99));
        let mut l2 = RandomLetters::new(StdRng::seed_from_u64(99));
        let s1: Vec<Code> = (0..20).map(|_| l1.pick_code()).collect();
        let s2: Vec<Code> = (0..20).map(|_| l2.pick_code()).collect();
        assert_eq!(s1, s2);
    }

    #[test]
    fn all_codes_reachable() {
        let mut l = RandomLetters::new(StdRng::seed_from_u64(12345));
        let mut seen = [false; 5];
        for _ in 0..500 {
            let c = l.pick_code();
            seen[Code::ALL.iter().position(|x| *x == c).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
