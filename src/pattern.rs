//! Pattern generator and its random source.

use crate::flower::Flower;
use crate::progression::LengthRange;

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, good enough for picking flowers.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from platform entropy (crypto.getRandomValues in the browser).
    #[cfg(feature = "rng")]
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::new(u64::from_le_bytes(buf)),
            Err(err) => {
                log::warn!("entropy unavailable ({err}); using fixed seed");
                Self::new(FALLBACK_SEED)
            }
        }
    }

    #[cfg(not(feature = "rng"))]
    pub fn from_entropy() -> Self {
        log::warn!("built without `rng` feature; using fixed seed");
        Self::new(FALLBACK_SEED)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random number in [0, upper_bound). Returns 0 for an empty range.
    pub fn below(&mut self, upper_bound: usize) -> usize {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as usize
    }

    /// Random number in [range.min, range.max].
    pub fn within(&mut self, range: LengthRange) -> usize {
        range.min + self.below(range.max - range.min + 1)
    }
}

const FALLBACK_SEED: u64 = 0x5EED_F10E_4A11_0001;

/// Draw a new target pattern: length uniform over `range`, each flower uniform over `unlocked`.
pub fn generate(range: LengthRange, unlocked: &[Flower], rng: &mut Rng) -> Vec<Flower> {
    if unlocked.is_empty() {
        return Vec::new();
    }
    let len = rng.within(range);
    (0..len).map(|_| unlocked[rng.below(unlocked.len())]).collect()
}
