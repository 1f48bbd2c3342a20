//! Random suffix generation for outgoing Message-ID headers.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Length of the random component in generated Message-ID headers.
pub const SUFFIX_LEN: usize = 10;

/// Seed used from boot until the first successful time sync provides a
/// trustworthy one.
const BOOT_SEED: u64 = 1;

/// Draws the random lowercase suffix embedded in Message-ID headers.
///
/// Deliberately non-cryptographic: the suffix only has to keep Message-IDs
/// distinct, not unpredictable. It starts from a fixed seed — before the
/// clock is synchronized there is no entropy worth the name — so suffixes
/// repeat across restarts until [`reseed`] is called with the first
/// synchronized wall-clock time.
///
/// [`reseed`]: MessageIdGenerator::reseed
#[derive(Debug)]
pub struct MessageIdGenerator {
    rng: SmallRng,
}

impl MessageIdGenerator {
    /// Create a generator in its boot state.
    #[must_use]
    pub fn new() -> Self {
        Self::from_seed(BOOT_SEED)
    }

    /// Create a generator from a caller-chosen seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Draw the next suffix: exactly [`SUFFIX_LEN`] characters, each in
    /// `a..=z`.
    pub fn suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| char::from(b'a' + self.rng.gen_range(0..26u8)))
            .collect()
    }
}

impl Default for MessageIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_draw_exactly_ten_characters() {
        let mut generator = MessageIdGenerator::new();
        for _ in 0..100 {
            assert_eq!(generator.suffix().len(), SUFFIX_LEN);
        }
    }

    #[test]
    fn should_only_draw_lowercase_ascii_letters() {
        let mut generator = MessageIdGenerator::new();
        for _ in 0..100 {
            assert!(generator.suffix().chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn should_repeat_the_boot_sequence_across_instances() {
        let mut first = MessageIdGenerator::new();
        let mut second = MessageIdGenerator::new();
        assert_eq!(first.suffix(), second.suffix());
        assert_eq!(first.suffix(), second.suffix());
    }

    #[test]
    fn should_diverge_after_reseed() {
        let mut reseeded = MessageIdGenerator::new();
        let mut boot = MessageIdGenerator::new();
        reseeded.reseed(1_700_000_000);
        assert_ne!(reseeded.suffix(), boot.suffix());
    }

    #[test]
    fn should_produce_identical_sequences_for_identical_seeds() {
        let mut a = MessageIdGenerator::from_seed(42);
        let mut b = MessageIdGenerator::from_seed(42);
        for _ in 0..10 {
            assert_eq!(a.suffix(), b.suffix());
        }
    }
}
