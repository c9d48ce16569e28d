//! Randomised test ordering.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Permute `names` in place using `rng`.
///
/// The multiset of entries is unchanged; only the order moves.
pub fn shuffle_names<T, R: Rng + ?Sized>(names: &mut [T], rng: &mut R) {
    names.shuffle(rng);
}

/// Random source seeded from the wall clock.
///
/// The seed cannot be pinned, so shuffled runs are not reproducible.
#[must_use]
pub fn time_seeded_rng() -> StdRng {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seed = elapsed.as_secs() ^ u64::from(elapsed.subsec_nanos()).rotate_left(32);
    StdRng::seed_from_u64(seed)
}
