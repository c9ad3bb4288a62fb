//! Short random identifiers for block references.
//!
//! IDs are six characters drawn from 34 symbols: lowercase letters without the
//! easily confused `l` and `o`, plus the ten digits. That gives 34^6 (about
//! 1.5 billion) possible IDs, so a random pick collides with one of `n`
//! existing IDs with probability roughly `n / 1.5e9`. Collisions are still
//! checked against the IDs the caller says are taken before an ID is handed out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Symbols a block reference ID is drawn from.
pub const ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz0123456789";

/// Number of characters in a block reference ID.
pub const ID_LENGTH: usize = 6;

/// Random source for fresh block reference IDs.
pub struct BlockIdGenerator {
    rng: StdRng,
}

impl Default for BlockIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockIdGenerator {
    #[must_use]
    /// Generator seeded from the operating system's entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[must_use]
    /// Deterministic generator, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one ID without any collision check.
    pub fn generate(&mut self) -> String {
        (0..ID_LENGTH)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }

    /// Draw IDs until one is neither `taken` nor already in `allocated`.
    ///
    /// The accepted ID is added to `allocated`, so a batch of calls sharing one
    /// set never hands out the same ID twice.
    pub fn generate_unique(
        &mut self,
        taken: impl Fn(&str) -> bool,
        allocated: &mut HashSet<String>,
    ) -> String {
        loop {
            let id = self.generate();
            if taken(&id) || allocated.contains(&id) {
                tracing::debug!(%id, "block id collision, drawing again");
                continue;
            }
            allocated.insert(id.clone());
            return id;
        }
    }
}

#[must_use]
/// Whether `id` has the shape of a generated block reference.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
#[path = "tests/block_id.rs"]
mod tests;
