//! Deterministic RNG hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each
//! `(config hash, instance)` pair. Sub-seeds are derived via BLAKE3 hashing,
//! independently of thread scheduling order, so batch results are identical
//! regardless of thread count.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::fingerprint::ConfigHash;

#[derive(Debug, Clone)]
pub struct RngHierarchy {
    master_seed: u64,
}

impl RngHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for one strategy instance.
    ///
    /// Independent of derivation order: seeds for instance 3 are the same
    /// whether or not instances 0..3 were derived first.
    pub fn sub_seed(&self, config: &ConfigHash, instance: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(config.as_bytes());
        hasher.update(&instance.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    pub fn rng_for(&self, config: &ConfigHash, instance: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(config, instance))
    }
}
