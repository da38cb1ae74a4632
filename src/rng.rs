//! Deterministic random streams
//!
//! Every stream is derived from (master seed, stream name, city name), so a
//! given seed always synthesizes the same layout for the same city regardless
//! of the order in which cities are selected.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const POPULATION_STREAM: &str = "population";
pub const FACILITY_STREAM: &str = "facilities";

#[derive(Debug, Clone, Copy)]
pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn stream(&self, name: &str, city: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.derive_seed(name, city))
    }

    fn derive_seed(&self, name: &str, city: &str) -> u64 {
        let mut seed = self.master_seed;
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed ^= fnv1a(name.as_bytes());
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed ^= fnv1a(city.as_bytes());
        seed
    }
}

impl Default for RngManager {
    fn default() -> Self {
        Self::new(42)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
