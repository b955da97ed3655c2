#![allow(dead_code)]

use parcel_core::Parcel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const TEST_CREATED_AT: &str = "2024-01-01T00:00:00Z";

/// Hands out client ids that are unique within one generator.
pub trait ClientIdSource {
    fn next_client(&mut self) -> i64;
}

pub struct RandomClientIds {
    rng: StdRng,
    issued: HashSet<i64>,
}

impl RandomClientIds {
    pub fn from_os() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: HashSet::new(),
        }
    }
}

impl ClientIdSource for RandomClientIds {
    fn next_client(&mut self) -> i64 {
        loop {
            let candidate = self.rng.random_range(1..10_000_000);
            if self.issued.insert(candidate) {
                return candidate;
            }
        }
    }
}

pub fn test_parcel(client: i64) -> Parcel {
    Parcel::with_created_at(client, "test", TEST_CREATED_AT)
}
