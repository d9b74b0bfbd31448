use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::models::greeting::GreetingResponse;

pub const NAMES: [&str; 10] = [
    "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank", "Grace", "Henry", "Ivy", "Jack",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Picks greeting names. The generator is injected so tests can seed it.
pub struct Greeter {
    rng: Mutex<StdRng>,
}

impl Greeter {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn greet(&self) -> GreetingResponse {
        self.greet_at(Local::now().naive_local())
    }

    pub fn greet_at(&self, now: NaiveDateTime) -> GreetingResponse {
        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.random_range(0..NAMES.len())
        };
        GreetingResponse {
            name: NAMES[index].to_string(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new()
    }
}
