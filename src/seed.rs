//! Synthetic data for empty stores.

use crate::error::Result;
use crate::store::Store;
use crate::types::Person;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Number of persons seeded by default.
pub const DEFAULT_SEED_COUNT: usize = 100;

const FIRSTNAMES: &[&str] = &[
    "John", "Emma", "Michael", "Sophia", "William", "Olivia", "James", "Ava", "Alexander",
    "Isabella", "Ethan", "Mia", "Daniel", "Charlotte", "Matthew", "Amelia", "Benjamin", "Harper",
    "Joseph", "Evelyn", "Andrew", "Abigail", "David", "Emily", "Christopher",
];

const LASTNAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Wilson", "Anderson", "Taylor", "Thomas", "Jackson", "White", "Harris", "Clark",
    "Lewis", "Robinson", "Walker", "Hall", "Young", "Allen",
];

const CITIES: &[&str] = &[
    "London", "Paris", "New York", "Tokyo", "Berlin", "Sydney", "Los Angeles", "Toronto",
    "Madrid", "Rome", "Moscow", "Beijing", "Dubai", "Singapore", "Hong Kong", "Mumbai",
    "Rio de Janeiro", "Cape Town", "Bangkok", "Seoul", "Amsterdam", "Stockholm", "Oslo",
    "Helsinki", "Vienna",
];

const COUNTRIES: &[&str] = &[
    "UK", "France", "USA", "Japan", "Germany", "Australia", "Canada", "Spain", "Italy", "Russia",
    "China", "UAE", "Singapore", "Hong Kong", "India", "Brazil", "South Africa", "Thailand",
    "South Korea", "Netherlands", "Sweden", "Norway", "Finland", "Austria",
];

fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

/// Generate `count` unpersisted persons drawn from the name and place pools.
pub fn generate_people<R: Rng>(count: usize, rng: &mut R) -> Vec<Person> {
    (0..count)
        .map(|_| {
            let firstname = pick(rng, FIRSTNAMES);
            let lastname = pick(rng, LASTNAMES);
            let city = pick(rng, CITIES);
            let country = pick(rng, COUNTRIES);
            Person::new(firstname, lastname).with_location(city, country)
        })
        .collect()
}

/// Populates empty stores with synthetic persons.
#[derive(Clone, Debug)]
pub struct Seeder {
    count: usize,
    seed: Option<u64>,
}

impl Default for Seeder {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_COUNT)
    }
}

impl Seeder {
    /// Seeder writing `count` persons, randomized per process.
    pub fn new(count: usize) -> Self {
        Self { count, seed: None }
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed `store` if it holds no persons. Returns how many were written.
    ///
    /// A non-empty store is left untouched.
    pub fn seed_if_empty(&self, store: &Store) -> Result<usize> {
        if !store.is_empty()? {
            return Ok(0);
        }

        info!(count = self.count, mode = %store.mode(), "store is empty, seeding");

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for person in generate_people(self.count, &mut rng) {
            store.create(person)?;
        }
        Ok(self.count)
    }
}
