// Synthetic hotel records used to populate the listing page

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// Prices land in [PRICE_FLOOR, PRICE_FLOOR + PRICE_SPREAD)
pub const PRICE_FLOOR: u32 = 50;
pub const PRICE_SPREAD: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotelRecord {
    pub id: u32,
    pub name: String,
    pub rating: u8,
    pub price: u32,
}

impl HotelRecord {
    pub fn new(id: u32, rating: u8, price: u32) -> Self {
        Self {
            id,
            name: format!("Hotel {}", id),
            rating,
            price,
        }
    }
}

// Build `count` records with ids 1..=count. The same seed always yields the same list.
pub fn generate_hotels(count: usize, seed: u64) -> Vec<HotelRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=count as u32)
        .map(|id| {
            let rating = rng.gen_range(MIN_RATING..=MAX_RATING);
            let price = rng.gen_range(PRICE_FLOOR..PRICE_FLOOR + PRICE_SPREAD);
            HotelRecord::new(id, rating, price)
        })
        .collect()
}
