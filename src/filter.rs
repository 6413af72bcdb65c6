// Filter/sort engine for the listing page
// A pure function from (all records, criteria) to the ordered list the page shows.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{dummy_data::HotelRecord, error::ListingError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    PriceLowToHigh,
    PriceHighToLow,
    RatingHighToLow,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [
        SortBy::PriceLowToHigh,
        SortBy::PriceHighToLow,
        SortBy::RatingHighToLow,
    ];

    // Key used by the sort-by selector
    pub fn key(&self) -> &'static str {
        match self {
            SortBy::PriceLowToHigh => "priceLowToHigh",
            SortBy::PriceHighToLow => "priceHighToLow",
            SortBy::RatingHighToLow => "ratingHighToLow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::PriceLowToHigh => "Price: Low to High",
            SortBy::PriceHighToLow => "Price: High to Low",
            SortBy::RatingHighToLow => "Rating: High to Low",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortBy {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort_by| sort_by.key() == s.trim())
            .ok_or_else(|| ListingError::UnknownSortKey(s.to_string()))
    }
}

// Active filter/sort configuration. `None` means the bound is unset; what that
// implies is decided by `BoundsMode`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort_by: SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundField {
    MinPrice,
    MaxPrice,
    MinRating,
}

// Raw value of a numeric form field after coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundInput {
    Blank,
    Number(f64),
    Invalid,
}

pub fn parse_bound(raw: &str) -> BoundInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return BoundInput::Blank;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => BoundInput::Number(value),
        _ => BoundInput::Invalid,
    }
}

impl FilterCriteria {
    pub fn bound(&self, field: BoundField) -> Option<f64> {
        match field {
            BoundField::MinPrice => self.min_price,
            BoundField::MaxPrice => self.max_price,
            BoundField::MinRating => self.min_rating,
        }
    }

    fn bound_mut(&mut self, field: BoundField) -> &mut Option<f64> {
        match field {
            BoundField::MinPrice => &mut self.min_price,
            BoundField::MaxPrice => &mut self.max_price,
            BoundField::MinRating => &mut self.min_rating,
        }
    }

    // Store one coerced form value under the given bounds policy.
    // Invalid text in optional mode becomes NaN, which no record satisfies.
    pub fn apply_input(&mut self, field: BoundField, input: BoundInput, mode: &BoundsMode) {
        let value = match (mode, input) {
            (_, BoundInput::Number(value)) => Some(value),
            (BoundsMode::Optional, BoundInput::Blank) => None,
            (BoundsMode::Optional, BoundInput::Invalid) => Some(f64::NAN),
            (BoundsMode::Defaults { .. }, BoundInput::Blank | BoundInput::Invalid) => {
                mode.default_for(field)
            }
        };

        *self.bound_mut(field) = value;
    }
}

// How unset bounds are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BoundsMode {
    // Unset bound means no constraint
    Optional,
    // Unset bound takes a hard default
    Defaults {
        min_price: f64,
        max_price: f64,
        min_rating: f64,
    },
}

impl Default for BoundsMode {
    fn default() -> Self {
        BoundsMode::Defaults {
            min_price: 0.0,
            max_price: 500.0,
            min_rating: 0.0,
        }
    }
}

impl BoundsMode {
    pub fn default_for(&self, field: BoundField) -> Option<f64> {
        match self {
            BoundsMode::Optional => None,
            BoundsMode::Defaults {
                min_price,
                max_price,
                min_rating,
            } => Some(match field {
                BoundField::MinPrice => *min_price,
                BoundField::MaxPrice => *max_price,
                BoundField::MinRating => *min_rating,
            }),
        }
    }

    pub fn resolve(&self, criteria: &FilterCriteria) -> EffectiveBounds {
        let pick = |field| criteria.bound(field).or_else(|| self.default_for(field));

        EffectiveBounds {
            min_price: pick(BoundField::MinPrice),
            max_price: pick(BoundField::MaxPrice),
            min_rating: pick(BoundField::MinRating),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveBounds {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

impl EffectiveBounds {
    pub fn admits(&self, hotel: &HotelRecord) -> bool {
        let price = hotel.price as f64;
        let rating = hotel.rating as f64;

        let min_price_ok = self.min_price.map_or(true, |min| price >= min);
        let max_price_ok = self.max_price.map_or(true, |max| price <= max);
        let rating_ok = self.min_rating.map_or(true, |min| rating >= min);

        min_price_ok && max_price_ok && rating_ok
    }
}

// Stable sort, so ties keep their original relative order
pub fn sort_hotels(hotels: &mut [HotelRecord], sort_by: SortBy) {
    match sort_by {
        SortBy::PriceLowToHigh => hotels.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHighToLow => hotels.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::RatingHighToLow => hotels.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}

pub fn filter_hotels(
    records: &[HotelRecord],
    criteria: &FilterCriteria,
    mode: &BoundsMode,
) -> Vec<HotelRecord> {
    let bounds = mode.resolve(criteria);

    let mut filtered: Vec<HotelRecord> = records
        .iter()
        .filter(|hotel| bounds.admits(hotel))
        .cloned()
        .collect();

    sort_hotels(&mut filtered, criteria.sort_by);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_data::generate_hotels;

    fn is_sorted_by<F>(hotels: &[HotelRecord], in_order: F) -> bool
    where
        F: Fn(&HotelRecord, &HotelRecord) -> bool,
    {
        hotels.windows(2).all(|pair| in_order(&pair[0], &pair[1]))
    }

    #[test]
    fn test_scenario_price_window_and_rating() {
        let hotels = generate_hotels(100, 2024);
        let criteria = FilterCriteria {
            min_price: Some(100.0),
            max_price: Some(150.0),
            min_rating: Some(3.0),
            sort_by: SortBy::PriceHighToLow,
        };

        let filtered = filter_hotels(&hotels, &criteria, &BoundsMode::Optional);

        assert!(!filtered.is_empty());
        for hotel in &filtered {
            assert!(hotel.price >= 100 && hotel.price <= 150);
            assert!(hotel.rating >= 3);
        }
        assert!(is_sorted_by(&filtered, |a, b| a.price >= b.price));

        let expected = hotels
            .iter()
            .filter(|h| h.price >= 100 && h.price <= 150 && h.rating >= 3)
            .count();
        assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn test_blank_fields_in_optional_mode_keep_everything() {
        let hotels = generate_hotels(100, 9);
        let mode = BoundsMode::Optional;
        let mut criteria = FilterCriteria::default();
        criteria.apply_input(BoundField::MinPrice, parse_bound(""), &mode);
        criteria.apply_input(BoundField::MaxPrice, parse_bound("  "), &mode);
        criteria.apply_input(BoundField::MinRating, parse_bound(""), &mode);

        let filtered = filter_hotels(&hotels, &criteria, &mode);

        assert_eq!(filtered.len(), 100);
        assert_eq!(criteria.sort_by, SortBy::PriceLowToHigh);
        assert!(is_sorted_by(&filtered, |a, b| a.price <= b.price));
    }

    #[test]
    fn test_non_numeric_input_excludes_everything() {
        let hotels = generate_hotels(100, 9);
        let mode = BoundsMode::Optional;
        let mut criteria = FilterCriteria::default();
        criteria.apply_input(BoundField::MinPrice, parse_bound("cheap"), &mode);

        assert!(criteria.min_price.map_or(false, f64::is_nan));
        assert!(filter_hotels(&hotels, &criteria, &mode).is_empty());
    }

    #[test]
    fn test_defaults_mode_clamps_blank_and_invalid_input() {
        let mode = BoundsMode::default();
        let mut criteria = FilterCriteria::default();
        criteria.apply_input(BoundField::MaxPrice, parse_bound(""), &mode);
        criteria.apply_input(BoundField::MinRating, parse_bound("abc"), &mode);

        assert_eq!(criteria.max_price, Some(500.0));
        assert_eq!(criteria.min_rating, Some(0.0));
    }

    #[test]
    fn test_defaults_mode_applies_hard_max_price() {
        let hotels = vec![
            HotelRecord::new(1, 4, 120),
            HotelRecord::new(2, 5, 650),
            HotelRecord::new(3, 2, 500),
        ];

        let defaults = filter_hotels(&hotels, &FilterCriteria::default(), &BoundsMode::default());
        let ids: Vec<u32> = defaults.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let optional = filter_hotels(&hotels, &FilterCriteria::default(), &BoundsMode::Optional);
        assert_eq!(optional.len(), 3);
    }

    #[test]
    fn test_every_sort_order() {
        let hotels = generate_hotels(100, 5);

        for sort_by in SortBy::ALL {
            let criteria = FilterCriteria {
                sort_by,
                ..Default::default()
            };
            let filtered = filter_hotels(&hotels, &criteria, &BoundsMode::Optional);
            assert_eq!(filtered.len(), hotels.len());

            let ordered = match sort_by {
                SortBy::PriceLowToHigh => is_sorted_by(&filtered, |a, b| a.price <= b.price),
                SortBy::PriceHighToLow => is_sorted_by(&filtered, |a, b| a.price >= b.price),
                SortBy::RatingHighToLow => is_sorted_by(&filtered, |a, b| a.rating >= b.rating),
            };
            assert!(ordered, "{} produced the wrong order", sort_by);
        }
    }

    #[test]
    fn test_ties_keep_original_order() {
        let hotels = vec![
            HotelRecord::new(1, 3, 100),
            HotelRecord::new(2, 5, 100),
            HotelRecord::new(3, 3, 90),
            HotelRecord::new(4, 5, 100),
        ];

        let criteria = FilterCriteria {
            sort_by: SortBy::RatingHighToLow,
            ..Default::default()
        };
        let by_rating: Vec<u32> = filter_hotels(&hotels, &criteria, &BoundsMode::Optional)
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(by_rating, vec![2, 4, 1, 3]);

        let criteria = FilterCriteria {
            sort_by: SortBy::PriceHighToLow,
            ..Default::default()
        };
        let by_price: Vec<u32> = filter_hotels(&hotels, &criteria, &BoundsMode::Optional)
            .iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(by_price, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let hotels = generate_hotels(100, 77);
        let criteria = FilterCriteria {
            min_price: Some(80.0),
            max_price: None,
            min_rating: Some(2.0),
            sort_by: SortBy::RatingHighToLow,
        };

        let first = filter_hotels(&hotels, &criteria, &BoundsMode::Optional);
        let second = filter_hotels(&hotels, &criteria, &BoundsMode::Optional);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), BoundInput::Blank);
        assert_eq!(parse_bound(" 120 "), BoundInput::Number(120.0));
        assert_eq!(parse_bound("4.5"), BoundInput::Number(4.5));
        assert_eq!(parse_bound("NaN"), BoundInput::Invalid);
        assert_eq!(parse_bound("ten"), BoundInput::Invalid);
        assert_eq!(parse_bound("inf"), BoundInput::Invalid);
        assert_eq!(parse_bound("-Infinity"), BoundInput::Invalid);
        assert_eq!(parse_bound("1e400"), BoundInput::Invalid);
    }

    #[test]
    fn test_sort_key_parsing() {
        for sort_by in SortBy::ALL {
            assert_eq!(sort_by.key().parse::<SortBy>().ok(), Some(sort_by));
        }

        assert!(matches!(
            "cheapest".parse::<SortBy>(),
            Err(ListingError::UnknownSortKey(key)) if key == "cheapest"
        ));
    }
}
