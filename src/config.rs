// Listing configuration
// Everything the page used to hard-code, loadable from JSON.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::{ListingError, Result},
    filter::BoundsMode,
    pagination::{StaleLoadPolicy, DEFAULT_PAGE_SIZE},
};

// How reveal requests reach the pagination controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    // "Load More" button
    #[default]
    Manual,
    InfiniteScroll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub record_count: usize,
    pub seed: u64,
    pub page_size: usize,
    pub load_delay_ms: u64,
    pub featured_count: usize,
    pub scroll_threshold_px: f64,
    pub bounds_mode: BoundsMode,
    pub trigger_mode: TriggerMode,
    pub stale_load_policy: StaleLoadPolicy,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            record_count: 100,
            seed: 0x5eed,
            page_size: DEFAULT_PAGE_SIZE,
            load_delay_ms: 1000,
            featured_count: 3,
            scroll_threshold_px: 0.0,
            bounds_mode: BoundsMode::default(),
            trigger_mode: TriggerMode::default(),
            stale_load_policy: StaleLoadPolicy::default(),
        }
    }
}

impl ListingConfig {
    // Refined page: optional bounds and infinite scroll
    pub fn infinite_scroll() -> Self {
        Self {
            bounds_mode: BoundsMode::Optional,
            trigger_mode: TriggerMode::InfiniteScroll,
            ..Default::default()
        }
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ListingError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }

        if !self.scroll_threshold_px.is_finite() || self.scroll_threshold_px < 0.0 {
            return Err(ListingError::InvalidConfig(format!(
                "scroll_threshold_px must be a non-negative number, got {}",
                self.scroll_threshold_px
            )));
        }

        if let BoundsMode::Defaults {
            min_price,
            max_price,
            min_rating,
        } = self.bounds_mode
        {
            if !(min_price.is_finite() && max_price.is_finite() && min_rating.is_finite()) {
                return Err(ListingError::InvalidConfig(
                    "default bounds must be finite".to_string(),
                ));
            }
            if min_price > max_price {
                return Err(ListingError::InvalidConfig(format!(
                    "default min_price {} exceeds max_price {}",
                    min_price, max_price
                )));
            }
        }

        if self.record_count > u32::MAX as usize {
            return Err(ListingError::InvalidConfig(format!(
                "record_count {} does not fit hotel ids",
                self.record_count
            )));
        }

        if self.featured_count > self.page_size {
            warn!(
                featured_count = self.featured_count,
                page_size = self.page_size,
                "featured strip is wider than the first page"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_values() {
        let config = ListingConfig::default();
        assert_eq!(config.record_count, 100);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.load_delay(), Duration::from_secs(1));
        assert_eq!(config.featured_count, 3);
        assert_eq!(config.trigger_mode, TriggerMode::Manual);
        assert_eq!(config.stale_load_policy, StaleLoadPolicy::Discard);
        assert!(matches!(
            config.bounds_mode,
            BoundsMode::Defaults { max_price, .. } if max_price == 500.0
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ListingConfig::from_json_str(
            r#"{
                "seed": 7,
                "load_delay_ms": 250,
                "bounds_mode": { "mode": "optional" },
                "trigger_mode": "infinite_scroll"
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.load_delay_ms, 250);
        assert_eq!(config.bounds_mode, BoundsMode::Optional);
        assert_eq!(config.trigger_mode, TriggerMode::InfiniteScroll);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.record_count, 100);
    }

    #[test]
    fn test_json_round_trip() {
        let config = ListingConfig {
            stale_load_policy: StaleLoadPolicy::Apply,
            ..ListingConfig::infinite_scroll()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(ListingConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let zero_page = ListingConfig::from_json_str(r#"{ "page_size": 0 }"#);
        assert!(matches!(zero_page, Err(ListingError::InvalidConfig(_))));

        let inverted = ListingConfig::from_json_str(
            r#"{ "bounds_mode": { "mode": "defaults", "min_price": 300, "max_price": 100, "min_rating": 0 } }"#,
        );
        assert!(matches!(inverted, Err(ListingError::InvalidConfig(_))));

        let negative = ListingConfig {
            scroll_threshold_px: -5.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let garbage = ListingConfig::from_json_str("{ not json");
        assert!(matches!(garbage, Err(ListingError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("hotel_listing_{}.json", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            write!(file, r#"{{ "record_count": 12, "page_size": 4 }}"#).unwrap();
        }

        let config = ListingConfig::from_json_file(&path).unwrap();
        assert_eq!(config.record_count, 12);
        assert_eq!(config.page_size, 4);

        std::fs::remove_file(&path).unwrap();

        let missing = ListingConfig::from_json_file(&path);
        assert!(matches!(missing, Err(ListingError::Io(_))));
    }
}
