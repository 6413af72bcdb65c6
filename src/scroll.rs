// Scroll trigger: turns "viewport reached the bottom" into a reveal request

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::{config::TriggerMode, error::Result, listing::HotelListing, pagination::RevealOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl Viewport {
    pub fn is_near_bottom(&self, threshold_px: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.content_height - threshold_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    mode: TriggerMode,
    threshold_px: f64,
}

impl ScrollTrigger {
    pub fn new(mode: TriggerMode, threshold_px: f64) -> Self {
        Self {
            mode,
            threshold_px: threshold_px.max(0.0),
        }
    }

    pub fn for_listing(listing: &HotelListing) -> Self {
        let config = listing.config();
        Self::new(config.trigger_mode, config.scroll_threshold_px)
    }

    // No debouncing: every detection during a load is dropped by the loading guard
    pub fn on_scroll(
        &self,
        listing: &HotelListing,
        viewport: Viewport,
    ) -> Result<Option<JoinHandle<RevealOutcome>>> {
        if self.mode != TriggerMode::InfiniteScroll {
            return Ok(None);
        }

        if !viewport.is_near_bottom(self.threshold_px) {
            return Ok(None);
        }

        if listing.is_loading() {
            trace!(?viewport, "bottom reached while loading");
            return Ok(None);
        }

        trace!(?viewport, "bottom reached, requesting next page");
        listing.load_more()
    }
}
