// Page-level listing state: records, active criteria and the pagination controller.
// Reveals complete on the tokio runtime after the configured load delay.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    config::ListingConfig,
    dummy_data::{generate_hotels, HotelRecord},
    error::{ListingError, Result},
    filter::{filter_hotels, parse_bound, BoundField, BoundsMode, FilterCriteria, SortBy},
    pagination::{Paginator, PendingReveal, RevealOutcome},
    render::PageView,
};

#[derive(Debug)]
struct ListingState {
    criteria: FilterCriteria,
    paginator: Paginator,
}

// Point-in-time copy of the listing state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSnapshot {
    pub criteria: FilterCriteria,
    pub filtered: Vec<HotelRecord>,
    pub visible: Vec<HotelRecord>,
    pub page_index: usize,
    pub loading: bool,
    pub has_more: bool,
    pub generation: u64,
}

pub struct HotelListing {
    config: ListingConfig,
    records: Arc<[HotelRecord]>,
    state: Arc<Mutex<ListingState>>,
}

// Criteria a fresh or cleared page starts from
pub fn initial_criteria(mode: &BoundsMode) -> FilterCriteria {
    FilterCriteria {
        min_price: mode.default_for(BoundField::MinPrice),
        max_price: mode.default_for(BoundField::MaxPrice),
        min_rating: mode.default_for(BoundField::MinRating),
        sort_by: SortBy::default(),
    }
}

impl HotelListing {
    pub fn new(config: ListingConfig) -> Result<Self> {
        config.validate()?;
        let records = generate_hotels(config.record_count, config.seed);
        Ok(Self::build(config, records))
    }

    // Listing over a caller-supplied record set
    pub fn with_records(config: ListingConfig, records: Vec<HotelRecord>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, records))
    }

    fn build(config: ListingConfig, records: Vec<HotelRecord>) -> Self {
        let records: Arc<[HotelRecord]> = records.into();
        let criteria = initial_criteria(&config.bounds_mode);
        let filtered = filter_hotels(&records, &criteria, &config.bounds_mode);
        let paginator = Paginator::new(filtered, config.page_size, config.stale_load_policy);

        debug!(
            records = records.len(),
            visible = paginator.visible().len(),
            "listing initialised"
        );

        Self {
            config,
            records,
            state: Arc::new(Mutex::new(ListingState {
                criteria,
                paginator,
            })),
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn records(&self) -> &[HotelRecord] {
        &self.records
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state.lock().criteria.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().paginator.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.state.lock().paginator.has_more()
    }

    pub fn visible(&self) -> Vec<HotelRecord> {
        self.state.lock().paginator.visible().to_vec()
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock();
        let paginator = &state.paginator;

        ListingSnapshot {
            criteria: state.criteria.clone(),
            filtered: paginator.filtered().to_vec(),
            visible: paginator.visible().to_vec(),
            page_index: paginator.page_index(),
            loading: paginator.is_loading(),
            has_more: paginator.has_more(),
            generation: paginator.generation(),
        }
    }

    pub fn view(&self) -> PageView {
        PageView::build(&self.snapshot(), &self.config)
    }

    // Replace the criteria, recompute the filtered list and go back to page one
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.update(|current| *current = criteria);
    }

    // Change, refilter and reset under one lock
    pub fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let mut state = self.state.lock();
        change(&mut state.criteria);

        let filtered = filter_hotels(&self.records, &state.criteria, &self.config.bounds_mode);
        debug!(
            criteria = ?state.criteria,
            matched = filtered.len(),
            total = self.records.len(),
            "criteria changed"
        );
        state.paginator.reset(filtered);
    }

    pub fn set_sort_by(&self, sort_by: SortBy) {
        self.update(|criteria| criteria.sort_by = sort_by);
    }

    // Sort-by selector value, e.g. "priceHighToLow"
    pub fn set_sort_key(&self, key: &str) -> Result<()> {
        let sort_by = key.parse()?;
        self.set_sort_by(sort_by);
        Ok(())
    }

    pub fn set_bound_input(&self, field: BoundField, raw: &str) {
        let input = parse_bound(raw);
        let mode = self.config.bounds_mode;
        self.update(|criteria| criteria.apply_input(field, input, &mode));
    }

    pub fn set_min_price_input(&self, raw: &str) {
        self.set_bound_input(BoundField::MinPrice, raw);
    }

    pub fn set_max_price_input(&self, raw: &str) {
        self.set_bound_input(BoundField::MaxPrice, raw);
    }

    pub fn set_min_rating_input(&self, raw: &str) {
        self.set_bound_input(BoundField::MinRating, raw);
    }

    pub fn clear_filters(&self) {
        self.set_criteria(initial_criteria(&self.config.bounds_mode));
    }

    // Manual "load more". Ok(None) while a reveal is already in flight.
    // Needs a tokio runtime; without one nothing changes and NoRuntime is returned.
    pub fn load_more(&self) -> Result<Option<JoinHandle<RevealOutcome>>> {
        let runtime = Handle::try_current().map_err(|err| ListingError::NoRuntime(err.to_string()))?;

        let Some(pending) = self.state.lock().paginator.begin_reveal() else {
            return Ok(None);
        };

        let delay = self.config.load_delay();
        debug!(
            generation = pending.generation(),
            size = pending.len(),
            ?delay,
            "reveal scheduled"
        );

        let reveal = InFlightReveal {
            state: Arc::clone(&self.state),
            pending: Some(pending),
        };

        Ok(Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            reveal.finish()
        })))
    }
}

// A scheduled reveal. Dropped unfinished (runtime shut down, task aborted), it
// hands the controller back to Idle.
struct InFlightReveal {
    state: Arc<Mutex<ListingState>>,
    pending: Option<PendingReveal>,
}

impl InFlightReveal {
    fn finish(mut self) -> RevealOutcome {
        let Some(pending) = self.pending.take() else {
            return RevealOutcome::Discarded;
        };

        let mut state = self.state.lock();
        let outcome = state.paginator.complete(pending);
        info!(
            ?outcome,
            page_index = state.paginator.page_index(),
            "reveal finished"
        );
        outcome
    }
}

impl Drop for InFlightReveal {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let generation = pending.generation();
            if self.state.lock().paginator.abort(pending) {
                warn!(generation, "reveal dropped before completion");
            }
        }
    }
}
