// Pagination controller: grows the visible slice of the filtered list one page at a time

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dummy_data::HotelRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

// What to do with a reveal that completes after the list was reset underneath it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleLoadPolicy {
    // Reset cancels the in-flight reveal; its completion is ignored
    #[default]
    Discard,
    // The completion still appends the slice captured when it started
    Apply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Loading { generation: u64 },
}

// Handed out by `begin_reveal` and consumed by `complete`
#[derive(Debug)]
pub struct PendingReveal {
    generation: u64,
    captured: Vec<HotelRecord>,
}

impl PendingReveal {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.captured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Appended { added: usize, visible: usize },
    // Every filtered record is already visible
    Exhausted,
    // Completion belonged to a list that has since been reset
    Discarded,
}

#[derive(Debug)]
pub struct Paginator {
    page_size: usize,
    policy: StaleLoadPolicy,
    filtered: Vec<HotelRecord>,
    visible: Vec<HotelRecord>,
    page_index: usize,
    generation: u64,
    state: State,
}

impl Paginator {
    pub fn new(filtered: Vec<HotelRecord>, page_size: usize, policy: StaleLoadPolicy) -> Self {
        let mut paginator = Self {
            page_size: page_size.max(1),
            policy,
            filtered: Vec::new(),
            visible: Vec::new(),
            page_index: 0,
            generation: 0,
            state: State::Idle,
        };
        paginator.show_first_page(filtered);
        paginator
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn policy(&self) -> StaleLoadPolicy {
        self.policy
    }

    pub fn filtered(&self) -> &[HotelRecord] {
        &self.filtered
    }

    pub fn visible(&self) -> &[HotelRecord] {
        &self.visible
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, State::Loading { .. })
    }

    pub fn has_more(&self) -> bool {
        self.page_index.saturating_mul(self.page_size) < self.filtered.len()
    }

    fn show_first_page(&mut self, filtered: Vec<HotelRecord>) {
        self.visible = filtered.iter().take(self.page_size).cloned().collect();
        self.filtered = filtered;
        self.page_index = 1;
    }

    fn next_slice(&self) -> &[HotelRecord] {
        let len = self.filtered.len();
        let start = self.page_index.saturating_mul(self.page_size).min(len);
        let end = start.saturating_add(self.page_size).min(len);
        &self.filtered[start..end]
    }

    // Replace the filtered list and go back to page one
    pub fn reset(&mut self, filtered: Vec<HotelRecord>) {
        self.generation += 1;
        self.show_first_page(filtered);

        if let State::Loading { generation } = self.state {
            match self.policy {
                StaleLoadPolicy::Discard => {
                    debug!(generation, "reset cancels in-flight reveal");
                    self.state = State::Idle;
                }
                StaleLoadPolicy::Apply => {
                    debug!(generation, "reset leaves in-flight reveal running");
                }
            }
        }

        debug!(
            generation = self.generation,
            filtered = self.filtered.len(),
            visible = self.visible.len(),
            "pagination reset"
        );
    }

    // Idle -> Loading. Returns None while a reveal is already in flight.
    pub fn begin_reveal(&mut self) -> Option<PendingReveal> {
        match self.state {
            State::Loading { .. } => {
                debug!(page_index = self.page_index, "reveal ignored, already loading");
                None
            }
            State::Idle => {
                self.state = State::Loading {
                    generation: self.generation,
                };
                Some(PendingReveal {
                    generation: self.generation,
                    captured: self.next_slice().to_vec(),
                })
            }
        }
    }

    // Loading -> Idle, appending the captured page
    pub fn complete(&mut self, pending: PendingReveal) -> RevealOutcome {
        if pending.generation != self.generation && self.policy == StaleLoadPolicy::Discard {
            warn!(
                stale = pending.generation,
                current = self.generation,
                "discarding stale reveal"
            );
            return RevealOutcome::Discarded;
        }

        let added = pending.captured.len();
        self.visible.extend(pending.captured);
        self.page_index += 1;
        self.state = State::Idle;

        if added == 0 {
            RevealOutcome::Exhausted
        } else {
            RevealOutcome::Appended {
                added,
                visible: self.visible.len(),
            }
        }
    }

    // Loading -> Idle without appending, for a reveal that will never complete.
    // Returns false when the controller has already moved on from that reveal.
    pub fn abort(&mut self, pending: PendingReveal) -> bool {
        match self.state {
            State::Loading { generation } if generation == pending.generation => {
                self.state = State::Idle;
                true
            }
            _ => false,
        }
    }
}
