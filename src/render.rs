// Presentation: view model for the listing page and a plain-text renderer

use std::fmt;

use serde::Serialize;

use crate::{
    config::{ListingConfig, TriggerMode},
    dummy_data::HotelRecord,
    error::Result,
    filter::SortBy,
    listing::ListingSnapshot,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelCard {
    pub id: u32,
    pub name: String,
    pub rating: u8,
    pub price: u32,
}

impl From<&HotelRecord> for HotelCard {
    fn from(hotel: &HotelRecord) -> Self {
        Self {
            id: hotel.id,
            name: hotel.name.clone(),
            rating: hotel.rating,
            price: hotel.price,
        }
    }
}

impl HotelCard {
    pub fn render(&self) -> String {
        format!(
            "{}\nRating: {} stars\nPrice: {}",
            self.name, self.rating, self.price
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{} | Rating: {} stars | Price: {}",
            self.name, self.rating, self.price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

// Filter form as the user sees it; blank fields are empty strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub min_price: String,
    pub max_price: String,
    pub min_rating: String,
    pub sort_by: SortBy,
    pub sort_options: Vec<SortOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Footer {
    Loading,
    LoadMoreButton,
    EndOfResults,
    // Infinite scroll with more to come: nothing to show until the next trigger
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub form: FormView,
    pub featured: Vec<HotelCard>,
    pub hotels: Vec<HotelCard>,
    pub total_matches: usize,
    pub loading: bool,
    pub has_more: bool,
    pub footer: Footer,
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map(|value| value.to_string()).unwrap_or_default()
}

impl PageView {
    pub fn build(snapshot: &ListingSnapshot, config: &ListingConfig) -> Self {
        let criteria = &snapshot.criteria;

        let form = FormView {
            min_price: format_bound(criteria.min_price),
            max_price: format_bound(criteria.max_price),
            min_rating: format_bound(criteria.min_rating),
            sort_by: criteria.sort_by,
            sort_options: SortBy::ALL
                .into_iter()
                .map(|sort_by| SortOption {
                    key: sort_by.key(),
                    label: sort_by.label(),
                    selected: sort_by == criteria.sort_by,
                })
                .collect(),
        };

        let footer = match (snapshot.loading, config.trigger_mode) {
            (true, _) => Footer::Loading,
            (false, TriggerMode::Manual) => Footer::LoadMoreButton,
            (false, TriggerMode::InfiniteScroll) if snapshot.has_more => Footer::Hidden,
            (false, TriggerMode::InfiniteScroll) => Footer::EndOfResults,
        };

        Self {
            form,
            featured: snapshot
                .visible
                .iter()
                .take(config.featured_count)
                .map(HotelCard::from)
                .collect(),
            hotels: snapshot.visible.iter().map(HotelCard::from).collect(),
            total_matches: snapshot.filtered.len(),
            loading: snapshot.loading,
            has_more: snapshot.has_more,
            footer,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = &self.form;
        let selected = form
            .sort_options
            .iter()
            .find(|option| option.selected)
            .map_or("", |option| option.label);

        writeln!(
            f,
            "Min Price: [{}]  Max Price: [{}]  Min Rating: [{}]  Sort By: [{}]  (Clear Filters)",
            form.min_price, form.max_price, form.min_rating, selected
        )?;

        writeln!(f, "\nFeatured Hotels")?;
        for card in &self.featured {
            writeln!(f, "  {}", card.summary())?;
        }

        writeln!(f, "\nHotels ({} of {})", self.hotels.len(), self.total_matches)?;
        for card in &self.hotels {
            writeln!(f, "  {}", card.summary())?;
        }

        match self.footer {
            Footer::Loading => writeln!(f, "\nLoading..."),
            Footer::LoadMoreButton => writeln!(f, "\n[ Load More ]"),
            Footer::EndOfResults => writeln!(f, "\nNo more hotels"),
            Footer::Hidden => Ok(()),
        }
    }
}

pub fn render_page(view: &PageView) -> String {
    view.to_string()
}
