//! Canonical offer and grouped-product records produced by an ingestion run.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One retailer's purchase listing for a product.
///
/// Invariants: `price > 0` and `url` is non-empty — both enforced at the
/// extraction boundary, never re-checked downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub price: Decimal,
    /// ISO 4217 code, fixed per run.
    pub currency: String,
    pub retailer: String,
    pub url: String,
    pub availability_text: String,
    /// Channel tag, e.g. `"google_shopping"`.
    pub source: String,
    pub source_icon: Option<String>,
    pub delivery: Option<String>,
    pub old_price: Option<Decimal>,
    pub second_hand_condition: Option<String>,
}

/// Canonical aggregate of one or more [`Offer`]s believed to represent the
/// same underlying product.
///
/// `lowest_price` always equals the minimum price over `offers`, and
/// `offers` is never empty. Records are built once per run and replaced
/// wholesale by the next run; there is no cross-run identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedProduct {
    /// Opaque identifier from the search API correlating listings of the
    /// same product across retailers; `None` for standalone listings.
    pub product_id: Option<String>,
    pub title: String,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub snippet: Option<String>,
    pub extensions: Option<Vec<String>>,
    /// The search query this product was collected under.
    pub product_query: String,
    pub category: Option<Category>,
    pub collected_at: DateTime<Utc>,
    pub offers: Vec<Offer>,
    pub lowest_price: Decimal,
}

impl GroupedProduct {
    /// Appends an offer, lowering `lowest_price` if the new offer undercuts it.
    pub fn push_offer(&mut self, offer: Offer) {
        if offer.price < self.lowest_price {
            self.lowest_price = offer.price;
        }
        self.offers.push(offer);
    }

    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }
}
