//! Narrows one raw shopping result into a validated offer plus product
//! metadata.
//!
//! This is the validation boundary for the loosely-typed search payload:
//! nothing untyped flows past it. A result missing any of title, positive
//! price, or link is silently skipped — a validation skip, not an error.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use fairway_core::{classify, Category, Offer};
use fairway_serp::ShoppingResult;

/// Source channel tag stamped onto every extracted offer.
const SOURCE_TAG: &str = "google_shopping";

/// Retailer fallback when both retailer fields are absent.
const UNKNOWN_RETAILER: &str = "Unknown";

/// Product-level metadata accompanying an extracted [`Offer`], used by the
/// aggregator to seed or backfill a grouped product.
#[derive(Debug, Clone)]
pub struct ProductSeed {
    pub title: String,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub snippet: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub product_query: String,
    pub category: Option<Category>,
    pub collected_at: DateTime<Utc>,
}

impl ProductSeed {
    /// Builds a grouped product from this seed with a singleton offer list.
    #[must_use]
    pub fn into_product(
        self,
        product_id: Option<String>,
        offer: Offer,
    ) -> fairway_core::GroupedProduct {
        let lowest_price = offer.price;
        fairway_core::GroupedProduct {
            product_id,
            title: self.title,
            image_url: self.image_url,
            rating: self.rating,
            reviews: self.reviews,
            snippet: self.snippet,
            extensions: self.extensions,
            product_query: self.product_query,
            category: self.category,
            collected_at: self.collected_at,
            offers: vec![offer],
            lowest_price,
        }
    }
}

/// Extracts a validated offer and product seed from one raw result.
///
/// Returns `None` (validation skip) unless the result has a non-empty
/// title, a positive extracted price, and a non-empty link. The price is
/// converted to a `Decimal`; a non-finite price also skips.
#[must_use]
pub fn extract_offer(
    raw: &ShoppingResult,
    query: &str,
    currency: &str,
    now: DateTime<Utc>,
) -> Option<(Offer, ProductSeed)> {
    let title = raw.title.as_deref().filter(|t| !t.is_empty())?;
    let link = raw.link.as_deref().filter(|l| !l.is_empty())?;
    let price = raw
        .extracted_price
        .filter(|p| *p > 0.0)
        .and_then(Decimal::from_f64)?;

    let retailer = raw
        .source
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(raw.store.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or(UNKNOWN_RETAILER)
        .to_string();

    let availability_text = format!(
        "{} {}",
        raw.delivery.as_deref().unwrap_or(""),
        raw.availability.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();

    let offer = Offer {
        price,
        currency: currency.to_string(),
        retailer,
        url: link.to_string(),
        availability_text,
        source: SOURCE_TAG.to_string(),
        source_icon: raw.source_icon.clone(),
        delivery: raw.delivery.clone(),
        old_price: raw.extracted_old_price.and_then(Decimal::from_f64),
        second_hand_condition: raw.second_hand_condition.clone(),
    };

    let seed = ProductSeed {
        title: title.to_string(),
        image_url: raw.thumbnail.clone(),
        rating: raw.rating,
        reviews: raw.reviews,
        snippet: raw.snippet.clone(),
        extensions: raw.extensions.clone(),
        product_query: query.to_string(),
        category: classify(title, raw.snippet.as_deref()),
        collected_at: now,
    };

    Some((offer, seed))
}
