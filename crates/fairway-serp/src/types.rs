//! SerpAPI Google Shopping response types.
//!
//! The shopping-results payload has no enforced shape: every field is
//! optional on the wire and must be read defensively. Validation and
//! narrowing happen at the extraction boundary, not here.

use serde::Deserialize;

/// Top-level envelope for a Google Shopping search response.
///
/// Only `shopping_results` is consumed; SerpAPI sends many more keys
/// (search metadata, pagination, filters) that are ignored. A missing
/// array deserializes as empty.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub shopping_results: Vec<ShoppingResult>,
}

/// One raw shopping listing as returned by SerpAPI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extracted_price: Option<f64>,
    #[serde(default)]
    pub link: Option<String>,
    /// Primary retailer field.
    #[serde(default)]
    pub source: Option<String>,
    /// Secondary retailer field, present on some result variants.
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    /// Opaque key correlating listings of the same product across retailers.
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub source_icon: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<i64>,
    #[serde(default)]
    pub extracted_old_price: Option<f64>,
    #[serde(default)]
    pub second_hand_condition: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}
