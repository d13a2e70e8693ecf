//! Keyword classification of listing titles into golf equipment categories.
//!
//! Rules are evaluated in a fixed order so that bundle keywords win over the
//! single-club categories they contain (a "complete set" listing mentions
//! irons and a driver, but is not an iron listing).

use serde::{Deserialize, Serialize};

/// Equipment category inferred from a listing's title and snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Complete Sets")]
    CompleteSets,
    #[serde(rename = "Golf Bags")]
    GolfBags,
    #[serde(rename = "Carts")]
    Carts,
    #[serde(rename = "Drivers")]
    Drivers,
    #[serde(rename = "Woods")]
    Woods,
    #[serde(rename = "Wedges")]
    Wedges,
    #[serde(rename = "Putters")]
    Putters,
    #[serde(rename = "Irons")]
    Irons,
    #[serde(rename = "Rangefinders")]
    Rangefinders,
    #[serde(rename = "Apparel")]
    Apparel,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::CompleteSets => "Complete Sets",
            Category::GolfBags => "Golf Bags",
            Category::Carts => "Carts",
            Category::Drivers => "Drivers",
            Category::Woods => "Woods",
            Category::Wedges => "Wedges",
            Category::Putters => "Putters",
            Category::Irons => "Irons",
            Category::Rangefinders => "Rangefinders",
            Category::Apparel => "Apparel",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a listing by substring matching against the concatenated
/// title and snippet.
///
/// Returns the first matching rule in declaration order, or `None` when no
/// rule matches. Pure and deterministic.
#[must_use]
pub fn classify(title: &str, snippet: Option<&str>) -> Option<Category> {
    let text = format!("{title} {}", snippet.unwrap_or("")).to_lowercase();
    let has = |needle: &str| text.contains(needle);

    // Bundles first: "complete set" would otherwise match "driver"/"iron".
    if has("complete set") || has("package set") || has("box set") {
        return Some(Category::CompleteSets);
    }
    if has("bag") {
        // Covers "stand bag" and "cart bag", so this must run before Carts.
        return Some(Category::GolfBags);
    }
    if has("push cart") || has("pull cart") || has("electric cart") {
        return Some(Category::Carts);
    }
    if has("driver") {
        return Some(Category::Drivers);
    }
    if has("fairway") || has("wood") || has("hybrid") {
        return Some(Category::Woods);
    }
    if has("wedge") || has("sand") || has("lob") || has("gap") {
        return Some(Category::Wedges);
    }
    if has("putter") {
        return Some(Category::Putters);
    }
    if has("iron") {
        return Some(Category::Irons);
    }
    if has("rangefinder") || has("gps") || has("laser") {
        return Some(Category::Rangefinders);
    }
    if has("shirt")
        || has("pant")
        || has("shoe")
        || has("hat")
        || has("cap")
        || has("glove")
        || has("jacket")
    {
        return Some(Category::Apparel);
    }

    None
}
