//! Merges raw shopping results into canonical grouped products.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use fairway_core::GroupedProduct;
use fairway_serp::ShoppingResult;

use crate::extract::extract_offer;

/// Aggregates raw results for one query into grouped products.
///
/// Results are processed in input order. Listings sharing a non-empty
/// external `product_id` merge into one product: offers append in input
/// order, `lowest_price` only ever drops, and sparse `rating`/`reviews`
/// fields are backfilled only while the existing value is `None`
/// (first-seen wins; an explicit null check, so a genuine rating of 0.0 is
/// never overwritten). Listings without an identifier become standalone
/// products and never merge, even on identical titles.
///
/// Output order: identifier-grouped products in first-appearance order,
/// then standalone products in input order.
#[must_use]
pub fn aggregate(
    results: &[ShoppingResult],
    query: &str,
    currency: &str,
    now: DateTime<Utc>,
) -> Vec<GroupedProduct> {
    let mut grouped: HashMap<String, GroupedProduct> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    let mut standalone: Vec<GroupedProduct> = Vec::new();

    for raw in results {
        let Some((offer, seed)) = extract_offer(raw, query, currency, now) else {
            continue;
        };

        match raw.product_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => {
                if let Some(existing) = grouped.get_mut(id) {
                    existing.push_offer(offer);
                    if existing.rating.is_none() && seed.rating.is_some() {
                        existing.rating = seed.rating;
                    }
                    if existing.reviews.is_none() && seed.reviews.is_some() {
                        existing.reviews = seed.reviews;
                    }
                } else {
                    first_seen.push(id.to_string());
                    grouped.insert(
                        id.to_string(),
                        seed.into_product(Some(id.to_string()), offer),
                    );
                }
            }
            None => standalone.push(seed.into_product(None, offer)),
        }
    }

    let mut products: Vec<GroupedProduct> = first_seen
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect();
    products.extend(standalone);
    products
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn result(title: &str, price: f64, product_id: Option<&str>) -> ShoppingResult {
        ShoppingResult {
            title: Some(title.to_string()),
            extracted_price: Some(price),
            link: Some(format!("https://example.com/{}", title.replace(' ', "-"))),
            product_id: product_id.map(str::to_string),
            ..ShoppingResult::default()
        }
    }

    fn run(results: &[ShoppingResult]) -> Vec<GroupedProduct> {
        aggregate(results, "golf", "CAD", Utc::now())
    }

    #[test]
    fn shared_identifier_merges_into_one_product() {
        let products = run(&[
            result("PING Driver", 100.0, Some("P1")),
            result("PING Driver Sale", 90.0, Some("P1")),
        ]);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].offers.len(), 2);
        assert_eq!(products[0].lowest_price, Decimal::from(90));
        // First-seen metadata wins: title comes from the first listing.
        assert_eq!(products[0].title, "PING Driver");
        // Offers stay in input order.
        assert_eq!(products[0].offers[0].price, Decimal::from(100));
        assert_eq!(products[0].offers[1].price, Decimal::from(90));
    }

    #[test]
    fn lowest_price_does_not_rise_on_higher_later_offer() {
        let products = run(&[
            result("PING Driver", 90.0, Some("P1")),
            result("PING Driver", 120.0, Some("P1")),
        ]);
        assert_eq!(products[0].lowest_price, Decimal::from(90));
    }

    #[test]
    fn identifierless_results_never_merge() {
        let products = run(&[
            result("Same Title", 50.0, None),
            result("Same Title", 60.0, None),
        ]);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].offers.len(), 1);
        assert_eq!(products[1].offers.len(), 1);
    }

    #[test]
    fn empty_identifier_is_treated_as_standalone() {
        let products = run(&[
            result("A", 10.0, Some("")),
            result("B", 20.0, Some("")),
        ]);
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.product_id.is_none()));
    }

    #[test]
    fn grouped_products_precede_standalone_in_output() {
        let products = run(&[
            result("Standalone", 50.0, None),
            result("Grouped B", 30.0, Some("B")),
            result("Grouped A", 20.0, Some("A")),
        ]);

        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Grouped B", "Grouped A", "Standalone"]);
    }

    #[test]
    fn non_viable_results_contribute_nothing() {
        let mut missing_link = result("No Link", 10.0, Some("P1"));
        missing_link.link = None;
        let mut zero_price = result("Free?", 0.0, None);
        zero_price.extracted_price = Some(0.0);

        let products = run(&[missing_link, zero_price]);
        assert!(products.is_empty());
    }

    #[test]
    fn rating_backfills_only_when_absent() {
        let mut first = result("PING Driver", 100.0, Some("P1"));
        first.rating = None;
        let mut second = result("PING Driver", 90.0, Some("P1"));
        second.rating = Some(4.5);

        let products = run(&[first, second]);
        assert_eq!(products[0].rating, Some(4.5));
    }

    #[test]
    fn present_rating_is_never_overwritten() {
        let mut first = result("PING Driver", 100.0, Some("P1"));
        first.rating = Some(4.0);
        let mut second = result("PING Driver", 90.0, Some("P1"));
        second.rating = Some(3.0);

        let products = run(&[first, second]);
        assert_eq!(products[0].rating, Some(4.0));
    }

    #[test]
    fn zero_rating_counts_as_present() {
        let mut first = result("PING Driver", 100.0, Some("P1"));
        first.rating = Some(0.0);
        let mut second = result("PING Driver", 90.0, Some("P1"));
        second.rating = Some(4.5);

        let products = run(&[first, second]);
        assert_eq!(products[0].rating, Some(0.0));
    }

    #[test]
    fn reviews_backfill_follows_the_same_rule() {
        let mut first = result("PING Driver", 100.0, Some("P1"));
        first.reviews = None;
        let mut second = result("PING Driver", 90.0, Some("P1"));
        second.reviews = Some(231);

        let products = run(&[first, second]);
        assert_eq!(products[0].reviews, Some(231));
    }

    #[test]
    fn end_to_end_golf_scenario() {
        let products = run(&[
            result("PING Driver", 100.0, Some("P1")),
            result("PING Driver Sale", 90.0, Some("P1")),
            result("Standalone Putter", 50.0, None),
        ]);

        assert_eq!(products.len(), 2);

        let grouped = &products[0];
        assert_eq!(grouped.product_id.as_deref(), Some("P1"));
        assert_eq!(grouped.offers.len(), 2);
        assert_eq!(grouped.lowest_price, Decimal::from(90));

        let standalone = &products[1];
        assert!(standalone.product_id.is_none());
        assert_eq!(standalone.offers.len(), 1);
        assert_eq!(standalone.lowest_price, Decimal::from(50));
    }

    #[test]
    fn every_output_satisfies_the_invariants() {
        let products = run(&[
            result("A", 30.0, Some("X")),
            result("B", 10.0, Some("X")),
            result("C", 20.0, None),
        ]);

        for p in &products {
            assert!(!p.offers.is_empty());
            let min = p.offers.iter().map(|o| o.price).min().unwrap();
            assert_eq!(p.lowest_price, min);
            for o in &p.offers {
                assert!(o.price > Decimal::ZERO);
                assert!(!o.url.is_empty());
                assert_eq!(o.currency, "CAD");
            }
        }
    }
}
