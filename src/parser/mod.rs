pub mod listing_parser;

pub use listing_parser::ListingParser;

use crate::model::Listing;

/// Filter step: a page whose every extracted value is the "no availability"
/// sentinel is the same signal as a page with no listings at all.
pub fn suppress_if_all_empty(listings: Vec<Listing>, sentinel: Option<&str>) -> Vec<Listing> {
    let Some(sentinel) = sentinel else {
        return listings;
    };
    let all_sentinel = listings
        .iter()
        .all(|listing| listing.values().iter().all(|value| *value == sentinel));
    if all_sentinel { Vec::new() } else { listings }
}
