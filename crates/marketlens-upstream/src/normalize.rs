//! Normalization from the raw upstream layouts in [`crate::types`] to
//! canonical [`Product`] records.
//!
//! Normalization never fails. Entries that cannot yield a title are dropped,
//! a body in neither layout yields an empty list, and upstream relevance
//! order is preserved.

use marketlens_core::{Price, Product, ProductId, Rating};
use serde_json::Value;

use crate::parse::{parse_exact_float, parse_leading_float};
use crate::types::{
    FlatSearchEntry, FlatSearchResponse, ListingEntry, ListingSearchResponse, RawSearchResponse,
    Scalar,
};

/// Fallback shared by the Shape A category, rating and description slots.
/// Downstream consumers match on this exact text.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// Category used for Shape B records without a city.
pub const LISTING_DEFAULT_CATEGORY: &str = "IndiaMART";

/// Display price for Shape B records without a quoted price.
pub const PRICE_ON_REQUEST: &str = "Price on Request";

/// Shape A placeholder image.
pub const FLAT_SEARCH_PLACEHOLDER: &str = "https://via.placeholder.com/400x300";

/// Shape B placeholder image.
pub const LISTING_PLACEHOLDER: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// Shape A id used when the supplier sent no `displayid`.
const FLAT_SEARCH_FALLBACK_ID: &str = "1";

/// Normalizes an upstream body of unknown layout.
#[must_use]
pub fn normalize_value(body: &Value) -> Vec<Product> {
    normalize_response(RawSearchResponse::classify(body))
}

/// Normalizes a classified upstream body into canonical products.
#[must_use]
pub fn normalize_response(raw: RawSearchResponse) -> Vec<Product> {
    match raw {
        RawSearchResponse::FlatSearch(resp) => normalize_flat_search(resp),
        RawSearchResponse::ListingSearch(resp) => normalize_listing_search(resp),
        RawSearchResponse::Unrecognized => {
            tracing::warn!("upstream body matched no known search layout; returning no products");
            Vec::new()
        }
    }
}

fn normalize_flat_search(resp: FlatSearchResponse) -> Vec<Product> {
    let received = resp.results.len();
    let products: Vec<Product> = resp
        .results
        .into_iter()
        .filter_map(normalize_flat_entry)
        .collect();

    if products.len() < received {
        tracing::debug!(
            received,
            kept = products.len(),
            "dropped flat-search entries without a title"
        );
    }
    products
}

/// Maps one Shape A entry. Returns `None` when the entry has no title.
fn normalize_flat_entry(entry: FlatSearchEntry) -> Option<Product> {
    let fields = entry.fields;
    let title = text(fields.title.as_ref())?;

    let price = match fields.price_f {
        Some(Scalar::Number(n)) => Price::amount(n.as_f64().unwrap_or(0.0)),
        Some(Scalar::Text(s)) => Price::amount(parse_leading_float(&s).unwrap_or(0.0)),
        Some(Scalar::Other(_)) | None => Price::amount(0.0),
    };

    let id = ProductId::Text(
        text(fields.displayid.as_ref()).unwrap_or_else(|| FLAT_SEARCH_FALLBACK_ID.to_owned()),
    );

    let rating = match fields.supplier_rating {
        Some(Scalar::Number(n)) => n.as_f64().map_or_else(unnamed_rating, Rating::Score),
        Some(Scalar::Text(s)) => match parse_exact_float(&s) {
            Some(score) => Rating::Score(score),
            None => match s.trim() {
                "" => unnamed_rating(),
                label => Rating::Label(label.to_owned()),
            },
        },
        Some(Scalar::Other(_)) | None => unnamed_rating(),
    };

    Some(Product {
        id,
        category: text(fields.original_title.as_ref())
            .unwrap_or_else(|| UNNAMED_PRODUCT.to_owned()),
        price,
        thumbnail: text(fields.large_image.as_ref())
            .unwrap_or_else(|| FLAT_SEARCH_PLACEHOLDER.to_owned()),
        rating: Some(rating),
        // The brand slot mirrors the title in this layout.
        brand: Some(title.clone()),
        description: Some(
            text(fields.address.as_ref()).unwrap_or_else(|| UNNAMED_PRODUCT.to_owned()),
        ),
        pdp_url: None,
        company_name: None,
        location: None,
        title,
    })
}

fn unnamed_rating() -> Rating {
    Rating::Label(UNNAMED_PRODUCT.to_owned())
}

fn normalize_listing_search(resp: ListingSearchResponse) -> Vec<Product> {
    let received = resp.results.len();

    // Entries without a name are removed before ids are assigned, so ids
    // stay contiguous over the kept entries.
    let products: Vec<Product> = resp
        .results
        .into_iter()
        .filter_map(|entry| {
            let title = text(entry.product_name.as_ref())?;
            Some((title, entry))
        })
        .zip(1u64..)
        .map(|((title, entry), position)| normalize_listing_entry(position, title, entry))
        .collect();

    if products.len() < received {
        tracing::debug!(
            received,
            kept = products.len(),
            "dropped listing-search entries without PRODUCTNAME"
        );
    }
    products
}

/// Maps one named Shape B entry. `position` is its 1-based rank among the
/// named entries and becomes its id.
fn normalize_listing_entry(position: u64, title: String, entry: ListingEntry) -> Product {
    let city = text(entry.city.as_ref());
    let company_name = text(entry.company_name.as_ref());

    Product {
        id: ProductId::Int(position),
        title,
        category: city
            .clone()
            .unwrap_or_else(|| LISTING_DEFAULT_CATEGORY.to_owned()),
        price: Price::Display(
            text(entry.price.as_ref()).unwrap_or_else(|| PRICE_ON_REQUEST.to_owned()),
        ),
        thumbnail: text(entry.product_image.as_ref())
            .unwrap_or_else(|| LISTING_PLACEHOLDER.to_owned()),
        rating: None,
        brand: Some(company_name.clone().unwrap_or_default()),
        description: Some(
            text(entry.minimum_order_quantity.as_ref())
                .map(|moq| format!("MOQ: {moq}"))
                .unwrap_or_default(),
        ),
        pdp_url: text(entry.pdp_url.as_ref()),
        company_name,
        location: city,
    }
}

fn text(value: Option<&Scalar>) -> Option<String> {
    value.and_then(Scalar::as_text)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
