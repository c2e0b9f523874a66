//! Raw upstream search response shapes.
//!
//! The search API answers in one of two unrelated layouts and gives no
//! discriminator field, so the layout is recognised structurally.
//!
//! ### Shape A, "flat-search"
//! ```json
//! { "results": [ { "fields": { "title": "...", "price_f": "9.99", ... } } ] }
//! ```
//! Every value in `fields` may arrive as a string or as a number
//! (`price_f` has been seen as both `"9.99"` and `9.99`). Entries may lack
//! `fields` entirely.
//!
//! ### Shape B, "listing-search"
//! ```json
//! { "response": { "results": [ { "PRODUCTNAME": "...", "PRICE": "...", ... } ] } }
//! ```
//! Upper-case commerce field names. `PRICE` is a pre-formatted display
//! string such as `"₹ 45/Piece"`; `MINIMUMORDERQUANTITY` is a string or a
//! number.
//!
//! Both layouts carry many more fields than listed here; unknown fields are
//! ignored. Entries are decoded one at a time and an entry that does not
//! decode is skipped without affecting its siblings.

use serde::Deserialize;
use serde_json::Value;

/// A loosely typed scalar slot. Upstream fields flip between strings and
/// numbers, and occasionally carry objects or booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

impl Scalar {
    /// Trimmed text form of the value. Numbers are stringified; empty
    /// strings and non-scalar values yield `None`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Scalar::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Scalar::Number(n) => Some(n.to_string()),
            Scalar::Other(_) => None,
        }
    }
}

/// Shape A response after entry-by-entry decoding.
#[derive(Debug, Default)]
pub struct FlatSearchResponse {
    pub results: Vec<FlatSearchEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlatSearchEntry {
    #[serde(default)]
    pub fields: FlatSearchFields,
}

/// The flat field bag of one Shape A entry.
#[derive(Debug, Default, Deserialize)]
pub struct FlatSearchFields {
    /// Numeric price, as a string or a number.
    #[serde(default)]
    pub price_f: Option<Scalar>,
    #[serde(default)]
    pub title: Option<Scalar>,
    #[serde(default)]
    pub large_image: Option<Scalar>,
    /// Provider's original listing title; used as the category.
    #[serde(default)]
    pub original_title: Option<Scalar>,
    #[serde(default)]
    pub address: Option<Scalar>,
    /// Supplier-provided display id.
    #[serde(default)]
    pub displayid: Option<Scalar>,
    #[serde(default)]
    pub supplier_rating: Option<Scalar>,
}

/// Shape B response after entry-by-entry decoding.
#[derive(Debug, Default)]
pub struct ListingSearchResponse {
    pub results: Vec<ListingEntry>,
}

/// One Shape B listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListingEntry {
    #[serde(rename = "PRODUCTNAME", default)]
    pub product_name: Option<Scalar>,
    /// Pre-formatted display price.
    #[serde(rename = "PRICE", default)]
    pub price: Option<Scalar>,
    #[serde(rename = "PRODUCTIMAGE1", default)]
    pub product_image: Option<Scalar>,
    #[serde(rename = "COMPANYNAME", default)]
    pub company_name: Option<Scalar>,
    #[serde(rename = "CITY", default)]
    pub city: Option<Scalar>,
    #[serde(rename = "MINIMUMORDERQUANTITY", default)]
    pub minimum_order_quantity: Option<Scalar>,
    #[serde(rename = "PDPURL", default)]
    pub pdp_url: Option<Scalar>,
}

/// An upstream body classified into one of the known layouts.
#[derive(Debug)]
pub enum RawSearchResponse {
    FlatSearch(FlatSearchResponse),
    ListingSearch(ListingSearchResponse),
    /// Neither layout matched: missing results, wrong types, or an error page.
    Unrecognized,
}

impl RawSearchResponse {
    /// Recognises the layout of an upstream body.
    ///
    /// A top-level `results` array means Shape A; a `response.results` array
    /// means Shape B. Anything else is [`RawSearchResponse::Unrecognized`].
    #[must_use]
    pub fn classify(body: &Value) -> Self {
        if let Some(entries) = body.get("results").and_then(Value::as_array) {
            return RawSearchResponse::FlatSearch(FlatSearchResponse {
                results: decode_entries(entries),
            });
        }

        if let Some(entries) = body
            .get("response")
            .and_then(|r| r.get("results"))
            .and_then(Value::as_array)
        {
            return RawSearchResponse::ListingSearch(ListingSearchResponse {
                results: decode_entries(entries),
            });
        }

        RawSearchResponse::Unrecognized
    }
}

fn decode_entries<'a, T>(entries: &'a [Value]) -> Vec<T>
where
    T: Deserialize<'a>,
{
    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| match T::deserialize(entry) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(index = idx, error = %e, "skipping undecodable search entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classify_recognises_flat_search() {
        let body = json!({ "results": [ { "fields": { "title": "Mascara" } } ] });
        let RawSearchResponse::FlatSearch(resp) = RawSearchResponse::classify(&body) else {
            panic!("expected Shape A");
        };
        assert_eq!(resp.results.len(), 1);
        assert_eq!(
            resp.results[0].fields.title,
            Some(Scalar::Text("Mascara".to_owned()))
        );
    }

    #[test]
    fn classify_recognises_listing_search() {
        let body = json!({ "response": { "results": [ { "PRODUCTNAME": "Jute Bag" } ] } });
        let RawSearchResponse::ListingSearch(resp) = RawSearchResponse::classify(&body) else {
            panic!("expected Shape B");
        };
        assert_eq!(resp.results.len(), 1);
    }

    #[test]
    fn classify_unrecognized_when_results_missing_or_wrong_type() {
        assert!(matches!(
            RawSearchResponse::classify(&json!({ "status": "ok" })),
            RawSearchResponse::Unrecognized
        ));
        assert!(matches!(
            RawSearchResponse::classify(&json!({ "results": "none" })),
            RawSearchResponse::Unrecognized
        ));
        assert!(matches!(
            RawSearchResponse::classify(&json!({ "response": null })),
            RawSearchResponse::Unrecognized
        ));
        assert!(matches!(
            RawSearchResponse::classify(&json!([1, 2, 3])),
            RawSearchResponse::Unrecognized
        ));
    }

    #[test]
    fn flat_entry_without_fields_decodes_to_empty_bag() {
        let body = json!({ "results": [ {} ] });
        let RawSearchResponse::FlatSearch(resp) = RawSearchResponse::classify(&body) else {
            panic!("expected Shape A");
        };
        assert!(resp.results[0].fields.title.is_none());
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = json!({ "response": { "results": [ "junk", 42, { "PRODUCTNAME": "Tote" } ] } });
        let RawSearchResponse::ListingSearch(resp) = RawSearchResponse::classify(&body) else {
            panic!("expected Shape B");
        };
        assert_eq!(resp.results.len(), 1);
    }

    #[test]
    fn scalar_as_text_trims_and_stringifies() {
        assert_eq!(
            Scalar::Text("  bag ".to_owned()).as_text().as_deref(),
            Some("bag")
        );
        assert_eq!(Scalar::Text("   ".to_owned()).as_text(), None);
        assert_eq!(
            Scalar::Number(serde_json::Number::from(100)).as_text().as_deref(),
            Some("100")
        );
        assert_eq!(Scalar::Other(json!({ "a": 1 })).as_text(), None);
    }
}
