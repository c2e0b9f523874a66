use serde::{Deserialize, Serialize};

/// A search result reconciled from one of the upstream response shapes into
/// the single representation consumed by the carousel.
///
/// Records carry no timestamps or generated values: normalizing the same raw
/// payload twice produces equal `Product`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier unique within one result set. Not stable across queries.
    pub id: ProductId,
    /// Display title. Never empty; records without one are dropped upstream.
    pub title: String,
    pub category: String,
    pub price: Price,
    /// Image URL, or a placeholder URL when the provider sent none.
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product detail page used as the card's call to action.
    #[serde(default, rename = "pdpurl", skip_serializing_if = "Option::is_none")]
    pub pdp_url: Option<String>,
    #[serde(
        default,
        rename = "companyname",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Product identifier as delivered on the wire: a JSON number for
/// position-derived ids, a JSON string for provider-supplied ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(u64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{n}"),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// Price in one of two representations that are never converted into each
/// other.
///
/// `Amount` is a parsed number, always finite and non-negative; zero means
/// the provider quoted no price. `Display` is a provider-formatted string
/// such as `"₹ 25/Piece"` or `"Price on Request"`, shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Display(String),
}

impl Price {
    /// Builds an `Amount`, collapsing negative and non-finite input to zero.
    #[must_use]
    pub fn amount(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Price::Amount(value)
        } else {
            Price::Amount(0.0)
        }
    }

    /// Returns `true` when nothing should be shown for this price. Only a
    /// zero amount is suppressed; display strings are always shown verbatim.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        match self {
            Price::Amount(v) => *v == 0.0,
            Price::Display(_) => false,
        }
    }
}

/// Supplier rating. Providers send either a score or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Score(f64),
    Label(String),
}

impl Rating {
    /// Returns `true` when the rating carries something worth displaying:
    /// a non-zero score or a non-empty label.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        match self {
            Rating::Score(v) => v.is_finite() && *v != 0.0,
            Rating::Label(s) => !s.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product() -> Product {
        Product {
            id: ProductId::Int(1),
            title: "Jute Shopping Bag".to_string(),
            category: "Kolkata".to_string(),
            price: Price::Display("₹ 45/Piece".to_string()),
            thumbnail: "https://img.example.com/jute.jpg".to_string(),
            rating: None,
            brand: Some("Eco Bags Co".to_string()),
            description: Some("MOQ: 100 Piece".to_string()),
            pdp_url: None,
            company_name: Some("Eco Bags Co".to_string()),
            location: Some("Kolkata".to_string()),
        }
    }

    #[test]
    fn price_amount_collapses_negative_to_zero() {
        assert_eq!(Price::amount(-3.5), Price::Amount(0.0));
    }

    #[test]
    fn price_amount_collapses_nan_and_infinity_to_zero() {
        assert_eq!(Price::amount(f64::NAN), Price::Amount(0.0));
        assert_eq!(Price::amount(f64::INFINITY), Price::Amount(0.0));
    }

    #[test]
    fn price_amount_keeps_positive_value() {
        assert_eq!(Price::amount(9.99), Price::Amount(9.99));
    }

    #[test]
    fn zero_amount_is_suppressed_but_display_string_is_not() {
        assert!(Price::Amount(0.0).is_suppressed());
        assert!(!Price::Amount(12.0).is_suppressed());
        assert!(!Price::Display("Price on Request".to_string()).is_suppressed());
        assert!(!Price::Display(String::new()).is_suppressed());
    }

    #[test]
    fn zero_score_rating_is_not_displayable() {
        assert!(!Rating::Score(0.0).is_displayable());
        assert!(Rating::Score(4.2).is_displayable());
        assert!(Rating::Label("Unnamed Product".to_string()).is_displayable());
    }

    #[test]
    fn product_id_display() {
        assert_eq!(ProductId::Int(7).to_string(), "7");
        assert_eq!(ProductId::Text("abc-1".to_string()).to_string(), "abc-1");
    }

    #[test]
    fn serializes_wire_field_names_and_omits_absent_optionals() {
        let json = serde_json::to_value(make_product()).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], "₹ 45/Piece");
        assert_eq!(json["companyname"], "Eco Bags Co");
        assert!(json.get("pdpurl").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn numeric_price_serializes_as_number() {
        let mut product = make_product();
        product.price = Price::Amount(9.99);
        product.id = ProductId::Text("DX-1".to_string());
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(json["price"], 9.99);
        assert_eq!(json["id"], "DX-1");
    }

    #[test]
    fn deserializes_wire_form() {
        let json = serde_json::json!({
            "id": "DX-9",
            "title": "Tote",
            "category": "Bags",
            "price": 12.5,
            "thumbnail": "https://img.example.com/t.jpg",
            "rating": 4.5,
            "pdpurl": "https://shop.example.com/p/9"
        });
        let product: Product = serde_json::from_value(json).expect("deserialize");
        assert_eq!(product.id, ProductId::Text("DX-9".to_string()));
        assert_eq!(product.price, Price::Amount(12.5));
        assert_eq!(product.rating, Some(Rating::Score(4.5)));
        assert_eq!(
            product.pdp_url.as_deref(),
            Some("https://shop.example.com/p/9")
        );
        assert!(product.company_name.is_none());
    }
}
