//! Per-product card presentation.

use std::fmt::Write as _;

use marketlens_core::{Price, Product, Rating};
use serde::Serialize;

/// Horizontal gap between adjacent cards, in pixels.
const GUTTER_PX: f64 = 12.0;

/// One card in the carousel track.
///
/// The image-failure flag belongs to this card alone. Once set it stays set
/// for the lifetime of the card; a fresh card is built when the product list
/// is replaced.
#[derive(Debug, Clone)]
pub struct ProductCard {
    product: Product,
    image_failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardImage {
    Thumbnail { src: String, alt: String },
    /// Stand-in glyph shown when there is no image or it failed to load.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallToAction {
    Link { href: String },
    /// Rendered as a link whose activation does nothing.
    Inert,
}

/// Card width within the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardSizing {
    pub width_percent: f64,
    /// Pixels subtracted from `width_percent` to leave room for gutters.
    pub gutter_px: f64,
}

impl CardSizing {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_cards_per_view(cards_per_view: usize) -> Self {
        let per_view = cards_per_view.max(1) as f64;
        Self {
            width_percent: 100.0 / per_view,
            gutter_px: (per_view - 1.0) * GUTTER_PX / per_view,
        }
    }

    /// CSS `calc()` expression for the card width.
    #[must_use]
    pub fn css_width(&self) -> String {
        format!("calc({}% - {}px)", self.width_percent, self.gutter_px)
    }
}

/// Everything needed to draw one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    /// Badge drawn over the image.
    pub category: String,
    pub image: CardImage,
    pub price_label: Option<String>,
    pub rating_label: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub call_to_action: CallToAction,
    pub sizing: CardSizing,
}

impl ProductCard {
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            image_failed: false,
        }
    }

    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn image_failed(&self) -> bool {
        self.image_failed
    }

    /// Records that the thumbnail failed to load. Permanent for this card.
    pub fn mark_image_failed(&mut self) {
        if !self.image_failed {
            tracing::debug!(product_id = %self.product.id, "card image failed; using placeholder");
        }
        self.image_failed = true;
    }

    #[must_use]
    pub fn render(&self, cards_per_view: usize) -> CardView {
        let p = &self.product;

        let image = if self.image_failed || p.thumbnail.trim().is_empty() {
            CardImage::Placeholder
        } else {
            CardImage::Thumbnail {
                src: p.thumbnail.clone(),
                alt: p.title.clone(),
            }
        };

        let call_to_action = match non_empty(p.pdp_url.as_deref()) {
            Some(href) => CallToAction::Link { href },
            None => CallToAction::Inert,
        };

        CardView {
            title: p.title.clone(),
            category: p.category.clone(),
            image,
            price_label: price_label(&p.price),
            rating_label: p.rating.as_ref().and_then(rating_label),
            company_name: non_empty(p.company_name.as_deref()),
            location: non_empty(p.location.as_deref()),
            call_to_action,
            sizing: CardSizing::for_cards_per_view(cards_per_view),
        }
    }
}

fn price_label(price: &Price) -> Option<String> {
    if price.is_suppressed() {
        return None;
    }
    Some(match price {
        Price::Amount(amount) => format!("${amount}"),
        Price::Display(s) => s.clone(),
    })
}

fn rating_label(rating: &Rating) -> Option<String> {
    if !rating.is_displayable() {
        return None;
    }
    Some(match rating {
        Rating::Score(score) => format!("{score:.1}"),
        Rating::Label(label) => label.clone(),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

impl CardView {
    /// Compact plain-text rendering, one field per line.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "  category: {}", self.category);
        if let Some(price) = &self.price_label {
            let _ = writeln!(out, "  price:    {price}");
        }
        if let Some(rating) = &self.rating_label {
            let _ = writeln!(out, "  rating:   {rating}");
        }
        if let Some(company) = &self.company_name {
            let _ = writeln!(out, "  supplier: {company}");
        }
        if let Some(location) = &self.location {
            let _ = writeln!(out, "  location: {location}");
        }
        match &self.image {
            CardImage::Thumbnail { src, .. } => {
                let _ = writeln!(out, "  image:    {src}");
            }
            CardImage::Placeholder => {
                let _ = writeln!(out, "  image:    [no image]");
            }
        }
        if let CallToAction::Link { href } = &self.call_to_action {
            let _ = writeln!(out, "  details:  {href}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use marketlens_core::ProductId;

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::Int(1),
            title: "Jute Shopping Bag".to_owned(),
            category: "Kolkata".to_owned(),
            price: Price::Display("₹ 45/Piece".to_owned()),
            thumbnail: "https://img.example.com/jute.jpg".to_owned(),
            rating: None,
            brand: Some("Eco Bags Co".to_owned()),
            description: Some("MOQ: 100".to_owned()),
            pdp_url: Some("https://m.example.com/proddetail/1".to_owned()),
            company_name: Some("Eco Bags Co".to_owned()),
            location: Some("Kolkata".to_owned()),
        }
    }

    #[test]
    fn display_price_is_shown_verbatim() {
        let view = ProductCard::new(product()).render(3);
        assert_eq!(view.price_label.as_deref(), Some("₹ 45/Piece"));
    }

    #[test]
    fn empty_display_price_is_kept_verbatim() {
        let mut p = product();
        p.price = Price::Display(String::new());
        assert_eq!(ProductCard::new(p).render(3).price_label.as_deref(), Some(""));
    }

    #[test]
    fn category_is_rendered_verbatim() {
        let view = ProductCard::new(product()).render(3);
        assert_eq!(view.category, "Kolkata");
        assert!(view.to_text().contains("  category: Kolkata\n"));

        let mut p = product();
        p.category = "Unnamed Product".to_owned();
        let view = ProductCard::new(p).render(1);
        assert_eq!(view.category, "Unnamed Product");
        assert!(view.to_text().contains("  category: Unnamed Product\n"));
    }

    #[test]
    fn zero_amount_price_is_suppressed() {
        let mut p = product();
        p.price = Price::Amount(0.0);
        assert_eq!(ProductCard::new(p).render(3).price_label, None);
    }

    #[test]
    fn non_zero_amount_gets_currency_marker() {
        let mut p = product();
        p.price = Price::Amount(9.99);
        assert_eq!(
            ProductCard::new(p.clone()).render(3).price_label.as_deref(),
            Some("$9.99")
        );
        p.price = Price::Amount(120.0);
        assert_eq!(
            ProductCard::new(p).render(3).price_label.as_deref(),
            Some("$120")
        );
    }

    #[test]
    fn rating_renders_only_when_present_and_non_zero() {
        let mut p = product();
        assert_eq!(ProductCard::new(p.clone()).render(1).rating_label, None);

        p.rating = Some(Rating::Score(0.0));
        assert_eq!(ProductCard::new(p.clone()).render(1).rating_label, None);

        p.rating = Some(Rating::Score(4.26));
        assert_eq!(
            ProductCard::new(p.clone()).render(1).rating_label.as_deref(),
            Some("4.3")
        );

        p.rating = Some(Rating::Label("Unnamed Product".to_owned()));
        assert_eq!(
            ProductCard::new(p).render(1).rating_label.as_deref(),
            Some("Unnamed Product")
        );
    }

    #[test]
    fn blank_secondary_fields_are_hidden() {
        let mut p = product();
        p.company_name = Some("  ".to_owned());
        p.location = None;
        let view = ProductCard::new(p).render(2);
        assert_eq!(view.company_name, None);
        assert_eq!(view.location, None);
    }

    #[test]
    fn call_to_action_is_inert_without_detail_url() {
        let mut p = product();
        assert_eq!(
            ProductCard::new(p.clone()).render(1).call_to_action,
            CallToAction::Link {
                href: "https://m.example.com/proddetail/1".to_owned()
            }
        );
        p.pdp_url = None;
        assert_eq!(
            ProductCard::new(p).render(1).call_to_action,
            CallToAction::Inert
        );
    }

    #[test]
    fn image_failure_latches_placeholder() {
        let mut card = ProductCard::new(product());
        assert!(matches!(card.render(3).image, CardImage::Thumbnail { .. }));

        card.mark_image_failed();
        card.mark_image_failed();
        assert!(card.image_failed());
        assert_eq!(card.render(3).image, CardImage::Placeholder);
        assert_eq!(card.render(1).image, CardImage::Placeholder);
    }

    #[test]
    fn image_failure_does_not_affect_sibling_cards() {
        let mut failing = ProductCard::new(product());
        let sibling = ProductCard::new(product());
        failing.mark_image_failed();
        assert!(!sibling.image_failed());
        assert!(matches!(sibling.render(3).image, CardImage::Thumbnail { .. }));
    }

    #[test]
    fn empty_thumbnail_uses_placeholder() {
        let mut p = product();
        p.thumbnail = String::new();
        assert_eq!(ProductCard::new(p).render(3).image, CardImage::Placeholder);
    }

    #[test]
    fn sizing_splits_width_and_gutter() {
        let one = CardSizing::for_cards_per_view(1);
        assert!((one.width_percent - 100.0).abs() < f64::EPSILON);
        assert!(one.gutter_px.abs() < f64::EPSILON);

        let three = CardSizing::for_cards_per_view(3);
        assert!((three.width_percent - 100.0 / 3.0).abs() < 1e-9);
        assert!((three.gutter_px - 8.0).abs() < 1e-9);
        assert_eq!(CardSizing::for_cards_per_view(2).css_width(), "calc(50% - 6px)");
    }

    #[test]
    fn to_text_lists_visible_fields() {
        let text = ProductCard::new(product()).render(3).to_text();
        assert!(text.starts_with("Jute Shopping Bag\n"));
        assert!(text.contains("price:    ₹ 45/Piece"));
        assert!(text.contains("supplier: Eco Bags Co"));
        assert!(text.contains("details:  https://m.example.com/proddetail/1"));
        assert!(!text.contains("rating:"));
    }
}
