//! Carousel view controller.
//!
//! The whole product list stays in one track. `current_index` is the offset
//! of the track in card widths, so every navigation step moves exactly one
//! card regardless of how many cards are visible at once.

use std::ops::Range;
use std::sync::Arc;

use marketlens_core::Product;
use serde::Serialize;

use crate::card::{CardView, ProductCard};
use crate::viewport::ViewportSubscription;

/// Widths below this show one card.
const SINGLE_CARD_BELOW: u32 = 640;
/// Widths below this (and at least [`SINGLE_CARD_BELOW`]) show two cards.
const TWO_CARDS_BELOW: u32 = 1024;

/// Number of cards visible at `width` pixels.
#[must_use]
pub fn cards_per_view_for_width(width: u32) -> usize {
    if width < SINGLE_CARD_BELOW {
        1
    } else if width < TWO_CARDS_BELOW {
        2
    } else {
        3
    }
}

/// One dot of the position indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// Windowed view over one product list.
#[derive(Debug)]
pub struct Carousel {
    products: Arc<[Product]>,
    cards: Vec<ProductCard>,
    viewport_width: u32,
    cards_per_view: usize,
    current_index: usize,
    viewport: Option<ViewportSubscription>,
}

impl Carousel {
    #[must_use]
    pub fn new(products: Arc<[Product]>, viewport_width: u32) -> Self {
        let cards = build_track(&products);
        Self {
            products,
            cards,
            viewport_width,
            cards_per_view: cards_per_view_for_width(viewport_width),
            current_index: 0,
            viewport: None,
        }
    }

    /// Replaces the product list.
    ///
    /// A list with a different identity starts a fresh carousel: index 0 and
    /// new cards with cleared image-failure flags. Reloading the same list
    /// keeps the position.
    pub fn load(&mut self, products: Arc<[Product]>) {
        if Arc::ptr_eq(&self.products, &products) {
            return;
        }
        tracing::debug!(count = products.len(), "carousel loaded new product list");
        self.cards = build_track(&products);
        self.products = products;
        self.current_index = 0;
    }

    /// Applies a viewport width, recomputing cards per view and re-clamping
    /// the index.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
        let cards_per_view = cards_per_view_for_width(width);
        if cards_per_view != self.cards_per_view {
            tracing::debug!(width, cards_per_view, "carousel breakpoint changed");
            self.cards_per_view = cards_per_view;
        }
        self.clamp_index();
    }

    /// Moves forward one card. Returns whether the index moved.
    pub fn advance(&mut self) -> bool {
        self.jump(self.current_index.saturating_add(1))
    }

    /// Moves back one card. Returns whether the index moved.
    pub fn retreat(&mut self) -> bool {
        self.jump(self.current_index.saturating_sub(1))
    }

    /// Moves to `index`, clamped into range. Returns whether the index moved.
    pub fn jump(&mut self, index: usize) -> bool {
        let target = index.min(self.max_index());
        let moved = target != self.current_index;
        self.current_index = target;
        moved
    }

    #[must_use]
    pub fn products(&self) -> &Arc<[Product]> {
        &self.products
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    #[must_use]
    pub fn cards_per_view(&self) -> usize {
        self.cards_per_view
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn max_index(&self) -> usize {
        self.total_items().saturating_sub(self.cards_per_view)
    }

    /// One indicator per reachable index, not one per page.
    #[must_use]
    pub fn indicator_count(&self) -> usize {
        self.max_index() + 1
    }

    #[must_use]
    pub fn indicators(&self) -> Vec<Indicator> {
        (0..self.indicator_count())
            .map(|index| Indicator {
                index,
                active: index == self.current_index,
            })
            .collect()
    }

    /// Navigation and indicators are hidden when everything fits on screen.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.total_items() > self.cards_per_view
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.current_index > 0
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.current_index < self.max_index()
    }

    /// Track translation, in percent of the track container width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn track_offset_percent(&self) -> f64 {
        self.current_index as f64 * (100.0 / self.cards_per_view as f64)
    }

    /// Indices of the cards currently on screen.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.current_index + self.cards_per_view).min(self.total_items());
        self.current_index.min(end)..end
    }

    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    #[must_use]
    pub fn visible_cards(&self) -> &[ProductCard] {
        &self.cards[self.visible_range()]
    }

    /// Mutable access to one card, e.g. to report an image failure.
    pub fn card_mut(&mut self, index: usize) -> Option<&mut ProductCard> {
        self.cards.get_mut(index)
    }

    /// Renders the cards currently on screen.
    #[must_use]
    pub fn render_visible(&self) -> Vec<CardView> {
        self.visible_cards()
            .iter()
            .map(|card| card.render(self.cards_per_view))
            .collect()
    }

    /// Starts following a viewport. The current width is applied at once and
    /// any previous subscription is released.
    pub fn attach(&mut self, mut subscription: ViewportSubscription) {
        let width = subscription.current_width();
        self.viewport = Some(subscription);
        self.set_viewport_width(width);
    }

    /// Stops following the viewport and releases the subscription.
    pub fn detach(&mut self) {
        self.viewport = None;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    /// Applies a pending width change without waiting. Returns whether one
    /// was applied.
    pub fn sync_viewport(&mut self) -> bool {
        let Some(width) = self.viewport.as_mut().and_then(ViewportSubscription::take_change)
        else {
            return false;
        };
        self.set_viewport_width(width);
        true
    }

    /// Waits for the next width change and applies it.
    ///
    /// Returns `None` when detached or once the viewport is gone.
    pub async fn next_viewport_change(&mut self) -> Option<u32> {
        let width = self.viewport.as_mut()?.changed().await?;
        self.set_viewport_width(width);
        Some(width)
    }

    fn clamp_index(&mut self) {
        self.current_index = self.current_index.min(self.max_index());
    }
}

fn build_track(products: &[Product]) -> Vec<ProductCard> {
    products.iter().cloned().map(ProductCard::new).collect()
}
