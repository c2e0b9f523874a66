//! Windowed, width-responsive presentation of canonical products.
//!
//! [`Carousel`] tracks which slice of a product list is visible and how far
//! it may scroll; [`ProductCard`] turns one product into a [`CardView`] with
//! its own image-failure fallback; [`Viewport`] publishes width changes to
//! attached carousels.

pub mod card;
pub mod carousel;
pub mod viewport;

pub use card::{CallToAction, CardImage, CardSizing, CardView, ProductCard};
pub use carousel::{cards_per_view_for_width, Carousel, Indicator};
pub use viewport::{Viewport, ViewportSubscription};
