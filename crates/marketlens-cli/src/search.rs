//! `search` command: one upstream search rendered as a carousel window.

use std::fmt::Write as _;
use std::sync::Arc;

use marketlens_carousel::{CardView, Carousel, Indicator};
use marketlens_core::AppConfig;
use marketlens_upstream::{SearchClient, SearchWindow, UpstreamSettings};
use serde::Serialize;

/// What the carousel shows for one query at one position.
#[derive(Debug, Serialize)]
pub(crate) struct WindowSnapshot {
    pub query: String,
    pub total: usize,
    pub cards_per_view: usize,
    pub current_index: usize,
    pub max_index: usize,
    pub controls_visible: bool,
    pub track_offset_percent: f64,
    pub indicators: Vec<Indicator>,
    pub cards: Vec<CardView>,
}

impl WindowSnapshot {
    pub(crate) fn capture(query: &str, carousel: &Carousel) -> Self {
        Self {
            query: query.to_owned(),
            total: carousel.total_items(),
            cards_per_view: carousel.cards_per_view(),
            current_index: carousel.current_index(),
            max_index: carousel.max_index(),
            controls_visible: carousel.controls_visible(),
            track_offset_percent: carousel.track_offset_percent(),
            indicators: carousel.indicators(),
            cards: carousel.render_visible(),
        }
    }

    pub(crate) fn to_text(&self) -> String {
        let mut out = String::new();
        if self.total == 0 {
            let _ = writeln!(out, "No products found for \"{}\".", self.query);
            return out;
        }

        let shown_from = self.current_index + 1;
        let shown_to = self.current_index + self.cards.len();
        let _ = writeln!(
            out,
            "{} result(s) for \"{}\", showing {shown_from}-{shown_to}",
            self.total, self.query
        );
        for card in &self.cards {
            out.push('\n');
            out.push_str(&card.to_text());
        }
        if self.controls_visible {
            let dots: String = self
                .indicators
                .iter()
                .map(|i| if i.active { '●' } else { '○' })
                .collect();
            let _ = writeln!(out, "\n{dots}");
        }
        out
    }
}

/// Runs one search and prints the carousel window at `index`.
///
/// # Errors
///
/// Returns an error if the upstream client cannot be built, the upstream
/// call fails, or JSON output cannot be serialized.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    width: u32,
    index: usize,
    json: bool,
) -> anyhow::Result<()> {
    let client = SearchClient::new(&UpstreamSettings::from_app_config(config))?;
    let results = client
        .search_products(query, SearchWindow::first(config.page_size))
        .await?;

    let mut carousel = Carousel::new(Arc::from(results.products), width);
    carousel.jump(index);
    let snapshot = WindowSnapshot::capture(query, &carousel);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", snapshot.to_text());
    }
    Ok(())
}
