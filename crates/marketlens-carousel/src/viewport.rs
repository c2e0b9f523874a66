//! Viewport width observation.
//!
//! A [`Viewport`] owns the current width and publishes changes over a
//! `tokio::sync::watch` channel. Each [`ViewportSubscription`] is one
//! receiver; dropping it releases the subscription.

use tokio::sync::watch;

/// Source of viewport width changes.
#[derive(Debug)]
pub struct Viewport {
    tx: watch::Sender<u32>,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32) -> Self {
        let (tx, _rx) = watch::channel(width);
        Self { tx }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        *self.tx.borrow()
    }

    /// Publishes a new width. Returns `false` when the width is unchanged,
    /// in which case subscribers are not woken.
    pub fn resize(&self, width: u32) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == width {
                false
            } else {
                *current = width;
                true
            }
        })
    }

    #[must_use]
    pub fn subscribe(&self) -> ViewportSubscription {
        ViewportSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription to a [`Viewport`].
#[derive(Debug)]
pub struct ViewportSubscription {
    rx: watch::Receiver<u32>,
}

impl ViewportSubscription {
    /// Width as of the last observation, marking it seen.
    pub fn current_width(&mut self) -> u32 {
        *self.rx.borrow_and_update()
    }

    /// Returns the new width if it changed since last seen, without waiting.
    pub fn take_change(&mut self) -> Option<u32> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            Ok(false) | Err(_) => None,
        }
    }

    /// Waits for the next width change. Returns `None` once the viewport
    /// has been dropped.
    pub async fn changed(&mut self) -> Option<u32> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
