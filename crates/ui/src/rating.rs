//! Five-star rating widget.
//!
//! [`RatingInput`] is fully controlled: it never stores a selection of its
//! own. The caller passes the current rating in and receives the new value
//! through a callback.

use feedback_core::review::{ALL_RATINGS, MAX_RATING, MIN_RATING};

/// One selectable star as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    /// Rating reported when this star is chosen (1-indexed).
    pub value: u8,
    /// Whether the star is lit for the current rating.
    pub filled: bool,
    /// Accessible label, e.g. `Rate 3 stars`.
    pub label: String,
}

/// Keyboard input the widget understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Digit(u8),
}

/// Stateless star rating control. `0` means nothing selected yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingInput {
    rating: u8,
    disabled: bool,
}

impl RatingInput {
    pub fn new(rating: u8) -> Self {
        Self {
            rating,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The five units to render, lowest first.
    pub fn stars(&self) -> Vec<Star> {
        ALL_RATINGS
            .iter()
            .map(|&value| Star {
                value,
                filled: value <= self.rating,
                label: format!("Rate {value} stars"),
            })
            .collect()
    }

    /// Pointer selection of star `value`.
    ///
    /// Fires `on_change(value)` unless the widget is disabled or `value` is
    /// not a star.
    pub fn click(&self, value: u8, on_change: impl FnOnce(u8)) {
        if self.disabled || !(MIN_RATING..=MAX_RATING).contains(&value) {
            return;
        }
        on_change(value);
    }

    /// Keyboard interaction. Arrows step and clamp to 1..=5; from the unset
    /// state any arrow lands on 1.
    pub fn key(&self, key: RatingKey, on_change: impl FnOnce(u8)) {
        if self.disabled {
            return;
        }

        let next = match key {
            RatingKey::ArrowRight | RatingKey::ArrowUp => Some(self.rating.saturating_add(1)),
            RatingKey::ArrowLeft | RatingKey::ArrowDown => Some(self.rating.saturating_sub(1)),
            RatingKey::Home => Some(MIN_RATING),
            RatingKey::End => Some(MAX_RATING),
            RatingKey::Digit(d) if (MIN_RATING..=MAX_RATING).contains(&d) => Some(d),
            RatingKey::Digit(_) => None,
        };

        if let Some(next) = next {
            on_change(next.clamp(MIN_RATING, MAX_RATING));
        }
    }
}

/// Encouragement line shown under the stars once a rating is picked.
pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        5 => Some("Excellent! We're thrilled!"),
        4 => Some("Great! Thank you!"),
        3 => Some("Thanks for your honest feedback"),
        2 => Some("We'll work to do better"),
        1 => Some("We're sorry to hear that"),
        _ => None,
    }
}
