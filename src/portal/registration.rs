//! Course registration page: seat availability counters, the cart badge and
//! the section search filter.

use crate::parse::parse_integer;
use crate::surface::{SurfaceFlags, TextSurface};

/// Open seats are "low" at or below this count.
pub const LOW_SEAT_THRESHOLD: i64 = 5;

/// Seat counter rendered as `"available / total"`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatAvailability {
    pub available: i64,
    pub total: i64,
}

impl SeatAvailability {
    pub fn parse(text: &str) -> Option<Self> {
        let (available, total) = text.split_once('/')?;
        Some(Self {
            available: parse_integer(available)?,
            total: parse_integer(total)?,
        })
    }

    /// A section that still has seats, but only a few
    pub fn is_low(&self) -> bool {
        self.available > 0 && self.available <= LOW_SEAT_THRESHOLD
    }

    pub fn is_full(&self) -> bool {
        self.available <= 0
    }
}

/// Set [`SurfaceFlags::HIGHLIGHTED`] on every seat counter that is running
/// low. Returns how many were highlighted.
pub fn highlight_low_seats<S: TextSurface>(counters: &[S]) -> usize {
    let mut highlighted = 0;
    for counter in counters {
        let low = SeatAvailability::parse(&counter.text()).is_some_and(|seats| seats.is_low());
        if low {
            counter.insert_flags(SurfaceFlags::HIGHLIGHTED);
            highlighted += 1;
        }
    }
    highlighted
}

/// Cart heading for `items` entries; `None` while the cart is empty, so the
/// page keeps its own heading.
pub fn cart_title(items: usize) -> Option<String> {
    (items > 0).then(|| format!("Registration Cart ({items})"))
}

/// Rewrite the cart heading for `items` entries. Returns whether it changed.
pub fn update_cart_title(title: &impl TextSurface, items: usize) -> bool {
    match cart_title(items) {
        Some(text) => {
            title.set_text(text);
            true
        }
        None => false,
    }
}

/// A section card in the search results and the surfaces showing its code
/// and title
#[derive(Clone, Debug)]
pub struct SectionCard<S> {
    pub card: S,
    pub code: S,
    pub title: S,
}

/// Case-insensitive substring match against a section's code or title.
/// An empty term matches everything.
pub fn section_matches(code: &str, title: &str, term: &str) -> bool {
    let term = term.to_lowercase();
    code.to_lowercase().contains(&term) || title.to_lowercase().contains(&term)
}

/// Show the cards matching `term` and hide the rest by toggling
/// [`SurfaceFlags::VISIBLE`]. Returns how many cards stay visible.
pub fn filter_sections<S: TextSurface>(sections: &[SectionCard<S>], term: &str) -> usize {
    let mut visible = 0;
    for section in sections {
        if section_matches(&section.code.text(), &section.title.text(), term) {
            section.card.insert_flags(SurfaceFlags::VISIBLE);
            visible += 1;
        } else {
            section.card.remove_flags(SurfaceFlags::VISIBLE);
        }
    }
    visible
}
