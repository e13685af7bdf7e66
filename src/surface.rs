//! Display surfaces that count-up runs write into.
//!
//! A surface is anything that can show a line of text. Besides the text, every
//! surface carries a small set of [`SurfaceFlags`] that describe its state
//! declaratively (animating, highlighted, ...). Presentation code observes the
//! text and flags instead of the animation code touching styles directly.
//!
//! ```ignore
//! let balance = Label::new("$1,234.50");
//!
//! // Presentation layer: re-render whenever the text changes
//! let _render = create_effect({
//!     let balance = balance.clone();
//!     move || println!("balance: {}", balance.text_signal().get())
//! });
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use bitflags::bitflags;

use crate::reactive::Signal;

bitflags! {
    /// Declarative state of a display surface
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        /// A count-up run is currently writing to the surface
        const ANIMATING   = 0b0001;
        /// The surface has been revealed by its page
        const VISIBLE     = 0b0010;
        /// The value deserves attention (e.g. few seats left)
        const HIGHLIGHTED = 0b0100;
        /// The value signals a problem (e.g. an account hold)
        const WARNING     = 0b1000;
    }
}

/// Unique identifier for each display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Create a new unique surface ID.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        SurfaceId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value (for debugging/logging).
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A writable text surface.
///
/// Clones of a surface must refer to the same underlying display, since the
/// animator keeps a clone for the lifetime of a run.
pub trait TextSurface {
    fn surface_id(&self) -> SurfaceId;

    fn text(&self) -> String;

    fn set_text(&self, text: String);

    fn flags(&self) -> SurfaceFlags;

    fn set_flags(&self, flags: SurfaceFlags);

    fn insert_flags(&self, flags: SurfaceFlags) {
        self.set_flags(self.flags() | flags);
    }

    fn remove_flags(&self, flags: SurfaceFlags) {
        self.set_flags(self.flags() - flags);
    }
}

/// A text surface backed by reactive signals.
#[derive(Clone)]
pub struct Label {
    id: SurfaceId,
    text: Signal<String>,
    flags: Signal<SurfaceFlags>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: SurfaceId::next(),
            text: Signal::new(text.into()),
            flags: Signal::new(SurfaceFlags::empty()),
        }
    }

    /// The signal holding the displayed text, for effects to subscribe to.
    pub fn text_signal(&self) -> &Signal<String> {
        &self.text
    }

    /// The signal holding the surface flags.
    pub fn flags_signal(&self) -> &Signal<SurfaceFlags> {
        &self.flags
    }
}

impl std::fmt::Debug for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("text", &self.text.get_untracked())
            .field("flags", &self.flags.get_untracked())
            .finish()
    }
}

impl TextSurface for Label {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn text(&self) -> String {
        self.text.get_untracked()
    }

    fn set_text(&self, text: String) {
        self.text.set(text);
    }

    fn flags(&self) -> SurfaceFlags {
        self.flags.get_untracked()
    }

    fn set_flags(&self, flags: SurfaceFlags) {
        self.flags.set(flags);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::create_effect;

    #[test]
    fn test_surface_ids_are_unique() {
        let a = SurfaceId::next();
        let b = SurfaceId::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_label_clone_shares_display() {
        let label = Label::new("$0.00");
        let clone = label.clone();
        clone.set_text("$5.00".to_string());
        assert_eq!(label.text(), "$5.00");
        assert_eq!(label.surface_id(), clone.surface_id());
    }

    #[test]
    fn test_flag_helpers() {
        let label = Label::new("12");
        label.insert_flags(SurfaceFlags::ANIMATING | SurfaceFlags::VISIBLE);
        label.remove_flags(SurfaceFlags::ANIMATING);
        assert_eq!(label.flags(), SurfaceFlags::VISIBLE);
    }

    #[test]
    fn test_effect_observes_label_text() {
        let label = Label::new("0");
        let rendered = Rc::new(RefCell::new(Vec::new()));

        let _effect = {
            let label = label.clone();
            let rendered = rendered.clone();
            create_effect(move || rendered.borrow_mut().push(label.text_signal().get()))
        };
        label.set_text("7".to_string());

        assert_eq!(*rendered.borrow(), vec!["0", "7"]);
    }
}
