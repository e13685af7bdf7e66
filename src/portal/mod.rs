//! Page initializers for the student portal.
//!
//! Each page hands its pre-rendered value surfaces to one of these functions
//! once the page is ready. Values that cannot be parsed are skipped and keep
//! their original text.

pub mod financial;
pub mod grades;
pub mod registration;

use crate::animation::CountUpOptions;
use crate::animator::Animator;
use crate::error::Result;
use crate::surface::{SurfaceFlags, TextSurface};

/// Reveal every surface and animate the ones `parse` accepts.
/// Returns how many surfaces had a parseable value.
pub(crate) fn animate_all<S, P>(
    animator: &mut Animator,
    surfaces: &[S],
    parse: P,
    options: &CountUpOptions,
) -> Result<usize>
where
    S: TextSurface + Clone + 'static,
    P: Fn(&str) -> Option<f64>,
{
    let mut started = 0;
    for surface in surfaces {
        surface.insert_flags(SurfaceFlags::VISIBLE);
        if animator
            .animate_parsed(surface, &parse, options.clone())?
            .is_some()
        {
            started += 1;
        }
    }
    Ok(started)
}
