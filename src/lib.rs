pub mod animation;
pub mod animator;
pub mod error;
pub mod format;
pub mod parse;
pub mod portal;
pub mod reactive;
pub mod surface;

pub use animator::{Animator, AnimatorConfig, Launch, Reinvoke};
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{CountUp, CountUpOptions, Stepping, Tick};
    pub use crate::animator::{Animator, AnimatorConfig, Launch, Reinvoke};
    pub use crate::format::{Formatter, NumberFormat};
    pub use crate::parse::{parse_currency, parse_decimal, parse_integer};
    pub use crate::reactive::{batch, create_effect, create_signal, Effect, Signal};
    pub use crate::surface::{Label, SurfaceFlags, SurfaceId, TextSurface};
    pub use crate::init_logging;
}

/// Install `env_logger`, configured through `RUST_LOG`.
/// Calling it again after a logger is installed does nothing.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
