pub mod effect;
pub mod runtime;
pub mod signal;

pub use effect::{create_effect, Effect};
pub use runtime::batch;
pub use signal::{create_signal, Signal};
