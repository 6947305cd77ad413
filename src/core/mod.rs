/// Basic implementations of [`AbortSignal`](crate::traits::AbortSignal).
pub mod abort_signal;
/// [`PsoConfig`] type holding the engine's tuning constants.
pub mod config;
/// [`ConfigError`] type for rejecting malformed run configurations.
pub mod error;
/// [`Point`] type for defining a point in the search space.
pub mod point;
/// Random-sampling helpers shared by particles and topologies.
pub mod utils;

pub use abort_signal::{AtomicAbortSignal, CtrlCAbortSignal, NopAbortSignal};
pub use config::PsoConfig;
pub use error::ConfigError;
pub use point::Point;
