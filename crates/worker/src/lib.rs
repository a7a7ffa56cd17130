//! Off-thread execution for work the caller should not wait on.
//!
//! The engine itself is synchronous. The one thing it hands off is releasing
//! large invalidated state (registries, memo tables), via [`retire`].

mod class;
mod retire;
mod spawn;

pub use class::TaskClass;
pub use retire::{Retirement, retire};
pub use spawn::spawn_blocking;
