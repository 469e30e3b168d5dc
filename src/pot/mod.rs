//! Brew resources and request dispatch
//!
//! Pots are created from configuration at startup, kept in a
//! [`PotRegistry`], and driven by [`BrewHandler`] for every `POST` or `BREW`
//! request.

pub mod handler;
pub mod registry;
pub mod state;

pub use handler::{BrewHandler, Command};
pub use registry::{PotHandle, PotRegistry};
pub use state::{Brew, BrewError, Pot, PotKind, PotStatus};
