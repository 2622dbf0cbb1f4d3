//! Domain models for the Kitchen Waste Management platform

mod batch;
mod category;
mod freshness;
mod reconcile;
mod recommendation;
mod waste;

pub use batch::*;
pub use category::*;
pub use freshness::*;
pub use reconcile::*;
pub use recommendation::*;
pub use waste::*;
