//! Secret key handling shared by all providers.

mod model;

pub use model::*;
