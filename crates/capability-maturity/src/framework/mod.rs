//! The domain → category → process taxonomy assessments are scored against.

mod loader;
mod model;
mod standard;

pub use loader::FrameworkError;
pub use model::{Category, Domain, Framework, Process};
