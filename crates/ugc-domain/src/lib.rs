//! Domain layer for UGC Prompt Studio
//!
//! Models hold session data; services are pure functions and small state
//! machines over those models. Nothing here performs network I/O.

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::CatalogSource;
pub use service::*;
