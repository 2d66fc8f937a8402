//! Application layer for UGC Prompt Studio
//!
//! [`studio::Studio`] is the session object both front-ends drive.

pub mod catalog;
pub mod config;
pub mod notice;
pub mod studio;

pub use catalog::{
    is_catalog_dir, load_catalog_or_empty, load_faq_or_empty, local_source, DirectoryCatalog,
    EmbeddedCatalog, RemoteCatalog,
};
pub use config::Config;
pub use notice::{Notice, NoticeBoard, NoticeKind, SaveIndicator, SaveStatus};
pub use studio::{AnalysisTicket, Studio, StudioEvent};
