//! Vision module - upload validation and remote image analysis
//!
//! Analysis itself happens on an external server; this crate only validates
//! and encodes images and speaks the server's JSON protocol.

pub mod client;
pub mod upload;
mod wire;

pub use client::{HttpAnalyzer, ImageAnalyzer};
pub use upload::{is_supported_image, ImageUpload, IMAGE_EXTENSIONS, MAX_UPLOAD_BYTES};
