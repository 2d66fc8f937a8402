//! Source trait for static catalog data

use crate::model::OptionCatalog;
use crate::service::FaqSection;
use ugc_types::Result;

/// Provider of the read-only option catalog and FAQ content
pub trait CatalogSource {
    /// Load option groups and actors
    fn load_catalog(&self) -> Result<OptionCatalog>;

    /// Load FAQ sections
    fn load_faq(&self) -> Result<Vec<FaqSection>>;
}
