//! Catalog loading: built-in data, a directory, or a catalog server

use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use ugc_domain::{ActorList, CatalogSource, FaqSection, OptionCatalog};
use ugc_types::{Error, Result};

use crate::config::Config;

const LOCATIONS_JSON: &str = include_str!("../data/locations.json");
const ACTORS_JSON: &str = include_str!("../data/actors.json");
const FAQ_JSON: &str = include_str!("../data/faq.json");

fn parse_catalog(locations: &str, actors: &str) -> Result<OptionCatalog> {
    let catalog: OptionCatalog = serde_json::from_str(locations)?;
    let actors: ActorList = serde_json::from_str(actors)?;
    Ok(catalog.with_actors(actors))
}

/// Catalog compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn load_catalog(&self) -> Result<OptionCatalog> {
        parse_catalog(LOCATIONS_JSON, ACTORS_JSON)
    }

    fn load_faq(&self) -> Result<Vec<FaqSection>> {
        Ok(serde_json::from_str(FAQ_JSON)?)
    }
}

/// Catalog files on disk. A missing `faq.json` falls back to the built-in FAQ.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

impl CatalogSource for DirectoryCatalog {
    fn load_catalog(&self) -> Result<OptionCatalog> {
        parse_catalog(&self.read("locations.json")?, &self.read("actors.json")?)
    }

    fn load_faq(&self) -> Result<Vec<FaqSection>> {
        if !self.dir.join("faq.json").exists() {
            return EmbeddedCatalog.load_faq();
        }
        Ok(serde_json::from_str(&self.read("faq.json")?)?)
    }
}

/// Catalog server exposing `/static/data/locations.json` and `/static/data/actors.json`
pub struct RemoteCatalog {
    client: Client,
    base_url: String,
}

impl RemoteCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, name: &str) -> Result<String> {
        let url = format!("{}/static/data/{}", self.base_url, name);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("{}: {}", url, e)))?;
        if !resp.status().is_success() {
            return Err(Error::Remote(format!("{} returned HTTP {}", url, resp.status().as_u16())));
        }
        resp.text()
            .await
            .map_err(|e| Error::Network(format!("{}: {}", url, e)))
    }

    pub async fn fetch(&self) -> Result<OptionCatalog> {
        let locations = self.get_text("locations.json").await?;
        let actors = self.get_text("actors.json").await?;
        parse_catalog(&locations, &actors)
    }

    /// Fetch, falling back to an empty catalog on any failure
    pub async fn fetch_or_empty(&self) -> Arc<OptionCatalog> {
        match self.fetch().await {
            Ok(catalog) => {
                info!("Loaded catalog from {} ({} records)", self.base_url, catalog.len());
                Arc::new(catalog)
            }
            Err(e) => {
                error!("Catalog fetch failed, using an empty catalog: {}", e);
                Arc::new(OptionCatalog::default())
            }
        }
    }
}

/// Load a catalog, falling back to an empty one on any failure
pub fn load_catalog_or_empty(source: &dyn CatalogSource) -> Arc<OptionCatalog> {
    match source.load_catalog() {
        Ok(catalog) => {
            info!("Loaded catalog ({} records)", catalog.len());
            Arc::new(catalog)
        }
        Err(e) => {
            error!("Catalog load failed, using an empty catalog: {}", e);
            Arc::new(OptionCatalog::default())
        }
    }
}

pub fn load_faq_or_empty(source: &dyn CatalogSource) -> Vec<FaqSection> {
    source.load_faq().unwrap_or_else(|e| {
        warn!("FAQ load failed: {}", e);
        Vec::new()
    })
}

/// The local (non-network) catalog source selected by configuration
pub fn local_source(config: &Config) -> Box<dyn CatalogSource> {
    match &config.catalog_dir {
        Some(dir) => Box::new(DirectoryCatalog::new(dir)),
        None => Box::new(EmbeddedCatalog),
    }
}

/// Whether `dir` looks like a catalog directory
pub fn is_catalog_dir(dir: &Path) -> bool {
    dir.join("locations.json").is_file() && dir.join("actors.json").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugc_domain::SelectionState;
    use ugc_types::{OptionGroup, CUSTOM_SCENE};

    #[test]
    fn test_embedded_catalog_covers_defaults() {
        let catalog = EmbeddedCatalog.load_catalog().unwrap();
        let defaults = SelectionState::default();
        for group in OptionGroup::ALL {
            if group == OptionGroup::CharacterArchetype {
                assert!(catalog.actor(defaults.get(group)).is_some());
            } else {
                assert!(
                    catalog.find(group, defaults.get(group)).is_some(),
                    "default for {} missing",
                    group.key()
                );
            }
        }
        assert_eq!(catalog.actors[0].name, "Jake");
        assert!(catalog.find(OptionGroup::Location, CUSTOM_SCENE).is_some());
    }

    #[test]
    fn test_embedded_faq_parses() {
        let faq = EmbeddedCatalog.load_faq().unwrap();
        assert!(faq.iter().any(|s| s.category == "getting-started"));
        assert!(faq.iter().all(|s| !s.items.is_empty()));
    }

    #[test]
    fn test_missing_directory_falls_back_to_empty() {
        let source = DirectoryCatalog::new("/definitely/not/a/catalog");
        let catalog = load_catalog_or_empty(&source);
        assert!(catalog.is_empty());
        assert!(!is_catalog_dir(Path::new("/definitely/not/a/catalog")));
        // FAQ falls back to the built-in copy
        assert!(!load_faq_or_empty(&source).is_empty());
    }
}
