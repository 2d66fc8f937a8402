//! HTTP client for the analysis server

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use ugc_types::{
    ActorAnalysis, AnalysisKind, AnalysisOutcome, Error, ProductAnalysis, Result, SceneAnalysis,
};

use crate::upload::ImageUpload;
use crate::wire::{AnalyzeRequest, AnalyzeResponse};

/// Remote image analysis
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze_product(&self, image: &ImageUpload) -> Result<ProductAnalysis>;

    async fn analyze_actor(&self, image: &ImageUpload) -> Result<ActorAnalysis>;

    async fn analyze_scene(&self, image: &ImageUpload) -> Result<SceneAnalysis>;

    /// Dispatch by kind
    async fn analyze(&self, kind: AnalysisKind, image: &ImageUpload) -> Result<AnalysisOutcome> {
        Ok(match kind {
            AnalysisKind::Product => AnalysisOutcome::Product(self.analyze_product(image).await?),
            AnalysisKind::Actor => AnalysisOutcome::Actor(self.analyze_actor(image).await?),
            AnalysisKind::Scene => AnalysisOutcome::Scene(self.analyze_scene(image).await?),
        })
    }
}

/// [`ImageAnalyzer`] backed by `POST {base_url}/analyze*`
pub struct HttpAnalyzer {
    client: Client,
    base_url: String,
}

impl HttpAnalyzer {
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, kind: AnalysisKind) -> String {
        format!("{}{}", self.base_url, kind.endpoint())
    }

    async fn post(&self, kind: AnalysisKind, image: &ImageUpload) -> Result<AnalyzeResponse> {
        let url = self.endpoint_url(kind);
        debug!("POST {} ({} bytes)", url, image.size);

        let resp = self
            .client
            .post(&url)
            .json(&AnalyzeRequest {
                image: &image.data_uri,
            })
            .send()
            .await
            .map_err(|e| Error::Network(format!("{} analysis request failed: {}", kind.label(), e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("{} analysis read failed: {}", kind.label(), e)))?;

        let body: AnalyzeResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(Error::Remote(format!("Invalid analysis response: {}", e)));
            }
            Err(_) => AnalyzeResponse::default(),
        };

        if !status.is_success() || !body.success {
            let message = body
                .error
                .unwrap_or_else(|| format!("Analysis failed (HTTP {})", status.as_u16()));
            warn!("{} analysis failed: {}", kind.label(), message);
            return Err(Error::Remote(message));
        }

        info!("{} analysis complete", kind.label());
        Ok(body)
    }
}

fn missing(field: &str) -> Error {
    Error::Remote(format!("Analysis response is missing `{}`", field))
}

#[async_trait]
impl ImageAnalyzer for HttpAnalyzer {
    async fn analyze_product(&self, image: &ImageUpload) -> Result<ProductAnalysis> {
        self.post(AnalysisKind::Product, image)
            .await?
            .analysis
            .ok_or_else(|| missing("analysis"))
    }

    async fn analyze_actor(&self, image: &ImageUpload) -> Result<ActorAnalysis> {
        self.post(AnalysisKind::Actor, image)
            .await?
            .actor_analysis
            .ok_or_else(|| missing("actor_analysis"))
    }

    async fn analyze_scene(&self, image: &ImageUpload) -> Result<SceneAnalysis> {
        self.post(AnalysisKind::Scene, image)
            .await?
            .scene_analysis
            .ok_or_else(|| missing("scene_analysis"))
    }
}
