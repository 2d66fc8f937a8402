//! JSON shapes of the analysis server

use serde::{Deserialize, Serialize};
use ugc_types::{ActorAnalysis, ProductAnalysis, SceneAnalysis};

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub image: &'a str,
}

/// Union of the three endpoint responses; each fills one payload field
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyzeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub analysis: Option<ProductAnalysis>,
    #[serde(default)]
    pub actor_analysis: Option<ActorAnalysis>,
    #[serde(default)]
    pub scene_analysis: Option<SceneAnalysis>,
    #[serde(default)]
    pub error: Option<String>,
}
