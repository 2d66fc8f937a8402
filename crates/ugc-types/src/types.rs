//! Shared domain types: wizard steps, option groups, analysis payloads

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::ValidationError;

/// Reserved option id: use the analyzed actor instead of a catalog actor
pub const CUSTOM_ACTOR: &str = "custom_actor";

/// Reserved option id: use the analyzed scene instead of a catalog location
pub const CUSTOM_SCENE: &str = "custom_scene";

/// Deserialize null as default value
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// The five ordered stages of the guided flow
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Product,
    Actor,
    Visual,
    Hook,
    Generate,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Product,
        WizardStep::Actor,
        WizardStep::Visual,
        WizardStep::Hook,
        WizardStep::Generate,
    ];

    /// Position in the fixed order (0..=4)
    pub fn index(self) -> usize {
        match self {
            WizardStep::Product => 0,
            WizardStep::Actor => 1,
            WizardStep::Visual => 2,
            WizardStep::Hook => 3,
            WizardStep::Generate => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn first() -> Self {
        Self::ALL[0]
    }

    pub fn last() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Stable key used in persisted snapshots
    pub fn key(self) -> &'static str {
        match self {
            WizardStep::Product => "product",
            WizardStep::Actor => "actor",
            WizardStep::Visual => "visual",
            WizardStep::Hook => "hook",
            WizardStep::Generate => "generate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Product => "Product",
            WizardStep::Actor => "Actor",
            WizardStep::Visual => "Visual",
            WizardStep::Hook => "Hook",
            WizardStep::Generate => "Generate",
        }
    }

    /// Short hint shown next to the navigation button
    pub fn hint(self) -> &'static str {
        match self {
            WizardStep::Product => "Define your product and analysis method",
            WizardStep::Actor => "Choose your content creator",
            WizardStep::Visual => "Set visual and technical parameters",
            WizardStep::Hook => "Create compelling hooks and messages",
            WizardStep::Generate => "Generate your final UGC prompt",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for WizardStep {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WizardStep::ALL
            .iter()
            .copied()
            .find(|step| step.key() == s.trim().to_lowercase())
            .ok_or_else(|| ValidationError::UnknownStep(s.to_string()))
    }
}

/// Option groups a user can select a value in.
///
/// Each group is declared where its cards are registered; selection routing
/// never depends on display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionGroup {
    ContentType,
    AnalysisMethod,
    CreatorAge,
    CreatorStyle,
    CharacterArchetype,
    EnergyLevel,
    Tone,
    Platform,
    Location,
    Lighting,
    CameraStyle,
    HookStrategy,
    ConversionFocus,
    VisualStyle,
}

impl OptionGroup {
    pub const ALL: [OptionGroup; 14] = [
        OptionGroup::ContentType,
        OptionGroup::AnalysisMethod,
        OptionGroup::CreatorAge,
        OptionGroup::CreatorStyle,
        OptionGroup::CharacterArchetype,
        OptionGroup::EnergyLevel,
        OptionGroup::Tone,
        OptionGroup::Platform,
        OptionGroup::Location,
        OptionGroup::Lighting,
        OptionGroup::CameraStyle,
        OptionGroup::HookStrategy,
        OptionGroup::ConversionFocus,
        OptionGroup::VisualStyle,
    ];

    /// Key used in the `selectedOptions` object of a snapshot
    pub fn key(self) -> &'static str {
        match self {
            OptionGroup::ContentType => "contentType",
            OptionGroup::AnalysisMethod => "analysisMethod",
            OptionGroup::CreatorAge => "creatorAge",
            OptionGroup::CreatorStyle => "creatorStyle",
            OptionGroup::CharacterArchetype => "characterArchetype",
            OptionGroup::EnergyLevel => "energyLevel",
            OptionGroup::Tone => "tone",
            OptionGroup::Platform => "platform",
            OptionGroup::Location => "location",
            OptionGroup::Lighting => "lighting",
            OptionGroup::CameraStyle => "cameraStyle",
            OptionGroup::HookStrategy => "hookStrategy",
            OptionGroup::ConversionFocus => "conversionFocus",
            OptionGroup::VisualStyle => "visualStyle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OptionGroup::ContentType => "Content Type",
            OptionGroup::AnalysisMethod => "Analysis Method",
            OptionGroup::CreatorAge => "Creator Age",
            OptionGroup::CreatorStyle => "Creator Style",
            OptionGroup::CharacterArchetype => "Character",
            OptionGroup::EnergyLevel => "Energy Level",
            OptionGroup::Tone => "Tone",
            OptionGroup::Platform => "Platform",
            OptionGroup::Location => "Location",
            OptionGroup::Lighting => "Lighting",
            OptionGroup::CameraStyle => "Camera Style",
            OptionGroup::HookStrategy => "Hook Strategy",
            OptionGroup::ConversionFocus => "Conversion Focus",
            OptionGroup::VisualStyle => "Visual Style",
        }
    }
}

/// Which external analysis a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Product,
    Actor,
    Scene,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [AnalysisKind::Product, AnalysisKind::Actor, AnalysisKind::Scene];

    /// Endpoint path on the analysis server
    pub fn endpoint(self) -> &'static str {
        match self {
            AnalysisKind::Product => "/analyze",
            AnalysisKind::Actor => "/analyze-actor",
            AnalysisKind::Scene => "/analyze-scene",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::Product => "product",
            AnalysisKind::Actor => "actor",
            AnalysisKind::Scene => "scene",
        }
    }
}

/// Product analysis returned by `/analyze` (or built from a manual description)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAnalysis {
    #[serde(default, deserialize_with = "null_to_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub product_type: String,
    pub detailed_description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub key_features: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub suggested_setting: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub emotional_appeal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
}

impl ProductAnalysis {
    /// Build a product analysis from manually entered text
    pub fn manual(product_name: &str, description: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            product_type: "Manual Entry".to_string(),
            detailed_description: description.to_string(),
            key_features: Vec::new(),
            suggested_setting: "Based on description".to_string(),
            emotional_appeal: "User-defined".to_string(),
            visual_style: Some("User-provided description".to_string()),
        }
    }
}

/// Actor analysis returned by `/analyze-actor`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAnalysis {
    pub actor_description: String,
}

/// Scene analysis returned by `/analyze-scene`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneAnalysis {
    pub scene_description: String,
}

/// A completed analysis of any kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Product(ProductAnalysis),
    Actor(ActorAnalysis),
    Scene(SceneAnalysis),
}

impl AnalysisOutcome {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisOutcome::Product(_) => AnalysisKind::Product,
            AnalysisOutcome::Actor(_) => AnalysisKind::Actor,
            AnalysisOutcome::Scene(_) => AnalysisKind::Scene,
        }
    }

    /// Human-readable description carried by every analysis
    pub fn description(&self) -> &str {
        match self {
            AnalysisOutcome::Product(p) => &p.detailed_description,
            AnalysisOutcome::Actor(a) => &a.actor_description,
            AnalysisOutcome::Scene(s) => &s.scene_description,
        }
    }
}

/// All analysis results held by a session. Each slot is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSet {
    pub product: Option<ProductAnalysis>,
    pub actor: Option<ActorAnalysis>,
    pub scene: Option<SceneAnalysis>,
}

impl AnalysisSet {
    pub fn store(&mut self, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Product(p) => self.product = Some(p),
            AnalysisOutcome::Actor(a) => self.actor = Some(a),
            AnalysisOutcome::Scene(s) => self.scene = Some(s),
        }
    }

    pub fn has(&self, kind: AnalysisKind) -> bool {
        match kind {
            AnalysisKind::Product => self.product.is_some(),
            AnalysisKind::Actor => self.actor.is_some(),
            AnalysisKind::Scene => self.scene.is_some(),
        }
    }
}
