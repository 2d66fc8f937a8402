//! Persisted session snapshot

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;
use ugc_types::{
    ActorAnalysis, AnalysisSet, OptionGroup, ProductAnalysis, SceneAnalysis, WizardStep,
};

use crate::model::{FormFields, SelectionState};

/// Defaults overlaid with every group whose saved value is a string
fn lenient_selection<'de, D>(deserializer: D) -> Result<SelectionState, D::Error>
where
    D: Deserializer<'de>,
{
    let mut selection = SelectionState::default();
    let Value::Object(saved) = Value::deserialize(deserializer)? else {
        return Ok(selection);
    };
    for group in OptionGroup::ALL {
        match saved.get(group.key()) {
            Some(Value::String(value)) => selection.select(group, value),
            Some(Value::Null) | None => {}
            Some(other) => warn!("Ignoring saved {} = {}", group.key(), other),
        }
    }
    Ok(selection)
}

/// Unknown or malformed step names fall back to the first step
fn lenient_step<'de, D>(deserializer: D) -> Result<WizardStep, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name.parse().unwrap_or_else(|e| {
            warn!("Ignoring saved step: {}", e);
            WizardStep::default()
        }),
        _ => WizardStep::default(),
    })
}

/// A malformed record is dropped on its own instead of failing the snapshot
fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(serde_json::from_value(value)
            .map_err(|e| warn!("Ignoring saved record: {}", e))
            .ok()),
    }
}

/// Session state written under the auto-save key.
///
/// Field names follow the browser layout so existing saves stay readable.
/// Each field is read on its own, so one bad value only resets that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default, deserialize_with = "lenient_selection")]
    pub selected_options: SelectionState,
    #[serde(default, deserialize_with = "lenient_record")]
    pub analysis_data: Option<ProductAnalysis>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub actor_data: Option<ActorAnalysis>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub scene_data: Option<SceneAnalysis>,
    #[serde(default, deserialize_with = "lenient_step")]
    pub current_tab: WizardStep,
    #[serde(
        default,
        deserialize_with = "lenient_record",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_fields: Option<FormFields>,
}

impl SessionSnapshot {
    pub fn capture(
        selection: &SelectionState,
        analyses: &AnalysisSet,
        current: WizardStep,
        form: &FormFields,
    ) -> Self {
        Self {
            selected_options: selection.clone(),
            analysis_data: analyses.product.clone(),
            actor_data: analyses.actor.clone(),
            scene_data: analyses.scene.clone(),
            current_tab: current,
            form_fields: if form.is_empty() {
                None
            } else {
                Some(form.clone())
            },
        }
    }

    pub fn analyses(&self) -> AnalysisSet {
        AnalysisSet {
            product: self.analysis_data.clone(),
            actor: self.actor_data.clone(),
            scene: self.scene_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_layout_keys() {
        let snap = SessionSnapshot::capture(
            &SelectionState::default(),
            &AnalysisSet::default(),
            WizardStep::Visual,
            &FormFields::default(),
        );
        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["currentTab"], "visual");
        assert_eq!(value["selectedOptions"]["characterArchetype"], "Jake");
        assert!(value["analysisData"].is_null());
        assert!(value.get("formFields").is_none());
    }

    #[test]
    fn test_reads_browser_save_with_partial_selection() {
        let json = r#"{
            "selectedOptions": {"location": "kitchen"},
            "analysisData": null,
            "actorData": {"actor_description": "a tall woman"},
            "sceneData": null,
            "currentTab": "hook"
        }"#;
        let snap: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.selected_options.location, "kitchen");
        assert_eq!(snap.selected_options.lighting, "natural");
        assert_eq!(snap.current_tab, WizardStep::Hook);
        assert!(snap.analyses().actor.is_some());
    }

    #[test]
    fn test_unknown_step_keeps_the_rest_of_the_save() {
        let json = r#"{
            "selectedOptions": {"location": "kitchen", "tone": "excited"},
            "analysisData": {"detailed_description": "Red mug"},
            "actorData": null,
            "sceneData": null,
            "currentTab": "settings"
        }"#;
        let snap: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.current_tab, WizardStep::Product);
        assert_eq!(snap.selected_options.location, "kitchen");
        assert_eq!(snap.selected_options.tone, "excited");
        assert_eq!(
            snap.analysis_data.unwrap().detailed_description,
            "Red mug"
        );
    }

    #[test]
    fn test_null_option_falls_back_per_field() {
        let json = r#"{
            "selectedOptions": {"location": "kitchen", "platform": null, "tone": 3},
            "analysisData": {"product_name": "no description"},
            "currentTab": "visual",
            "formFields": {"productName": "Mug"}
        }"#;
        let snap: SessionSnapshot = serde_json::from_str(json).unwrap();
        let defaults = SelectionState::default();
        assert_eq!(snap.selected_options.location, "kitchen");
        assert_eq!(snap.selected_options.platform, defaults.platform);
        assert_eq!(snap.selected_options.tone, defaults.tone);
        assert_eq!(snap.current_tab, WizardStep::Visual);
        assert!(snap.analysis_data.is_none());
        assert_eq!(snap.form_fields.unwrap().product_name, "Mug");
    }
}
