//! Option selection state

use serde::{Deserialize, Serialize};
use tracing::debug;
use ugc_types::{OptionGroup, CUSTOM_SCENE};

use crate::model::OptionCatalog;

/// Selected value per option group.
///
/// Deserializing a partial object keeps defaults for the missing fields, which
/// gives restore its shallow-merge behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionState {
    pub content_type: String,
    pub analysis_method: String,
    pub creator_age: String,
    pub creator_style: String,
    pub character_archetype: String,
    pub energy_level: String,
    pub tone: String,
    pub platform: String,
    pub location: String,
    pub lighting: String,
    pub camera_style: String,
    pub hook_strategy: String,
    pub conversion_focus: String,
    pub visual_style: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            content_type: "unboxing".to_string(),
            analysis_method: "upload".to_string(),
            creator_age: "young_adult".to_string(),
            creator_style: "authentic".to_string(),
            character_archetype: "Jake".to_string(),
            energy_level: "moderate".to_string(),
            tone: "conversational".to_string(),
            platform: "tiktok".to_string(),
            location: "office".to_string(),
            lighting: "natural".to_string(),
            camera_style: "handheld".to_string(),
            hook_strategy: "problem_solution".to_string(),
            conversion_focus: "consideration".to_string(),
            visual_style: "minimal".to_string(),
        }
    }
}

/// A renderable option card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCard {
    pub value: String,
    pub name: String,
    pub detail: Option<String>,
    pub active: bool,
}

impl SelectionState {
    fn field_mut(&mut self, group: OptionGroup) -> &mut String {
        match group {
            OptionGroup::ContentType => &mut self.content_type,
            OptionGroup::AnalysisMethod => &mut self.analysis_method,
            OptionGroup::CreatorAge => &mut self.creator_age,
            OptionGroup::CreatorStyle => &mut self.creator_style,
            OptionGroup::CharacterArchetype => &mut self.character_archetype,
            OptionGroup::EnergyLevel => &mut self.energy_level,
            OptionGroup::Tone => &mut self.tone,
            OptionGroup::Platform => &mut self.platform,
            OptionGroup::Location => &mut self.location,
            OptionGroup::Lighting => &mut self.lighting,
            OptionGroup::CameraStyle => &mut self.camera_style,
            OptionGroup::HookStrategy => &mut self.hook_strategy,
            OptionGroup::ConversionFocus => &mut self.conversion_focus,
            OptionGroup::VisualStyle => &mut self.visual_style,
        }
    }

    pub fn get(&self, group: OptionGroup) -> &str {
        match group {
            OptionGroup::ContentType => &self.content_type,
            OptionGroup::AnalysisMethod => &self.analysis_method,
            OptionGroup::CreatorAge => &self.creator_age,
            OptionGroup::CreatorStyle => &self.creator_style,
            OptionGroup::CharacterArchetype => &self.character_archetype,
            OptionGroup::EnergyLevel => &self.energy_level,
            OptionGroup::Tone => &self.tone,
            OptionGroup::Platform => &self.platform,
            OptionGroup::Location => &self.location,
            OptionGroup::Lighting => &self.lighting,
            OptionGroup::CameraStyle => &self.camera_style,
            OptionGroup::HookStrategy => &self.hook_strategy,
            OptionGroup::ConversionFocus => &self.conversion_focus,
            OptionGroup::VisualStyle => &self.visual_style,
        }
    }

    /// Set the selected value of one group. Other groups are untouched.
    pub fn select(&mut self, group: OptionGroup, value: &str) {
        debug!("select {} = {}", group.key(), value);
        *self.field_mut(group) = value.to_string();
    }

    pub fn is_selected(&self, group: OptionGroup, value: &str) -> bool {
        self.get(group) == value
    }

    /// Cards for a group with the active flag set on the selected one.
    ///
    /// Actor cards come from the actor list; the custom scene sentinel is not
    /// listed among location cards.
    pub fn cards(&self, group: OptionGroup, catalog: &OptionCatalog) -> Vec<OptionCard> {
        if group == OptionGroup::CharacterArchetype {
            return catalog
                .actors
                .iter()
                .map(|actor| OptionCard {
                    value: actor.name.clone(),
                    name: actor.name.clone(),
                    detail: Some(format!("{} · {}", actor.age, actor.role)),
                    active: self.is_selected(group, &actor.name),
                })
                .collect();
        }

        catalog
            .group(group)
            .iter()
            .filter(|r| !(group == OptionGroup::Location && r.id == CUSTOM_SCENE))
            .map(|r| OptionCard {
                value: r.id.clone(),
                name: r.name.clone(),
                detail: r.description.clone(),
                active: self.is_selected(group, &r.id),
            })
            .collect()
    }
}
