//! Option catalog model
//!
//! Mirrors `locations.json` (option groups) and `actors.json` (`{actors: [...]}`).

use serde::{Deserialize, Deserializer, Serialize};
use ugc_types::OptionGroup;

/// One selectable option inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Longer text used in the assembled prompt, preferred over `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_description: Option<String>,
    /// Whether the card starts active in the default layout
    #[serde(default)]
    pub active: bool,
}

impl OptionRecord {
    /// Text used when this option is placed into a prompt
    pub fn prompt_text(&self) -> Option<&str> {
        self.prompt_description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.description.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Ages arrive as numbers or strings depending on the catalog author
fn age_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// A catalog actor (content creator persona)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    #[serde(default, deserialize_with = "age_as_string")]
    pub age: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    /// Prompt text describing the actor
    #[serde(default)]
    pub description: String,
}

/// Wire shape of `actors.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActorList {
    #[serde(default)]
    pub actors: Vec<Actor>,
}

/// Read-only option catalog, loaded once per session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionCatalog {
    pub platforms: Vec<OptionRecord>,
    pub locations: Vec<OptionRecord>,
    pub lighting: Vec<OptionRecord>,
    pub camera: Vec<OptionRecord>,
    pub content_types: Vec<OptionRecord>,
    pub analysis_methods: Vec<OptionRecord>,
    pub creator_ages: Vec<OptionRecord>,
    pub creator_styles: Vec<OptionRecord>,
    pub energy_levels: Vec<OptionRecord>,
    pub tones: Vec<OptionRecord>,
    pub hook_strategies: Vec<OptionRecord>,
    pub conversion_focus: Vec<OptionRecord>,
    pub visual_styles: Vec<OptionRecord>,
    pub actors: Vec<Actor>,
}

impl OptionCatalog {
    /// Attach actors loaded from a separate document
    pub fn with_actors(mut self, actors: ActorList) -> Self {
        self.actors = actors.actors;
        self
    }

    /// Records of an option group. Actors are not option records; see [`Self::actors`].
    pub fn group(&self, group: OptionGroup) -> &[OptionRecord] {
        match group {
            OptionGroup::ContentType => &self.content_types,
            OptionGroup::AnalysisMethod => &self.analysis_methods,
            OptionGroup::CreatorAge => &self.creator_ages,
            OptionGroup::CreatorStyle => &self.creator_styles,
            OptionGroup::CharacterArchetype => &[],
            OptionGroup::EnergyLevel => &self.energy_levels,
            OptionGroup::Tone => &self.tones,
            OptionGroup::Platform => &self.platforms,
            OptionGroup::Location => &self.locations,
            OptionGroup::Lighting => &self.lighting,
            OptionGroup::CameraStyle => &self.camera,
            OptionGroup::HookStrategy => &self.hook_strategies,
            OptionGroup::ConversionFocus => &self.conversion_focus,
            OptionGroup::VisualStyle => &self.visual_styles,
        }
    }

    pub fn find(&self, group: OptionGroup, id: &str) -> Option<&OptionRecord> {
        self.group(group).iter().find(|r| r.id == id)
    }

    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Total number of records across all groups plus actors
    pub fn len(&self) -> usize {
        OptionGroup::ALL
            .iter()
            .map(|g| self.group(*g).len())
            .sum::<usize>()
            + self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_prefers_prompt_description() {
        let record = OptionRecord {
            id: "cafe".to_string(),
            name: "Cafe".to_string(),
            description: Some("coffee shop".to_string()),
            icon: None,
            prompt_description: Some("a cozy cafe with warm wood tones".to_string()),
            active: false,
        };
        assert_eq!(record.prompt_text(), Some("a cozy cafe with warm wood tones"));

        let bare = OptionRecord {
            prompt_description: Some(String::new()),
            ..record
        };
        assert_eq!(bare.prompt_text(), Some("coffee shop"));
    }

    #[test]
    fn test_actor_age_accepts_number_or_string() {
        let json = r#"{"actors": [
            {"name": "Jake", "age": 24, "description": "a young man"},
            {"name": "Maya", "age": "30s", "description": "a woman"}
        ]}"#;
        let list: ActorList = serde_json::from_str(json).unwrap();
        assert_eq!(list.actors[0].age, "24");
        assert_eq!(list.actors[1].age, "30s");
    }

    #[test]
    fn test_missing_groups_default_to_empty() {
        let catalog: OptionCatalog =
            serde_json::from_str(r#"{"lighting": [{"id": "natural", "name": "Natural"}]}"#).unwrap();
        assert_eq!(catalog.group(OptionGroup::Lighting).len(), 1);
        assert!(catalog.group(OptionGroup::Location).is_empty());
        assert!(catalog.find(OptionGroup::Lighting, "natural").is_some());
        assert_eq!(catalog.len(), 1);
    }
}
