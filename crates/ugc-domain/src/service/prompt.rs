//! Prompt assembly from selections, catalog and analyses

use ugc_types::{AnalysisSet, OptionGroup, PromptError, CUSTOM_ACTOR, CUSTOM_SCENE};

use crate::model::{FormFields, OptionCatalog, SelectionState};

const FALLBACK_ACTOR: &str = "an authentic content creator speaking naturally to camera";
const FALLBACK_SETTING: &str = "comfortable indoor setting";
const FALLBACK_LIGHTING: &str = "natural lighting";
const FALLBACK_CAMERA: &str = "handheld camera work";

const COLORS: [&str; 11] = [
    "white", "black", "beige", "brown", "blue", "red", "green", "yellow", "gray", "silver", "gold",
];
const MATERIALS: [&str; 6] = ["leather", "suede", "fabric", "metal", "plastic", "rubber"];

/// Borrowed inputs of one assembly
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub selection: &'a SelectionState,
    pub catalog: &'a OptionCatalog,
    pub analyses: &'a AnalysisSet,
    pub form: &'a FormFields,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Summarize colours, materials, brand and comfort cues found in a description
pub fn extract_product_features(description: &str) -> String {
    if description.is_empty() {
        return "the distinctive features".to_string();
    }

    let lower = description.to_lowercase();
    let mut features = Vec::new();

    let colors: Vec<&str> = COLORS.iter().copied().filter(|c| lower.contains(c)).collect();
    if !colors.is_empty() {
        features.push(format!("the {} styling", colors.join(" and ")));
    }

    let materials: Vec<&str> = MATERIALS.iter().copied().filter(|m| lower.contains(m)).collect();
    if !materials.is_empty() {
        features.push(format!("premium {} construction", materials.join(" and ")));
    }

    if lower.contains("nikki") {
        features.push("the distinctive NIKKI branding".to_string());
    } else if lower.contains("nike") {
        features.push("the iconic Nike branding".to_string());
    }

    if lower.contains("cushioned") || lower.contains("comfort") {
        features.push("the enhanced comfort features".to_string());
    }

    if features.is_empty() {
        "the distinctive design and quality craftsmanship".to_string()
    } else {
        features.join(", ")
    }
}

fn product_description<'a>(inputs: &PromptInputs<'a>) -> Result<&'a str, PromptError> {
    inputs
        .analyses
        .product
        .as_ref()
        .and_then(|p| non_empty(&p.detailed_description))
        .or_else(|| non_empty(&inputs.form.manual_description))
        .ok_or(PromptError::MissingProductDescription)
}

fn product_name<'a>(inputs: &PromptInputs<'a>) -> &'a str {
    non_empty(&inputs.form.product_name)
        .or_else(|| {
            inputs
                .analyses
                .product
                .as_ref()
                .and_then(|p| non_empty(&p.product_name))
        })
        .unwrap_or("Unknown")
}

fn actor_description<'a>(inputs: &PromptInputs<'a>) -> &'a str {
    let selected = &inputs.selection.character_archetype;
    if selected == CUSTOM_ACTOR {
        if let Some(actor) = &inputs.analyses.actor {
            return &actor.actor_description;
        }
    }
    inputs
        .catalog
        .actor(selected)
        .or_else(|| inputs.catalog.actors.first())
        .map(|a| a.description.as_str())
        .unwrap_or(FALLBACK_ACTOR)
}

fn setting_description<'a>(inputs: &PromptInputs<'a>) -> &'a str {
    let selected = &inputs.selection.location;
    if selected == CUSTOM_SCENE {
        if let Some(scene) = &inputs.analyses.scene {
            return &scene.scene_description;
        }
    }
    inputs
        .catalog
        .find(OptionGroup::Location, selected)
        .and_then(|r| r.prompt_text())
        .unwrap_or(FALLBACK_SETTING)
}

fn catalog_description<'a>(
    inputs: &PromptInputs<'a>,
    group: OptionGroup,
    fallback: &'a str,
) -> &'a str {
    inputs
        .catalog
        .find(group, inputs.selection.get(group))
        .and_then(|r| r.description.as_deref())
        .unwrap_or(fallback)
}

fn action(content_type: &str, name: &str, features: &str) -> String {
    match content_type {
        "unboxing" => format!(
            "unboxing and revealing the {name} with genuine excitement and surprise reactions, highlighting {features}"
        ),
        "review" => format!(
            "reviewing the {name} with detailed examination and authentic reactions, demonstrating key features and benefits"
        ),
        "demo" => format!(
            "demonstrating the {name} in action, showing practical use cases and highlighting performance"
        ),
        _ => format!("showcasing the {name} with authentic enthusiasm and natural reactions"),
    }
}

fn dialogue(custom_message: &str, hook_strategy: &str, name: &str) -> String {
    if !custom_message.trim().is_empty() {
        return custom_message.to_string();
    }
    match hook_strategy {
        "problem_solution" => "I found the solution everyone's been looking for".to_string(),
        "review" => format!("Here's my honest review of the {name}"),
        _ => format!("Everyone's talking about this {name} - here's why"),
    }
}

/// Assemble the final video prompt. Pure and deterministic.
pub fn build_prompt(inputs: PromptInputs<'_>) -> Result<String, PromptError> {
    let description = product_description(&inputs)?;
    let name = product_name(&inputs);
    let features = extract_product_features(description);

    let setting = setting_description(&inputs);
    let lighting = catalog_description(&inputs, OptionGroup::Lighting, FALLBACK_LIGHTING);
    let camera = catalog_description(&inputs, OptionGroup::CameraStyle, FALLBACK_CAMERA);
    let actor = actor_description(&inputs);
    let action = action(&inputs.selection.content_type, name, &features);
    let dialogue = dialogue(
        &inputs.form.custom_message,
        &inputs.selection.hook_strategy,
        name,
    );

    Ok(format!(
        "PRODUCT (read this exactly; use as visual ground truth):\n\
         {description}\n\
         \n\
         DO NOT SUBSTITUTE ANOTHER PRODUCT. Keep exact branding/text/colors.\n\
         \n\
         UGC advert. Duration 8 seconds. Aspect 9:16.\n\
         Setting: {setting}, {lighting}. Camera: {camera}.\n\
         Actor: {actor}\n\
         Action: {action}\n\
         Dialogue (to camera): {dialogue}\n\
         No Subtitles. Audio: clear voice, faint room tone only."
    ))
}
