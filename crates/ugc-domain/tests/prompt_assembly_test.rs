//! End-to-end prompt assembly against a small catalog

use ugc_domain::{
    build_prompt, Actor, FormFields, OptionCatalog, OptionRecord, PromptInputs, SelectionState,
    SessionSnapshot,
};
use ugc_types::{
    ActorAnalysis, AnalysisSet, OptionGroup, ProductAnalysis, PromptError, SceneAnalysis,
    WizardStep, CUSTOM_ACTOR, CUSTOM_SCENE,
};

fn option(id: &str, description: &str, prompt_description: Option<&str>) -> OptionRecord {
    OptionRecord {
        id: id.to_string(),
        name: id.to_string(),
        description: Some(description.to_string()),
        icon: None,
        prompt_description: prompt_description.map(str::to_string),
        active: false,
    }
}

fn actor(name: &str, description: &str) -> Actor {
    Actor {
        name: name.to_string(),
        age: "25".to_string(),
        role: "Creator".to_string(),
        bio: String::new(),
        image: String::new(),
        description: description.to_string(),
    }
}

fn catalog() -> OptionCatalog {
    OptionCatalog {
        locations: vec![
            option("office", "modern office", Some("a bright modern office with plants")),
            option("kitchen", "home kitchen", None),
        ],
        lighting: vec![option("natural", "soft natural window light", None)],
        camera: vec![option("handheld", "slightly shaky handheld selfie framing", None)],
        actors: vec![
            actor("Jake", "a 24-year-old man with curly hair"),
            actor("Maya", "a 30-year-old woman with a warm smile"),
        ],
        ..Default::default()
    }
}

fn sneaker() -> ProductAnalysis {
    ProductAnalysis {
        product_name: "Air Runner".to_string(),
        product_type: "Sneaker".to_string(),
        detailed_description: "Black leather sneaker with NIKKI branding and cushioned sole"
            .to_string(),
        key_features: vec!["leather".to_string()],
        suggested_setting: "unboxing at a desk".to_string(),
        emotional_appeal: "confidence".to_string(),
        visual_style: None,
    }
}

#[test]
fn test_full_prompt_text() {
    let catalog = catalog();
    let selection = SelectionState::default();
    let analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields::default();

    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();

    let expected = "PRODUCT (read this exactly; use as visual ground truth):\n\
Black leather sneaker with NIKKI branding and cushioned sole\n\
\n\
DO NOT SUBSTITUTE ANOTHER PRODUCT. Keep exact branding/text/colors.\n\
\n\
UGC advert. Duration 8 seconds. Aspect 9:16.\n\
Setting: a bright modern office with plants, soft natural window light. Camera: slightly shaky handheld selfie framing.\n\
Actor: a 24-year-old man with curly hair\n\
Action: unboxing and revealing the Air Runner with genuine excitement and surprise reactions, highlighting the black styling, premium leather construction, the distinctive NIKKI branding, the enhanced comfort features\n\
Dialogue (to camera): I found the solution everyone's been looking for\n\
No Subtitles. Audio: clear voice, faint room tone only.";
    assert_eq!(prompt, expected);
}

#[test]
fn test_prompt_is_deterministic() {
    let catalog = catalog();
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::ContentType, "review");
    let analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields::default();
    let inputs = PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    };
    assert_eq!(build_prompt(inputs).unwrap(), build_prompt(inputs).unwrap());
}

#[test]
fn test_custom_actor_without_analysis_uses_first_actor() {
    let catalog = catalog();
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::CharacterArchetype, CUSTOM_ACTOR);
    let mut analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields::default();

    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.contains("Actor: a 24-year-old man with curly hair\n"));

    analyses.actor = Some(ActorAnalysis {
        actor_description: "a bearded man in a denim jacket".to_string(),
    });
    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.contains("Actor: a bearded man in a denim jacket\n"));
}

#[test]
fn test_custom_scene_and_catalog_fallbacks() {
    let catalog = catalog();
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::Location, CUSTOM_SCENE);
    selection.select(OptionGroup::Lighting, "neon");
    selection.select(OptionGroup::CameraStyle, "drone");
    let mut analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields::default();

    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.contains(
        "Setting: comfortable indoor setting, natural lighting. Camera: handheld camera work."
    ));

    analyses.scene = Some(SceneAnalysis {
        scene_description: "a sunlit loft with exposed brick".to_string(),
    });
    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.contains("Setting: a sunlit loft with exposed brick, natural lighting."));
}

#[test]
fn test_location_without_prompt_description_uses_description() {
    let catalog = catalog();
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::Location, "kitchen");
    let analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields::default();
    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.contains("Setting: home kitchen, "));
}

#[test]
fn test_manual_description_and_empty_actor_catalog() {
    let catalog = OptionCatalog::default();
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::AnalysisMethod, "manual");
    selection.select(OptionGroup::ContentType, "demo");
    selection.select(OptionGroup::HookStrategy, "review");
    let analyses = AnalysisSet::default();
    let form = FormFields {
        product_name: "Desk Lamp".to_string(),
        manual_description: "Matte gray metal desk lamp".to_string(),
        ..Default::default()
    };

    let prompt = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    })
    .unwrap();
    assert!(prompt.starts_with(
        "PRODUCT (read this exactly; use as visual ground truth):\nMatte gray metal desk lamp\n"
    ));
    assert!(prompt.contains("Actor: an authentic content creator speaking naturally to camera\n"));
    assert!(prompt.contains(
        "Action: demonstrating the Desk Lamp in action, showing practical use cases and highlighting performance\n"
    ));
    assert!(prompt.contains("Dialogue (to camera): Here's my honest review of the Desk Lamp\n"));
}

#[test]
fn test_missing_description_is_an_error() {
    let catalog = catalog();
    let selection = SelectionState::default();
    let analyses = AnalysisSet::default();
    let form = FormFields {
        product_name: "Mystery".to_string(),
        ..Default::default()
    };
    let result = build_prompt(PromptInputs {
        selection: &selection,
        catalog: &catalog,
        analyses: &analyses,
        form: &form,
    });
    assert_eq!(result, Err(PromptError::MissingProductDescription));
}

#[test]
fn test_snapshot_round_trip_preserves_selection() {
    let mut selection = SelectionState::default();
    selection.select(OptionGroup::Platform, "instagram");
    selection.select(OptionGroup::CharacterArchetype, "Maya");
    let analyses = AnalysisSet {
        product: Some(sneaker()),
        ..Default::default()
    };
    let form = FormFields {
        target_audience: "runners".to_string(),
        ..Default::default()
    };

    let snap = SessionSnapshot::capture(&selection, &analyses, WizardStep::Hook, &form);
    let json = serde_json::to_string(&snap).unwrap();
    let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.selected_options, selection);
    assert_eq!(restored.current_tab, WizardStep::Hook);
    assert_eq!(restored.analyses(), analyses);
    assert_eq!(restored.form_fields, Some(form));
}
