//! Wizard step panels

use eframe::egui::{self, Color32, RichText, TextEdit, Ui};
use std::time::Instant;
use ugc_domain::{CharCounter, CounterStatus, FormField};
use ugc_types::{AnalysisKind, OptionGroup, CUSTOM_ACTOR, CUSTOM_SCENE};

use crate::analysis::UploadSlot;
use crate::app::StudioApp;

const CARD_SIZE: egui::Vec2 = egui::vec2(180.0, 54.0);

fn counter_label(ui: &mut Ui, counter: CharCounter) {
    let color = match counter.status {
        CounterStatus::Normal => ui.visuals().weak_text_color(),
        CounterStatus::Warning => Color32::from_rgb(234, 179, 8),
        CounterStatus::Error => Color32::from_rgb(239, 68, 68),
    };
    ui.label(RichText::new(counter.to_string()).small().color(color));
}

fn section_title(ui: &mut Ui, title: &str) {
    ui.add_space(10.0);
    ui.label(RichText::new(title).strong().size(15.0));
    ui.add_space(4.0);
}

fn result_frame(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.visuals().faint_bg_color)
        .inner_margin(10.0)
        .corner_radius(4.0)
        .show(ui, add_contents);
}

impl StudioApp {
    /// Grid of selectable option cards for one group
    fn option_cards(&mut self, ui: &mut Ui, group: OptionGroup) {
        section_title(ui, group.label());
        let cards = self.studio.cards(group);
        if cards.is_empty() {
            ui.label(RichText::new("No options available").italics().weak());
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for card in cards {
                let mut text = RichText::new(&card.name);
                if card.active {
                    text = text.strong();
                }
                let mut response = ui.add(
                    egui::Button::new(text)
                        .selected(card.active)
                        .min_size(CARD_SIZE),
                );
                if let Some(ref detail) = card.detail {
                    response = response.on_hover_text(detail);
                }
                if response.clicked() {
                    self.studio.select(group, &card.value);
                }
            }
        });
    }

    /// Single-line or multi-line text field bound to a form field
    fn form_field(&mut self, ui: &mut Ui, field: FormField, multiline: bool, hint: &str) {
        ui.label(RichText::new(field.label()).strong());
        let mut text = self.studio.form().get(field).to_string();
        let edit = if multiline {
            TextEdit::multiline(&mut text).desired_rows(4)
        } else {
            TextEdit::singleline(&mut text)
        };
        let response = ui.add(edit.hint_text(hint).desired_width(f32::INFINITY));
        if response.changed() {
            self.studio.set_form_field(field, &text);
        }
        counter_label(ui, self.studio.form().counter(field));
    }

    /// Uploader with file picker, preview info and analyze button
    fn uploader(&mut self, ui: &mut Ui, kind: AnalysisKind, button: &str) {
        let analyzing = self.studio.is_analyzing(kind);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!analyzing, egui::Button::new("Choose image..."))
                .clicked()
            {
                if let Some(path) = UploadSlot::pick_file() {
                    self.load_path(kind, &path);
                }
            }
            match &self.uploads.slot_mut(kind).upload {
                Some(upload) => {
                    ui.label(
                        RichText::new(format!("{} ({})", upload.file_name, upload.size_label()))
                            .monospace()
                            .color(Color32::LIGHT_BLUE),
                    );
                }
                None => {
                    ui.label(
                        RichText::new("No image selected, or drop one here")
                            .italics()
                            .color(Color32::GRAY),
                    );
                }
            }
        });

        let ready = self.uploads.slot_mut(kind).upload.is_some() && !analyzing;
        ui.horizontal(|ui| {
            let response = ui
                .add_enabled(ready, egui::Button::new(RichText::new(button).size(15.0)))
                .on_hover_text(format!("Server: {}", self.config.server_url));
            if response.clicked() {
                self.start_analysis(ui.ctx(), kind);
            }
            if analyzing {
                ui.spinner();
                ui.label("Analyzing...");
                if ui.small_button("Cancel").clicked() {
                    self.studio.cancel_analysis(kind);
                }
            }
        });
    }

    pub fn product_step(&mut self, ui: &mut Ui) {
        ui.heading("Product");
        ui.label(RichText::new("Upload a product photo or describe it yourself.").weak());

        self.option_cards(ui, OptionGroup::AnalysisMethod);

        if self.studio.selection().analysis_method == "manual" {
            ui.add_space(8.0);
            self.form_field(ui, FormField::ProductName, false, "e.g. NIKKI Vitamin C Serum");
            self.form_field(
                ui,
                FormField::ManualDescription,
                true,
                "Describe the product: what it is, materials, colours, what makes it special",
            );
            if ui.button("Use Description").clicked() {
                // Errors surface as notices
                let _ = self.studio.use_manual_description(Instant::now());
            }
        } else {
            section_title(ui, "Product image");
            self.uploader(ui, AnalysisKind::Product, "Analyze Product");
        }

        if let Some(product) = &self.studio.analyses().product {
            ui.add_space(8.0);
            result_frame(ui, |ui| {
                ui.label(RichText::new(&product.product_name).strong().size(16.0));
                ui.label(RichText::new(&product.product_type).weak());
                ui.add_space(4.0);
                ui.label(&product.detailed_description);
                if !product.key_features.is_empty() {
                    ui.add_space(4.0);
                    for feature in &product.key_features {
                        ui.label(format!("• {}", feature));
                    }
                }
                if !product.emotional_appeal.is_empty() {
                    ui.label(RichText::new(format!("Appeal: {}", product.emotional_appeal)).italics());
                }
            });
        }

        self.option_cards(ui, OptionGroup::ContentType);
        ui.add_space(8.0);
        self.form_field(ui, FormField::TargetAudience, false, "e.g. busy professionals in their 30s");
    }

    pub fn actor_step(&mut self, ui: &mut Ui) {
        ui.heading("Actor");
        ui.label(RichText::new("Pick a creator or upload your own.").weak());

        self.option_cards(ui, OptionGroup::CharacterArchetype);

        ui.add_space(6.0);
        let open = self.uploads.actor.open;
        if ui
            .selectable_label(open, "Upload your own actor")
            .clicked()
        {
            self.uploads.actor.open = !open;
        }
        if self.uploads.actor.open {
            self.uploader(ui, AnalysisKind::Actor, "Analyze Actor");
        }
        if let Some(actor) = &self.studio.analyses().actor {
            let selected = self.studio.selection().character_archetype == CUSTOM_ACTOR;
            result_frame(ui, |ui| {
                ui.label(RichText::new("Custom actor").strong());
                ui.label(&actor.actor_description);
            });
            if !selected && ui.button("Use custom actor").clicked() {
                self.studio.select(OptionGroup::CharacterArchetype, CUSTOM_ACTOR);
            }
        }

        self.option_cards(ui, OptionGroup::CreatorAge);
        self.option_cards(ui, OptionGroup::CreatorStyle);
        self.option_cards(ui, OptionGroup::EnergyLevel);
    }

    pub fn visual_step(&mut self, ui: &mut Ui) {
        ui.heading("Visual");
        ui.label(RichText::new("Set the scene, light and camera.").weak());

        self.option_cards(ui, OptionGroup::Location);

        ui.add_space(6.0);
        let open = self.uploads.scene.open;
        if ui.selectable_label(open, "Upload your own scene").clicked() {
            self.uploads.scene.open = !open;
        }
        if self.uploads.scene.open {
            self.uploader(ui, AnalysisKind::Scene, "Analyze Scene");
        }
        if let Some(scene) = &self.studio.analyses().scene {
            let selected = self.studio.selection().location == CUSTOM_SCENE;
            result_frame(ui, |ui| {
                ui.label(RichText::new("Custom scene").strong());
                ui.label(&scene.scene_description);
            });
            if !selected && ui.button("Use custom scene").clicked() {
                self.studio.select(OptionGroup::Location, CUSTOM_SCENE);
            }
        }

        self.option_cards(ui, OptionGroup::Lighting);
        self.option_cards(ui, OptionGroup::CameraStyle);
        self.option_cards(ui, OptionGroup::Platform);
        self.option_cards(ui, OptionGroup::VisualStyle);
    }

    pub fn hook_step(&mut self, ui: &mut Ui) {
        ui.heading("Hook");
        ui.label(RichText::new("Stop the scroll in the first seconds.").weak());

        self.option_cards(ui, OptionGroup::HookStrategy);
        self.option_cards(ui, OptionGroup::Tone);
        self.option_cards(ui, OptionGroup::ConversionFocus);

        ui.add_space(8.0);
        self.form_field(
            ui,
            FormField::CustomMessage,
            true,
            "Optional: your own opening line, used instead of the hook strategy",
        );
    }

    pub fn generate_step(&mut self, ui: &mut Ui) {
        ui.heading("Generate");
        ui.label(RichText::new("Review your choices and build the prompt.").weak());
        ui.add_space(8.0);

        egui::Grid::new("summary").num_columns(2).striped(true).show(ui, |ui| {
            let selection = self.studio.selection();
            for group in [
                OptionGroup::ContentType,
                OptionGroup::CharacterArchetype,
                OptionGroup::Location,
                OptionGroup::Lighting,
                OptionGroup::CameraStyle,
                OptionGroup::Platform,
                OptionGroup::HookStrategy,
                OptionGroup::Tone,
            ] {
                ui.label(RichText::new(group.label()).strong());
                ui.label(selection.get(group));
                ui.end_row();
            }
        });

        ui.add_space(10.0);
        if ui
            .add(egui::Button::new(RichText::new("Generate Prompt").size(16.0)))
            .clicked()
        {
            // Errors surface as notices
            let _ = self.studio.generate_prompt(Instant::now());
        }

        let Some(prompt) = self.studio.prompt().map(str::to_string) else {
            return;
        };
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Your prompt").strong());
            ui.label(RichText::new(format!("{} characters", prompt.chars().count())).weak());
        });

        let mut shown = prompt.as_str();
        ui.add(
            TextEdit::multiline(&mut shown)
                .desired_rows(16)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Monospace),
        );

        ui.horizontal(|ui| {
            if ui.button("Copy").clicked() {
                ui.ctx().copy_text(prompt.clone());
                self.studio.notify(
                    ugc_app::NoticeKind::Success,
                    "Prompt copied to clipboard!",
                    Instant::now(),
                );
            }
            if ui.button("Save as...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Text", &["txt"])
                    .set_file_name("ugc-prompt.txt")
                    .save_file()
                {
                    let now = Instant::now();
                    match std::fs::write(&path, &prompt) {
                        Ok(()) => self.studio.notify(
                            ugc_app::NoticeKind::Success,
                            format!("Prompt saved to {}", path.display()),
                            now,
                        ),
                        Err(e) => self.studio.notify(
                            ugc_app::NoticeKind::Error,
                            format!("Failed to save prompt: {}", e),
                            now,
                        ),
                    }
                }
            }
        });
    }
}
