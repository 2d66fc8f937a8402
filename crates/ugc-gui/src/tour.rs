//! Guided tour overlay

use eframe::egui::{self, RichText};
use ugc_app::Studio;

pub fn show(ctx: &egui::Context, studio: &mut Studio) {
    let tour = studio.tour();
    let Some(step) = tour.current_step() else {
        return;
    };
    let index = tour.current_index();
    let indicator = tour.indicator();
    let progress = tour.progress();
    let last = tour.is_last();

    egui::Window::new(RichText::new(step.title).strong())
        .id(egui::Id::new("guided_tour"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.label(step.content);
            ui.add_space(8.0);
            ui.add(egui::ProgressBar::new(progress).desired_height(4.0));
            ui.horizontal(|ui| {
                ui.label(RichText::new(indicator).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let next = if last { "Get Started" } else { "Next" };
                    if ui.button(next).clicked() {
                        studio.tour_next();
                    }
                    if index > 0 && ui.button("Previous").clicked() {
                        studio.tour_previous();
                    }
                    if ui.button("Skip").clicked() {
                        studio.skip_tour();
                    }
                });
            });
        });
}
