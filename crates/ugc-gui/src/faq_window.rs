//! FAQ window with search, category filter and highlighted matches

use eframe::egui::{self, text::LayoutJob, RichText, TextFormat, Ui};
use ugc_domain::{FaqIndex, ALL_CATEGORIES};

#[derive(Default)]
pub struct FaqWindow {
    pub open: bool,
    query: String,
}

fn highlighted_job(ui: &Ui, index: &FaqIndex, text: &str, strong: bool) -> LayoutJob {
    let font = egui::TextStyle::Body.resolve(ui.style());
    let visuals = ui.visuals();
    let color = if strong {
        visuals.strong_text_color()
    } else {
        visuals.text_color()
    };

    let mut job = LayoutJob::default();
    job.wrap.max_width = ui.available_width();
    for span in index.highlight(text) {
        let mut format = TextFormat::simple(font.clone(), color);
        if span.highlighted {
            format.background = visuals.selection.bg_fill;
            format.color = visuals.selection.stroke.color;
        }
        job.append(&span.text, 0.0, format);
    }
    job
}

fn category_label(index: &FaqIndex, category: &str) -> String {
    if category == ALL_CATEGORIES {
        return "All".to_string();
    }
    index
        .sections()
        .iter()
        .find(|(c, _)| c == category)
        .map(|(_, title)| title.clone())
        .unwrap_or_else(|| category.to_string())
}

impl FaqWindow {
    pub fn show(&mut self, ctx: &egui::Context, index: &mut FaqIndex) {
        let mut open = self.open;
        egui::Window::new("Help & FAQ")
            .open(&mut open)
            .default_size([520.0, 560.0])
            .show(ctx, |ui| self.contents(ui, index));
        self.open = open;
    }

    fn contents(&mut self, ui: &mut Ui, index: &mut FaqIndex) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("Search questions and answers")
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                index.search(&self.query);
            }
        });

        ui.horizontal_wrapped(|ui| {
            for category in index.categories() {
                let selected = index.category() == category;
                if ui
                    .selectable_label(selected, category_label(index, &category))
                    .clicked()
                {
                    index.filter_by_category(&category);
                }
            }
            if ui.small_button("Collapse all").clicked() {
                index.collapse_all();
            }
        });
        ui.separator();

        let view = index.view();
        if view.no_results {
            ui.label(
                RichText::new(format!("No results found for \"{}\"", self.query.trim()))
                    .italics()
                    .weak(),
            );
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (category, shown) in &view.sections {
                if !shown {
                    continue;
                }
                ui.add_space(6.0);
                ui.label(RichText::new(category_label(index, category)).strong().size(15.0));

                for id in view.visible.iter().copied() {
                    let Some(entry) = index.entry(id) else { continue };
                    if entry.category != *category {
                        continue;
                    }
                    let question = highlighted_job(ui, index, &entry.question, true);
                    let answer = index
                        .is_expanded(id)
                        .then(|| highlighted_job(ui, index, &entry.answer, false));

                    let clicked = ui
                        .add(egui::Label::new(question).sense(egui::Sense::click()))
                        .clicked();
                    if let Some(answer) = answer {
                        ui.indent(("faq_answer", id), |ui| ui.label(answer));
                    }
                    if clicked {
                        index.toggle(id);
                    }
                }
            }
        });
    }
}
