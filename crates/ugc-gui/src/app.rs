//! Main application structure with wizard navigation

use eframe::egui::{self, Color32, Key, RichText};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use ugc_app::{
    load_catalog_or_empty, load_faq_or_empty, local_source, Config, NoticeKind, RemoteCatalog,
    Studio, StudioEvent,
};
use ugc_domain::{FaqSection, OptionCatalog, Theme};
use ugc_store::MemoryStore;
use ugc_types::{AnalysisKind, WizardStep};
use ugc_vision::{HttpAnalyzer, ImageUpload};

use crate::analysis::{AnalysisWorker, Uploads};
use crate::faq_window::FaqWindow;
use crate::theme;
use crate::tour;

/// Repaint often enough for toasts and the save indicator to fade
const UI_TICK: Duration = Duration::from_millis(250);

const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+S", "Save project"),
    ("Alt+Left", "Previous step"),
    ("Alt+Right", "Next step"),
    ("Escape", "Close uploaders and dialogs"),
    ("Ctrl+?", "Show keyboard shortcuts"),
];

/// Main application state
pub struct StudioApp {
    pub(crate) studio: Studio,
    pub(crate) config: Config,
    pub(crate) uploads: Uploads,
    /// None when the HTTP client could not be built
    pub(crate) worker: Option<AnalysisWorker>,
    faq_window: FaqWindow,
    show_shortcuts: bool,
    applied_theme: Option<Theme>,
}

fn load_catalog(config: &Config) -> (Arc<OptionCatalog>, Vec<FaqSection>) {
    let source = local_source(config);
    let faq = load_faq_or_empty(source.as_ref());

    let Some(ref url) = config.catalog_url else {
        return (load_catalog_or_empty(source.as_ref()), faq);
    };
    let fetched = RemoteCatalog::new(url, config.request_timeout()).and_then(|remote| {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(rt.block_on(remote.fetch_or_empty()))
    });
    match fetched {
        Ok(catalog) => (catalog, faq),
        Err(e) => {
            error!("Catalog fetch failed, using an empty catalog: {}", e);
            (Arc::new(OptionCatalog::default()), faq)
        }
    }
}

impl StudioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.3;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Using default configuration: {}", e);
            Config::default()
        });

        let (catalog, faq) = load_catalog(&config);
        let now = Instant::now();
        let mut studio = match Studio::open(&config, Arc::clone(&catalog), &faq, now) {
            Ok(studio) => studio,
            Err(e) => {
                error!("Local store unavailable: {}", e);
                let mut studio = Studio::new(
                    catalog,
                    &faq,
                    Box::new(MemoryStore::new()),
                    config.autosave_interval(),
                    config.auto_advance_delay(),
                    now,
                );
                studio.notify(
                    NoticeKind::Error,
                    format!("Local storage unavailable, this session will not be saved: {}", e),
                    now,
                );
                studio
            }
        };

        let worker = match HttpAnalyzer::new(&config.server_url, config.request_timeout()) {
            Ok(analyzer) => {
                info!("Analysis server: {}", analyzer.base_url());
                Some(AnalysisWorker::new(Arc::new(analyzer)))
            }
            Err(e) => {
                studio.notify(NoticeKind::Error, e.to_string(), now);
                None
            }
        };

        if studio.should_show_tour() {
            studio.start_tour();
        }

        Self {
            studio,
            config,
            uploads: Uploads::new(),
            worker,
            faq_window: FaqWindow::default(),
            show_shortcuts: false,
            applied_theme: None,
        }
    }

    /// Validate a picked or dropped file into the uploader for `kind`
    pub(crate) fn load_path(&mut self, kind: AnalysisKind, path: &std::path::Path) {
        if let Ok(upload) = self.studio.load_upload(path, Instant::now()) {
            let slot = self.uploads.slot_mut(kind);
            slot.upload = Some(upload);
            slot.open = true;
        }
    }

    fn load_bytes(&mut self, kind: AnalysisKind, name: &str, bytes: &[u8]) {
        match ImageUpload::from_bytes(name, bytes) {
            Ok(upload) => {
                let slot = self.uploads.slot_mut(kind);
                slot.upload = Some(upload);
                slot.open = true;
            }
            Err(e) => self.studio.notify(NoticeKind::Error, e.to_string(), Instant::now()),
        }
    }

    /// Send the uploader's image for analysis
    pub(crate) fn start_analysis(&mut self, ctx: &egui::Context, kind: AnalysisKind) {
        let now = Instant::now();
        let Some(upload) = self.uploads.slot_mut(kind).upload.clone() else {
            self.studio
                .notify(NoticeKind::Error, "Please select a valid image file", now);
            return;
        };
        let Some(worker) = &self.worker else {
            self.studio
                .notify(NoticeKind::Error, "Analysis server is not configured", now);
            return;
        };
        let ticket = self.studio.begin_analysis(kind);
        worker.spawn(ctx, ticket, upload);
    }

    fn poll_analyses(&mut self) {
        let Some(worker) = &self.worker else {
            return;
        };
        for message in worker.poll() {
            let kind = message.ticket.kind;
            let ok = message.result.is_ok();
            if self
                .studio
                .complete_analysis(message.ticket, message.result, Instant::now())
                && ok
                && kind != AnalysisKind::Product
            {
                self.uploads.slot_mut(kind).open = false;
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let (save, previous, next, escape, help) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::COMMAND, Key::S),
                i.consume_key(egui::Modifiers::ALT, Key::ArrowLeft),
                i.consume_key(egui::Modifiers::ALT, Key::ArrowRight),
                i.key_pressed(Key::Escape),
                i.modifiers.command && (i.key_pressed(Key::Questionmark) || i.key_pressed(Key::Slash)),
            )
        });

        if save {
            // Failure is reported through a notice
            let _ = self.studio.save_now(now);
        }
        if previous {
            self.studio.previous();
        }
        if next {
            self.studio.next();
        }
        if escape {
            self.uploads.close_all();
            self.show_shortcuts = false;
            self.faq_window.open = false;
        }
        if help {
            self.show_shortcuts = !self.show_shortcuts;
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        let kind = match self.studio.current_step() {
            WizardStep::Product => AnalysisKind::Product,
            WizardStep::Actor => AnalysisKind::Actor,
            WizardStep::Visual => AnalysisKind::Scene,
            _ => return,
        };

        if let Some(path) = file.path {
            self.load_path(kind, &path);
        } else if let Some(bytes) = file.bytes {
            self.load_bytes(kind, &file.name, &bytes);
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        ui.horizontal(|ui| {
            ui.heading(RichText::new("UGC Prompt Studio").color(theme::accent(self.studio.theme())));
            ui.add_space(12.0);

            if let Some(label) = self.studio.save_indicator().label(now) {
                let response = ui.label(RichText::new(label).small().weak());
                if let Some(at) = self.studio.save_indicator().last_saved() {
                    response.on_hover_text(format!("Last saved {}", at.format("%H:%M:%S")));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("?").on_hover_text("Keyboard shortcuts (Ctrl+?)").clicked() {
                    self.show_shortcuts = !self.show_shortcuts;
                }
                if ui.button("FAQ").clicked() {
                    self.faq_window.open = !self.faq_window.open;
                }
                if ui.button("Tour").clicked() {
                    self.studio.start_tour();
                }

                let current = self.studio.theme();
                let mut chosen = current;
                egui::ComboBox::from_id_salt("theme")
                    .selected_text(current.label())
                    .show_ui(ui, |ui| {
                        for theme in Theme::ALL {
                            ui.selectable_value(&mut chosen, theme, theme.label())
                                .on_hover_text(theme.description());
                        }
                    });
                if chosen != current {
                    self.studio.set_theme(chosen, now);
                }
                let toggle_icon = if current.is_dark() { "☀" } else { "🌙" };
                if ui.button(toggle_icon).on_hover_text("Toggle light/dark").clicked() {
                    self.studio.toggle_theme(now);
                }

                if ui.button("Save").on_hover_text("Ctrl+S").clicked() {
                    let _ = self.studio.save_now(now);
                }
                if ui.button("New Project").clicked() {
                    if self.studio.new_project(now).is_ok() {
                        self.uploads.clear_all();
                    }
                }
            });
        });
    }

    fn render_step_bar(&mut self, ui: &mut egui::Ui) {
        let view = self.studio.wizard_view();
        ui.horizontal(|ui| {
            for (step, done) in view.completed {
                let mut text = format!("{}. {}", step.index() + 1, step.label());
                if done {
                    text.push_str(" ✓");
                }
                if ui
                    .selectable_label(step == view.current, text)
                    .on_hover_text(step.hint())
                    .clicked()
                {
                    self.studio.switch_to(step);
                }
                ui.add_space(8.0);
            }
        });
        ui.add(egui::ProgressBar::new(view.progress).desired_height(6.0));
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        let view = self.studio.wizard_view();
        ui.horizontal(|ui| {
            if view.show_previous && ui.button("← Previous").clicked() {
                self.studio.previous();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if view.show_next && ui.button("Next →").clicked() {
                    self.studio.next();
                }
                ui.label(RichText::new(view.current.hint()).weak());
            });
        });
    }

    fn render_notices(&mut self, ctx: &egui::Context) {
        let notices = self.studio.notices().active().to_vec();
        if notices.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -48.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for notice in notices {
                    let fill = match notice.kind {
                        NoticeKind::Success => Color32::from_rgb(22, 101, 52),
                        NoticeKind::Error => Color32::from_rgb(153, 27, 27),
                        NoticeKind::Info => Color32::from_rgb(30, 64, 175),
                    };
                    let response = egui::Frame::new()
                        .fill(fill)
                        .inner_margin(10.0)
                        .corner_radius(6.0)
                        .show(ui, |ui| {
                            ui.set_max_width(320.0);
                            ui.add(
                                egui::Label::new(RichText::new(&notice.message).color(Color32::WHITE))
                                    .sense(egui::Sense::click()),
                            )
                        })
                        .inner;
                    if response.clicked() {
                        self.studio.notices_mut().dismiss(notice.id);
                    }
                    ui.add_space(6.0);
                }
            });
    }

    fn render_shortcuts(&mut self, ctx: &egui::Context) {
        egui::Window::new("Keyboard Shortcuts")
            .open(&mut self.show_shortcuts)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("shortcuts").striped(true).show(ui, |ui| {
                    for (keys, action) in SHORTCUTS {
                        ui.label(RichText::new(*keys).monospace().strong());
                        ui.label(*action);
                        ui.end_row();
                    }
                });
            });
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_analyses();
        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);

        let now = Instant::now();
        for event in self.studio.tick(now) {
            match event {
                StudioEvent::AutoSaved => info!("Auto-saved"),
                StudioEvent::SaveFailed => warn!("Auto-save failed"),
                StudioEvent::AutoAdvanced(step) => info!("Advanced to {}", step),
            }
        }

        let theme = self.studio.theme();
        if self.applied_theme != Some(theme) {
            theme::apply(ctx, theme);
            self.applied_theme = Some(theme);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_header(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::top("steps").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_step_bar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("navigation").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_footer(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.studio.current_step() {
                WizardStep::Product => self.product_step(ui),
                WizardStep::Actor => self.actor_step(ui),
                WizardStep::Visual => self.visual_step(ui),
                WizardStep::Hook => self.hook_step(ui),
                WizardStep::Generate => self.generate_step(ui),
            });
        });

        self.faq_window.show(ctx, self.studio.faq_mut());
        self.render_shortcuts(ctx);
        tour::show(ctx, &mut self.studio);
        self.render_notices(ctx);

        let busy = AnalysisKind::ALL.iter().any(|k| self.studio.is_analyzing(*k));
        let wait = if busy || !self.studio.notices().active().is_empty() {
            UI_TICK
        } else {
            self.studio.next_deadline(now).min(Duration::from_secs(1))
        };
        ctx.request_repaint_after(wait);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.studio.persist(Instant::now()) {
            error!("Final save failed: {}", e);
        }
    }
}
