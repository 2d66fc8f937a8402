//! Studio session: the single owner of wizard state
//!
//! Front-ends hold one [`Studio`], call its operations from their own thread
//! and poll [`Studio::tick`] for timers. Analysis requests run elsewhere and
//! report back through [`Studio::complete_analysis`] with the ticket they were
//! started with; results for superseded tickets are dropped.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use ugc_domain::{
    build_prompt, CompletionContext, FaqIndex, FaqSection, FormField, FormFields, GuidedTour,
    OptionCard, OptionCatalog, PromptInputs, SelectionState, SessionSnapshot, Theme,
    WizardController, WizardView,
};
use ugc_store::{
    AutoSaveTimer, AutoSaver, KeyValueStore, LocalStore, SaveOutcome, AUTOSAVE_KEY, THEME_KEY,
};
use ugc_types::{
    AnalysisKind, AnalysisOutcome, AnalysisSet, Error, OptionGroup, ProductAnalysis, Result,
    ValidationError, WizardStep, CUSTOM_ACTOR, CUSTOM_SCENE,
};
use ugc_vision::ImageUpload;

use crate::config::Config;
use crate::notice::{NoticeBoard, NoticeKind, SaveIndicator};

/// Identifies one analysis request. Only the newest ticket per kind is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub kind: AnalysisKind,
    generation: u64,
}

/// Things that happened during [`Studio::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioEvent {
    AutoSaved,
    SaveFailed,
    AutoAdvanced(WizardStep),
}

fn kind_slot(kind: AnalysisKind) -> usize {
    match kind {
        AnalysisKind::Product => 0,
        AnalysisKind::Actor => 1,
        AnalysisKind::Scene => 2,
    }
}

fn kind_title(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Product => "Product",
        AnalysisKind::Actor => "Actor",
        AnalysisKind::Scene => "Scene",
    }
}

pub struct Studio {
    catalog: Arc<OptionCatalog>,
    faq: FaqIndex,
    selection: SelectionState,
    analyses: AnalysisSet,
    form: FormFields,
    wizard: WizardController,
    prompt: Option<String>,
    notices: NoticeBoard,
    save_indicator: SaveIndicator,
    theme: Theme,
    tour: GuidedTour,
    store: Box<dyn KeyValueStore>,
    saver: AutoSaver,
    timer: AutoSaveTimer,
    auto_advance_delay: Duration,
    pending_advance: Option<Instant>,
    generations: [u64; 3],
    in_flight: [bool; 3],
}

impl Studio {
    /// Build a session over `store`, restoring the saved theme and session
    pub fn new(
        catalog: Arc<OptionCatalog>,
        faq: &[FaqSection],
        store: Box<dyn KeyValueStore>,
        autosave_interval: Duration,
        auto_advance_delay: Duration,
        now: Instant,
    ) -> Self {
        let theme = match store.get_item(THEME_KEY) {
            Some(name) => name.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                Theme::default()
            }),
            None => Theme::default(),
        };

        let mut studio = Self {
            catalog,
            faq: FaqIndex::new(faq),
            selection: SelectionState::default(),
            analyses: AnalysisSet::default(),
            form: FormFields::default(),
            wizard: WizardController::new(),
            prompt: None,
            notices: NoticeBoard::default(),
            save_indicator: SaveIndicator::default(),
            theme,
            tour: GuidedTour::new(),
            store,
            saver: AutoSaver::new(AUTOSAVE_KEY),
            timer: AutoSaveTimer::new(autosave_interval, now),
            auto_advance_delay,
            pending_advance: None,
            generations: [0; 3],
            in_flight: [false; 3],
        };
        studio.restore(now);
        studio
    }

    /// Open the session on the configured local store
    pub fn open(
        config: &Config,
        catalog: Arc<OptionCatalog>,
        faq: &[FaqSection],
        now: Instant,
    ) -> Result<Self> {
        let dir = config.store_dir()?;
        let store = LocalStore::open_with_quota(&dir, config.storage_quota_bytes)?;
        info!("Using store {}", store.path().display());
        Ok(Self::new(
            catalog,
            faq,
            Box::new(store),
            config.autosave_interval(),
            config.auto_advance_delay(),
            now,
        ))
    }

    // ---- read access ----

    pub fn catalog(&self) -> &Arc<OptionCatalog> {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn analyses(&self) -> &AnalysisSet {
        &self.analyses
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current()
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn save_indicator(&self) -> &SaveIndicator {
        &self.save_indicator
    }

    pub fn faq(&self) -> &FaqIndex {
        &self.faq
    }

    pub fn faq_mut(&mut self) -> &mut FaqIndex {
        &mut self.faq
    }

    pub fn tour(&self) -> &GuidedTour {
        &self.tour
    }

    pub fn cards(&self, group: OptionGroup) -> Vec<OptionCard> {
        self.selection.cards(group, &self.catalog)
    }

    fn completion(&self) -> CompletionContext<'_> {
        CompletionContext {
            selection: &self.selection,
            analyses: &self.analyses,
            form: &self.form,
            generated_prompt: self.prompt.as_deref(),
        }
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.completion().is_complete(step)
    }

    pub fn wizard_view(&self) -> WizardView {
        self.wizard.view(&self.completion())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.selection,
            &self.analyses,
            self.wizard.current(),
            &self.form,
        )
    }

    /// Whether an analysis of `kind` is awaiting its result
    pub fn is_analyzing(&self, kind: AnalysisKind) -> bool {
        self.in_flight[kind_slot(kind)]
    }

    pub fn auto_advance_pending(&self) -> bool {
        self.pending_advance.is_some()
    }

    // ---- notices ----

    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) {
        self.notices.push(kind, message, now);
    }

    fn fail<T>(&mut self, err: Error, now: Instant) -> Result<T> {
        self.notices.push(NoticeKind::Error, err.to_string(), now);
        Err(err)
    }

    // ---- selection and form ----

    pub fn select(&mut self, group: OptionGroup, value: &str) {
        self.selection.select(group, value);
    }

    pub fn set_form_field(&mut self, field: FormField, value: &str) {
        self.form.set(field, value);
    }

    // ---- navigation ----

    /// Manual navigation; cancels a pending auto-advance
    pub fn switch_to(&mut self, step: WizardStep) -> bool {
        self.pending_advance = None;
        self.wizard.switch_to(step)
    }

    pub fn next(&mut self) -> bool {
        self.pending_advance = None;
        self.wizard.next()
    }

    pub fn previous(&mut self) -> bool {
        self.pending_advance = None;
        self.wizard.previous()
    }

    // ---- analysis ----

    /// Validate an image file for upload. Failures become an error notice and
    /// leave the session untouched.
    pub fn load_upload(&mut self, path: &std::path::Path, now: Instant) -> Result<ImageUpload> {
        match ImageUpload::from_path(path) {
            Ok(upload) => Ok(upload),
            Err(e) => self.fail(e, now),
        }
    }

    /// Start an analysis of `kind`, superseding any earlier one of that kind
    pub fn begin_analysis(&mut self, kind: AnalysisKind) -> AnalysisTicket {
        let slot = kind_slot(kind);
        self.generations[slot] += 1;
        self.in_flight[slot] = true;
        debug!("begin {} analysis #{}", kind.label(), self.generations[slot]);
        AnalysisTicket {
            kind,
            generation: self.generations[slot],
        }
    }

    /// Forget the in-flight analysis of `kind`; its result will be ignored
    pub fn cancel_analysis(&mut self, kind: AnalysisKind) {
        let slot = kind_slot(kind);
        self.generations[slot] += 1;
        self.in_flight[slot] = false;
    }

    /// Apply an analysis result. Returns false when the ticket is stale.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<AnalysisOutcome>,
        now: Instant,
    ) -> bool {
        let slot = kind_slot(ticket.kind);
        if ticket.generation != self.generations[slot] || !self.in_flight[slot] {
            debug!(
                "dropping stale {} analysis #{}",
                ticket.kind.label(),
                ticket.generation
            );
            return false;
        }
        self.in_flight[slot] = false;

        let outcome = match result {
            Ok(outcome) if outcome.kind() == ticket.kind => outcome,
            Ok(outcome) => {
                warn!(
                    "{} ticket completed with a {} result",
                    ticket.kind.label(),
                    outcome.kind().label()
                );
                return false;
            }
            Err(e) => {
                let message = match &e {
                    Error::Remote(m) => m.clone(),
                    other => format!("{} analysis failed: {}", kind_title(ticket.kind), other),
                };
                error!("{}", message);
                self.notices.push(NoticeKind::Error, message, now);
                return true;
            }
        };

        match &outcome {
            AnalysisOutcome::Product(product) => {
                self.populate_form_from(product);
                self.pending_advance = Some(now + self.auto_advance_delay);
            }
            AnalysisOutcome::Actor(_) => self.selection.select(OptionGroup::CharacterArchetype, CUSTOM_ACTOR),
            AnalysisOutcome::Scene(_) => self.selection.select(OptionGroup::Location, CUSTOM_SCENE),
        }
        self.analyses.store(outcome);
        self.notices.push(
            NoticeKind::Success,
            format!("{} analysis complete!", kind_title(ticket.kind)),
            now,
        );
        true
    }

    fn populate_form_from(&mut self, product: &ProductAnalysis) {
        if !product.product_name.is_empty() {
            self.form.product_name = product.product_name.clone();
        }
        if product.suggested_setting.contains("unboxing") {
            self.selection.select(OptionGroup::ContentType, "unboxing");
        }
    }

    fn manual_analysis(&self) -> Result<ProductAnalysis> {
        let name = self.form.product_name.trim();
        let description = self.form.manual_description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(ValidationError::MissingManualInput.into());
        }
        Ok(ProductAnalysis::manual(name, description))
    }

    /// Use the manually entered name and description as the product analysis
    pub fn use_manual_description(&mut self, now: Instant) -> Result<()> {
        match self.manual_analysis() {
            Ok(product) => {
                self.analyses.product = Some(product);
                self.pending_advance = Some(now + self.auto_advance_delay);
                self.notices
                    .push(NoticeKind::Success, "Manual description added successfully!", now);
                Ok(())
            }
            Err(e) => self.fail(e, now),
        }
    }

    // ---- prompt ----

    /// Assemble the prompt from the current session
    pub fn generate_prompt(&mut self, now: Instant) -> Result<String> {
        let manual = self.selection.analysis_method == "manual";
        if manual {
            match self.manual_analysis() {
                Ok(product) => self.analyses.product = Some(product),
                Err(e) => return self.fail(e, now),
            }
        } else if self.analyses.product.is_none() {
            self.switch_to(WizardStep::Product);
            return self.fail(ValidationError::MissingProductAnalysis.into(), now);
        }

        let built = build_prompt(PromptInputs {
            selection: &self.selection,
            catalog: &self.catalog,
            analyses: &self.analyses,
            form: &self.form,
        });
        match built {
            Ok(prompt) => {
                info!("Generated prompt ({} chars)", prompt.len());
                self.prompt = Some(prompt.clone());
                self.notices
                    .push(NoticeKind::Success, "Prompt generated successfully!", now);
                Ok(prompt)
            }
            Err(e) => self.fail(e.into(), now),
        }
    }

    // ---- persistence ----

    fn write_snapshot(&mut self, now: Instant) -> Result<SaveOutcome> {
        let snapshot = self.snapshot();
        match self.saver.save(self.store.as_mut(), &snapshot) {
            Ok(outcome) => {
                if outcome == SaveOutcome::Saved {
                    self.save_indicator.saved(now);
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("Save failed: {}", e);
                self.save_indicator.failed();
                self.notices
                    .push(NoticeKind::Error, format!("Save failed: {}", e), now);
                Err(e)
            }
        }
    }

    /// Write the session without announcing it
    pub fn persist(&mut self, now: Instant) -> Result<SaveOutcome> {
        let outcome = self.write_snapshot(now)?;
        self.timer.reset(now);
        Ok(outcome)
    }

    /// Manual save (Ctrl+S or the `save` command)
    pub fn save_now(&mut self, now: Instant) -> Result<SaveOutcome> {
        let outcome = self.persist(now)?;
        self.notices
            .push(NoticeKind::Success, "Project saved manually!", now);
        Ok(outcome)
    }

    /// Read the saved session, if any, into this one
    pub fn restore(&mut self, now: Instant) -> bool {
        let Some(snapshot) = self.saver.restore::<_, SessionSnapshot>(self.store.as_ref()) else {
            return false;
        };
        self.analyses = snapshot.analyses();
        self.selection = snapshot.selected_options;
        self.form = snapshot.form_fields.unwrap_or_default();
        self.wizard.restore(snapshot.current_tab);
        info!("Restored session at step {}", snapshot.current_tab);
        self.notices
            .push(NoticeKind::Info, "Previous session restored!", now);
        true
    }

    /// Timers: notice expiry, pending auto-advance, periodic auto-save
    pub fn tick(&mut self, now: Instant) -> Vec<StudioEvent> {
        let mut events = Vec::new();
        self.notices.expire(now);

        if let Some(due) = self.pending_advance {
            if now >= due {
                self.pending_advance = None;
                if self.wizard.switch_to(WizardStep::Actor) {
                    events.push(StudioEvent::AutoAdvanced(WizardStep::Actor));
                }
            }
        }

        if self.timer.poll(now) {
            match self.write_snapshot(now) {
                Ok(SaveOutcome::Saved) => events.push(StudioEvent::AutoSaved),
                Ok(SaveOutcome::Unchanged) => {}
                Err(_) => events.push(StudioEvent::SaveFailed),
            }
        }
        events
    }

    /// Fire a pending auto-advance right away (one-shot front-ends)
    pub fn apply_pending_advance(&mut self) -> Option<WizardStep> {
        self.pending_advance.take()?;
        self.wizard
            .switch_to(WizardStep::Actor)
            .then_some(WizardStep::Actor)
    }

    /// Time until the next timer needs servicing
    pub fn next_deadline(&self, now: Instant) -> Duration {
        let mut wait = self.timer.remaining(now);
        if let Some(due) = self.pending_advance {
            wait = wait.min(due.saturating_duration_since(now));
        }
        wait
    }

    /// Reset to defaults and clear the saved session
    pub fn new_project(&mut self, now: Instant) -> Result<()> {
        for kind in AnalysisKind::ALL {
            self.cancel_analysis(kind);
        }
        self.selection = SelectionState::default();
        self.analyses = AnalysisSet::default();
        self.form = FormFields::default();
        self.prompt = None;
        self.pending_advance = None;
        self.wizard.reset();
        self.faq.clear_search();

        if let Err(e) = self.saver.clear(self.store.as_mut()) {
            error!("Could not clear saved session: {}", e);
            return self.fail(e, now);
        }
        self.timer.reset(now);
        self.notices.push(NoticeKind::Info, "New project started", now);
        Ok(())
    }

    // ---- theme ----

    pub fn set_theme(&mut self, theme: Theme, now: Instant) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        if let Err(e) = self.store.set_item(THEME_KEY, theme.key()) {
            warn!("Could not persist theme: {}", e);
        }
        self.notices.push(
            NoticeKind::Success,
            format!("Theme changed to {}", theme.label()),
            now,
        );
    }

    pub fn toggle_theme(&mut self, now: Instant) {
        self.set_theme(self.theme.toggled(), now);
    }

    // ---- guided tour ----

    pub fn should_show_tour(&self) -> bool {
        GuidedTour::should_show(self.store.as_ref())
    }

    pub fn start_tour(&mut self) {
        self.tour.start();
    }

    pub fn tour_next(&mut self) {
        self.tour.next(self.store.as_mut());
    }

    pub fn tour_previous(&mut self) {
        self.tour.previous();
    }

    pub fn skip_tour(&mut self) {
        self.tour.skip(self.store.as_mut());
    }

    pub fn reset_tour(&mut self) -> Result<()> {
        GuidedTour::reset(self.store.as_mut())
    }
}
