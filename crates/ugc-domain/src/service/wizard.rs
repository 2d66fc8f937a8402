//! Wizard navigation over the five ordered steps

use tracing::debug;
use ugc_types::{AnalysisSet, OptionGroup, WizardStep};

use crate::model::{FormFields, SelectionState};

/// Everything step completion is computed from
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext<'a> {
    pub selection: &'a SelectionState,
    pub analyses: &'a AnalysisSet,
    pub form: &'a FormFields,
    pub generated_prompt: Option<&'a str>,
}

impl CompletionContext<'_> {
    /// Whether a step counts as complete. Advisory only; navigation never checks it.
    pub fn is_complete(&self, step: WizardStep) -> bool {
        let filled = |group: OptionGroup| !self.selection.get(group).is_empty();
        match step {
            WizardStep::Product => {
                self.analyses.product.is_some()
                    || (self.selection.analysis_method == "manual"
                        && !self.form.product_name.is_empty()
                        && !self.form.manual_description.is_empty())
            }
            WizardStep::Actor => filled(OptionGroup::CharacterArchetype),
            WizardStep::Visual => filled(OptionGroup::Location) && filled(OptionGroup::Lighting),
            WizardStep::Hook => filled(OptionGroup::HookStrategy),
            WizardStep::Generate => self.generated_prompt.is_some_and(|p| !p.is_empty()),
        }
    }

    pub fn completed_steps(&self) -> Vec<WizardStep> {
        WizardStep::ALL
            .iter()
            .copied()
            .filter(|s| self.is_complete(*s))
            .collect()
    }
}

/// Render state derived from the current step
#[derive(Debug, Clone, PartialEq)]
pub struct WizardView {
    pub current: WizardStep,
    /// Visibility of each step panel, in step order
    pub panels: [(WizardStep, bool); 5],
    /// Active flag of each navigation indicator, in step order
    pub nav: [(WizardStep, bool); 5],
    /// Completion flag of each step, in step order
    pub completed: [(WizardStep, bool); 5],
    /// Progress bar fill, `index / 4`
    pub progress: f32,
    /// Number of lit progress segments (segments `1..=index`)
    pub lit_segments: usize,
    pub show_previous: bool,
    pub show_next: bool,
}

/// Finite state machine over [`WizardStep`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardController {
    current: WizardStep,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Move to `step`. Returns false (and does nothing) when already there.
    pub fn switch_to(&mut self, step: WizardStep) -> bool {
        if step == self.current {
            return false;
        }
        debug!("wizard: {} -> {}", self.current, step);
        self.current = step;
        true
    }

    /// Advance one step, clamped at the last step
    pub fn next(&mut self) -> bool {
        match WizardStep::from_index(self.current.index() + 1) {
            Some(step) => self.switch_to(step),
            None => false,
        }
    }

    /// Go back one step, clamped at the first step
    pub fn previous(&mut self) -> bool {
        match self.current.index().checked_sub(1).and_then(WizardStep::from_index) {
            Some(step) => self.switch_to(step),
            None => false,
        }
    }

    /// Set the step from a snapshot, bypassing change detection
    pub fn restore(&mut self, step: WizardStep) {
        self.current = step;
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::first();
    }

    pub fn view(&self, ctx: &CompletionContext<'_>) -> WizardView {
        let index = self.current.index();
        let last = WizardStep::last().index();
        let flags = |f: &dyn Fn(WizardStep) -> bool| WizardStep::ALL.map(|s| (s, f(s)));
        WizardView {
            current: self.current,
            panels: flags(&|s| s == self.current),
            nav: flags(&|s| s == self.current),
            completed: flags(&|s| ctx.is_complete(s)),
            progress: index as f32 / last as f32,
            lit_segments: index,
            show_previous: index > 0,
            show_next: index < last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugc_types::ProductAnalysis;

    fn ctx<'a>(
        selection: &'a SelectionState,
        analyses: &'a AnalysisSet,
        form: &'a FormFields,
    ) -> CompletionContext<'a> {
        CompletionContext {
            selection,
            analyses,
            form,
            generated_prompt: None,
        }
    }

    #[test]
    fn test_switch_to_same_step_is_noop() {
        let mut wizard = WizardController::new();
        assert!(!wizard.switch_to(WizardStep::Product));
        assert!(wizard.switch_to(WizardStep::Hook));
        assert_eq!(wizard.current(), WizardStep::Hook);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut wizard = WizardController::new();
        assert!(!wizard.previous());
        assert_eq!(wizard.current(), WizardStep::Product);

        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.current(), WizardStep::Generate);
        assert!(!wizard.next());
    }

    #[test]
    fn test_view_has_one_panel_and_one_nav_active() {
        let (s, a, f) = (SelectionState::default(), AnalysisSet::default(), FormFields::default());
        let mut wizard = WizardController::new();
        for step in WizardStep::ALL {
            wizard.switch_to(step);
            let view = wizard.view(&ctx(&s, &a, &f));
            assert_eq!(view.panels.iter().filter(|(_, v)| *v).count(), 1);
            assert_eq!(view.nav.iter().filter(|(_, v)| *v).count(), 1);
            assert!(view.panels[step.index()].1);
            assert_eq!(view.lit_segments, step.index());
        }
    }

    #[test]
    fn test_progress_and_buttons() {
        let (s, a, f) = (SelectionState::default(), AnalysisSet::default(), FormFields::default());
        let mut wizard = WizardController::new();
        let first = wizard.view(&ctx(&s, &a, &f));
        assert_eq!(first.progress, 0.0);
        assert!(!first.show_previous);
        assert!(first.show_next);

        wizard.switch_to(WizardStep::Visual);
        assert_eq!(wizard.view(&ctx(&s, &a, &f)).progress, 0.5);

        wizard.switch_to(WizardStep::Generate);
        let last = wizard.view(&ctx(&s, &a, &f));
        assert_eq!(last.progress, 1.0);
        assert!(last.show_previous);
        assert!(!last.show_next);
    }

    #[test]
    fn test_product_completion() {
        let mut s = SelectionState::default();
        let mut a = AnalysisSet::default();
        let mut f = FormFields::default();
        assert!(!ctx(&s, &a, &f).is_complete(WizardStep::Product));

        s.analysis_method = "manual".to_string();
        f.product_name = "Mug".to_string();
        assert!(!ctx(&s, &a, &f).is_complete(WizardStep::Product));
        f.manual_description = "A blue ceramic mug".to_string();
        assert!(ctx(&s, &a, &f).is_complete(WizardStep::Product));

        s.analysis_method = "upload".to_string();
        assert!(!ctx(&s, &a, &f).is_complete(WizardStep::Product));
        a.product = Some(ProductAnalysis::manual("Mug", "A blue ceramic mug"));
        assert!(ctx(&s, &a, &f).is_complete(WizardStep::Product));
    }

    #[test]
    fn test_other_completion_rules() {
        let mut s = SelectionState::default();
        let (a, f) = (AnalysisSet::default(), FormFields::default());
        let c = ctx(&s, &a, &f);
        assert_eq!(
            c.completed_steps(),
            vec![WizardStep::Actor, WizardStep::Visual, WizardStep::Hook]
        );

        s.lighting.clear();
        let c = ctx(&s, &a, &f);
        assert!(!c.is_complete(WizardStep::Visual));

        let with_prompt = CompletionContext {
            generated_prompt: Some("PRODUCT"),
            ..c
        };
        assert!(with_prompt.is_complete(WizardStep::Generate));
    }
}
