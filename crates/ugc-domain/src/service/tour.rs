//! First-run guided tour

use tracing::{info, warn};
use ugc_store::{KeyValueStore, ONBOARDING_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    pub title: &'static str,
    pub content: &'static str,
}

pub const TOUR_STEPS: [TourStep; 8] = [
    TourStep {
        title: "Welcome to UGC Prompt Studio!",
        content: "Create professional User-Generated Content video prompts in just 5 simple steps. Let's take a quick tour!",
    },
    TourStep {
        title: "Step 1: Product Analysis",
        content: "Start by uploading your product image or describing it manually. The analyzer picks out key features, colors, and materials.",
    },
    TourStep {
        title: "Step 2: Choose Your Actor",
        content: "Select from a diverse cast of creators or upload your own. Each actor suits specific audiences and product types.",
    },
    TourStep {
        title: "Step 3: Visual Settings",
        content: "Configure the environment: location, lighting, camera work, and platform.",
    },
    TourStep {
        title: "Step 4: Hook Strategy",
        content: "Create an opening hook that stops the scroll. Choose a proven strategy or write your own.",
    },
    TourStep {
        title: "Step 5: Generate Prompt",
        content: "Get your UGC video prompt, ready for AI video generation platforms.",
    },
    TourStep {
        title: "Customize Your Experience",
        content: "Switch themes, use keyboard shortcuts (Ctrl+?), and rely on auto-save every 30 seconds.",
    },
    TourStep {
        title: "Ready to Create!",
        content: "You're all set! Use the navigation buttons or Alt + arrow keys to move between steps. Happy creating!",
    },
];

/// Linear overlay tour, independent of wizard data
#[derive(Debug, Clone, Default)]
pub struct GuidedTour {
    current: usize,
    active: bool,
}

impl GuidedTour {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the tour has been finished or skipped once
    pub fn should_show<S: KeyValueStore + ?Sized>(store: &S) -> bool {
        !store.contains_key(ONBOARDING_KEY)
    }

    /// Forget completion so the tour shows again
    pub fn reset<S: KeyValueStore + ?Sized>(store: &mut S) -> ugc_types::Result<()> {
        store.remove_item(ONBOARDING_KEY)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&'static TourStep> {
        if self.active {
            TOUR_STEPS.get(self.current)
        } else {
            None
        }
    }

    /// No-op when already running
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.current = 0;
    }

    /// Advance; finishing on the last step
    pub fn next<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        if !self.active {
            return;
        }
        if self.current + 1 < TOUR_STEPS.len() {
            self.current += 1;
        } else {
            self.finish(store);
        }
    }

    pub fn previous(&mut self) {
        if self.active && self.current > 0 {
            self.current -= 1;
        }
    }

    pub fn skip<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        self.finish(store);
    }

    /// End the tour and record completion. A storage failure only costs the
    /// tour showing again next time.
    pub fn finish<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        self.active = false;
        self.current = 0;
        match store.set_item(ONBOARDING_KEY, "true") {
            Ok(()) => info!("Guided tour completed"),
            Err(e) => warn!("Could not record tour completion: {}", e),
        }
    }

    /// `N of M` indicator
    pub fn indicator(&self) -> String {
        format!("{} of {}", self.current + 1, TOUR_STEPS.len())
    }

    /// `(current + 1) / len`
    pub fn progress(&self) -> f32 {
        (self.current + 1) as f32 / TOUR_STEPS.len() as f32
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == TOUR_STEPS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ugc_store::MemoryStore;

    #[test]
    fn test_start_is_idempotent() {
        let mut store = MemoryStore::new();
        let mut tour = GuidedTour::new();
        tour.start();
        tour.next(&mut store);
        tour.start();
        assert_eq!(tour.current_index(), 1);
    }

    #[test]
    fn test_previous_clamped_at_zero() {
        let mut tour = GuidedTour::new();
        tour.start();
        tour.previous();
        assert_eq!(tour.current_index(), 0);
        assert_eq!(tour.indicator(), "1 of 8");
        assert_eq!(tour.progress(), 1.0 / 8.0);
    }

    #[test]
    fn test_next_on_last_step_finishes() {
        let mut store = MemoryStore::new();
        assert!(GuidedTour::should_show(&store));

        let mut tour = GuidedTour::new();
        tour.start();
        for _ in 0..7 {
            tour.next(&mut store);
        }
        assert!(tour.is_last());
        assert_eq!(tour.indicator(), "8 of 8");
        assert!(tour.is_active());

        tour.next(&mut store);
        assert!(!tour.is_active());
        assert!(!GuidedTour::should_show(&store));

        GuidedTour::reset(&mut store).unwrap();
        assert!(GuidedTour::should_show(&store));
    }

    #[test]
    fn test_skip_records_completion() {
        let mut store = MemoryStore::new();
        let mut tour = GuidedTour::new();
        tour.start();
        tour.skip(&mut store);
        assert!(tour.current_step().is_none());
        assert_eq!(store.get_item(ONBOARDING_KEY).as_deref(), Some("true"));
    }
}
