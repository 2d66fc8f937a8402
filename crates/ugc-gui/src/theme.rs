//! egui visuals for each colour theme

use eframe::egui::{self, Color32, Visuals};
use ugc_domain::Theme;

pub fn accent(theme: Theme) -> Color32 {
    let [r, g, b] = theme.accent();
    Color32::from_rgb(r, g, b)
}

fn panel_fill(theme: Theme) -> Option<Color32> {
    match theme {
        Theme::Light | Theme::Dark => None,
        Theme::Cyberpunk => Some(Color32::from_rgb(16, 10, 28)),
        Theme::Sunset => Some(Color32::from_rgb(255, 247, 237)),
        Theme::Ocean => Some(Color32::from_rgb(8, 27, 41)),
        Theme::Forest => Some(Color32::from_rgb(12, 30, 20)),
        Theme::Royal => Some(Color32::from_rgb(24, 14, 40)),
        Theme::Rose => Some(Color32::from_rgb(255, 241, 242)),
    }
}

pub fn visuals(theme: Theme) -> Visuals {
    let mut visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    let accent = accent(theme);
    visuals.selection.bg_fill = accent;
    visuals.hyperlink_color = accent;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent);

    if let Some(fill) = panel_fill(theme) {
        visuals.panel_fill = fill;
        visuals.window_fill = fill;
    }
    visuals
}

pub fn apply(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(visuals(theme));
}
