use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense, Stroke, Ui};

use crate::config::SliderConfig;
use crate::data::filter::SiteSelection;
use crate::state::{site_label, AppState};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the dashboard title and record counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&state.config.title)
                .size(32.0)
                .color(Color32::from_rgb(0x50, 0x3d, 0x36)),
        );
    });
    let (total, visible) = state.counts();
    let successes = state.dashboard.dataset().success_count();
    let mut status = format!("{total} launches loaded ({successes} successful), {visible} in scatter");
    if let Some((lo, hi)) = state.dashboard.dataset().payload_bounds() {
        status.push_str(&format!("  ·  payloads {lo:.0}–{hi:.0} kg"));
    }
    ui.label(RichText::new(status).weak());
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

/// Searchable launch-site selector: "All Sites" followed by the configured
/// sites, narrowed by the text typed at the top of the popup.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let current = state.dashboard.signals().site.clone();
    let mut picked = None;

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(site_label(current.value()))
        .width(ui.available_width().min(400.0))
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query)
                    .hint_text("Search sites")
                    .desired_width(f32::INFINITY),
            );
            let options = state.site_options();
            if options.is_empty() {
                ui.label(RichText::new("No matching site").weak());
            }
            for value in options {
                if ui
                    .selectable_label(current.value() == value, site_label(value))
                    .clicked()
                {
                    picked = Some(SiteSelection::from_value(value));
                }
            }
        })
        .response
        .on_hover_text("Select a launch site");

    if let Some(site) = picked {
        state.site_query.clear();
        state.select_site(site);
    }
}

// ---------------------------------------------------------------------------
// Payload range slider
// ---------------------------------------------------------------------------

/// Two-handle slider over `[cfg.min, cfg.max]` snapping to `cfg.step`.
/// Returns `Some(true)` if the min handle moved, `Some(false)` for max.
pub fn range_slider(ui: &mut Ui, handles: &mut [f64; 2], cfg: &SliderConfig) -> Option<bool> {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 44.0), Sense::hover());
    let left = rect.left() + 12.0;
    let right = rect.right() - 12.0;
    let track_y = rect.top() + 12.0;
    let span = (cfg.max - cfg.min).max(f64::EPSILON);

    let to_x = |v: f64| left + ((v - cfg.min) / span) as f32 * (right - left);
    let to_value = |x: f32| {
        let t = ((x - left) / (right - left)).clamp(0.0, 1.0) as f64;
        let snapped = ((t * span) / cfg.step).round() * cfg.step;
        (cfg.min + snapped).clamp(cfg.min, cfg.max)
    };

    let mut moved = None;
    for (i, handle) in handles.iter_mut().enumerate() {
        let hit = Rect::from_center_size(pos2(to_x(*handle), track_y), vec2(20.0, 20.0));
        let response = ui.interact(hit, ui.id().with(("payload_handle", i)), Sense::drag());
        if !response.dragged() {
            continue;
        }
        if let Some(pointer) = response.interact_pointer_pos() {
            let value = to_value(pointer.x);
            if value != *handle {
                *handle = value;
                moved = Some(i == 0);
            }
        }
    }

    let painter = ui.painter();
    let visuals = ui.visuals();
    let accent = visuals.selection.bg_fill;
    painter.line_segment(
        [pos2(left, track_y), pos2(right, track_y)],
        Stroke::new(4.0, visuals.widgets.inactive.bg_fill),
    );
    painter.line_segment(
        [pos2(to_x(handles[0]), track_y), pos2(to_x(handles[1]), track_y)],
        Stroke::new(4.0, accent),
    );
    for &value in handles.iter() {
        painter.circle(pos2(to_x(value), track_y), 8.0, visuals.extreme_bg_color, Stroke::new(2.0, accent));
    }
    for &mark in &cfg.marks {
        painter.text(
            pos2(to_x(mark), track_y + 14.0),
            Align2::CENTER_TOP,
            format!("{mark:.0}"),
            FontId::proportional(12.0),
            visuals.text_color(),
        );
    }

    moved
}

/// Payload label, slider and the numeric handle positions.
pub fn payload_controls(ui: &mut Ui, state: &mut AppState) {
    ui.label("Payload range (Kg):");
    let cfg = state.config.payload_slider.clone();
    if let Some(moved_min) = range_slider(ui, &mut state.range_handles, &cfg) {
        state.commit_range(moved_min);
    }
    let [lo, hi] = state.range_handles;
    ui.label(RichText::new(format!("{lo:.0} – {hi:.0} kg")).small());
}
