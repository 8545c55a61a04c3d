use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{vec2, Color32, Painter, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::binding::{PieChart, ScatterChart};
use crate::color::{outcome_color, ColorMap};
use crate::config::SliderConfig;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Fill the sector `[start, start + sweep]` as a fan of convex pieces.
fn fill_sector(painter: &Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece = sweep / pieces as f32;
    for p in 0..pieces {
        let a0 = start + piece * p as f32;
        let steps = ((piece / 0.05).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        points.extend((0..=steps).map(|s| {
            let a = a0 + piece * s as f32 / steps as f32;
            center + radius * vec2(a.cos(), a.sin())
        }));
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
}

/// Render the success pie with a legend of counts and shares.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, site_colors: &ColorMap) {
    ui.heading(&chart.title);
    let summary = &chart.summary;
    if summary.total() == 0 {
        ui.label("No launches match this selection.");
        return;
    }

    let color_of = |label: &str| outcome_color(label).unwrap_or_else(|| site_colors.color_for(label));

    ui.horizontal(|ui: &mut Ui| {
        let size = 260.0;
        let (rect, _) = ui.allocate_exact_size(vec2(size, size), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size * 0.45;
        let separator = Stroke::new(1.5, ui.visuals().panel_fill);

        let mut angle = -FRAC_PI_2;
        for slice in &summary.slices {
            let sweep = summary.share(slice) as f32 * TAU;
            if sweep <= 0.0 {
                continue;
            }
            fill_sector(&painter, center, radius, angle, sweep, color_of(slice.label.as_str()));
            if sweep < TAU {
                painter.line_segment([center, center + radius * vec2(angle.cos(), angle.sin())], separator);
            }
            angle += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &summary.slices {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color_of(slice.label.as_str())));
                    ui.label(format!(
                        "{}: {} ({:.1}%)",
                        slice.label,
                        slice.count,
                        summary.share(slice) * 100.0
                    ));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload mass (x) against outcome class (y), one series per booster
/// category so the legend doubles as the colour key.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, booster_colors: &ColorMap, slider: &SliderConfig) {
    ui.heading(&chart.title);

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &chart.points {
        series
            .entry(p.booster_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, p.outcome_class as f64]);
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(slider.min)
        .include_x(slider.max)
        .include_y(-0.25)
        .include_y(1.25)
        .height(360.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, coords) in series {
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(booster_colors.color_for(category))
                        .radius(5.0),
                );
            }
        });

    if chart.points.is_empty() {
        ui.label(RichText::new("No launches in the selected payload range.").weak());
    }
}
