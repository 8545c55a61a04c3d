//! Chart-ready aggregations over a filtered [`View`].

use std::collections::BTreeMap;

use crate::data::filter::View;

pub const SUCCESS_LABEL: &str = "Success";
pub const FAILURE_LABEL: &str = "Failure";

// ---------------------------------------------------------------------------
// Pie summary
// ---------------------------------------------------------------------------

/// How a pie summary groups its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieMode {
    /// Successful launches counted per site.
    BySite,
    /// Success vs. failure for a view already restricted to one site.
    SingleSite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

/// Ordered slices of a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieSummary {
    pub slices: Vec<PieSlice>,
}

impl PieSummary {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }

    /// Fraction of the total held by `slice`, 0 when the pie is empty.
    pub fn share(&self, slice: &PieSlice) -> f64 {
        match self.total() {
            0 => 0.0,
            total => slice.count as f64 / total as f64,
        }
    }
}

pub fn compute_pie_summary(view: &View<'_>, mode: PieMode) -> PieSummary {
    match mode {
        PieMode::BySite => {
            // Sites without a success never enter the map.
            let mut per_site: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in view.iter().filter(|r| r.is_success()) {
                *per_site.entry(rec.launch_site.as_str()).or_default() += 1;
            }
            PieSummary {
                slices: per_site
                    .into_iter()
                    .map(|(site, count)| PieSlice {
                        label: site.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
        PieMode::SingleSite => {
            let successes: usize = view.iter().map(|r| r.outcome_class as usize).sum();
            PieSummary {
                slices: vec![
                    PieSlice {
                        label: SUCCESS_LABEL.to_string(),
                        count: successes,
                    },
                    PieSlice {
                        label: FAILURE_LABEL.to_string(),
                        count: view.len() - successes,
                    },
                ],
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome_class: u8,
    pub booster_category: String,
}

/// One point per row, in view order.
pub fn compute_scatter_points(view: &View<'_>) -> Vec<ScatterPoint> {
    view.iter()
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            outcome_class: r.outcome_class,
            booster_category: r.booster_category.clone(),
        })
        .collect()
}
