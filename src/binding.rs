//! Reactive binding between the two input signals and the two chart slots.
//!
//! Each [`Binding`] names the signals it reads, the slot it writes and the
//! handler that recomputes the slot. [`Dashboard`] dispatches a signal change
//! to every binding that lists the signal, recomputing from the full current
//! signal set; it never patches a previous result.

use std::sync::Arc;

use crate::data::filter::{self, filter_by_site, FilterCriteria, PayloadRange, SiteSelection, View};
use crate::data::model::Dataset;
use crate::summary::{compute_pie_summary, compute_scatter_points, PieMode, PieSummary, ScatterPoint};

// ---------------------------------------------------------------------------
// Signals, slots and chart states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    SiteSelection,
    PayloadRange,
}

/// Current values of every input signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSlot {
    PieChart,
    ScatterChart,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PieChart {
    pub title: String,
    pub summary: PieSummary,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartState {
    pub fn slot(&self) -> OutputSlot {
        match self {
            ChartState::Pie(_) => OutputSlot::PieChart,
            ChartState::Scatter(_) => OutputSlot::ScatterChart,
        }
    }
}

// ---------------------------------------------------------------------------
// Binding table
// ---------------------------------------------------------------------------

pub type Handler = fn(&Dataset, &Signals) -> ChartState;

pub struct Binding {
    pub inputs: &'static [SignalKind],
    pub output: OutputSlot,
    pub handler: Handler,
}

/// Both charts read both controls.
pub const BINDINGS: &[Binding] = &[
    Binding {
        inputs: &[SignalKind::SiteSelection, SignalKind::PayloadRange],
        output: OutputSlot::PieChart,
        handler: pie_chart,
    },
    Binding {
        inputs: &[SignalKind::SiteSelection, SignalKind::PayloadRange],
        output: OutputSlot::ScatterChart,
        handler: scatter_chart,
    },
];

/// Success breakdown. The payload range is deliberately not applied here.
pub fn pie_chart(dataset: &Dataset, signals: &Signals) -> ChartState {
    let view = filter_by_site(&View::all(dataset), &signals.site);
    let chart = match &signals.site {
        SiteSelection::All => PieChart {
            title: "Total Successful Launches by Site".to_string(),
            summary: compute_pie_summary(&view, PieMode::BySite),
        },
        SiteSelection::Site(name) => PieChart {
            title: format!("Launch Success Rate for Site {name}"),
            summary: compute_pie_summary(&view, PieMode::SingleSite),
        },
    };
    ChartState::Pie(chart)
}

/// Payload against outcome for launches inside the payload range.
pub fn scatter_chart(dataset: &Dataset, signals: &Signals) -> ChartState {
    if !signals.payload_range.is_ordered() {
        log::warn!(
            "Inverted payload range [{}, {}], scatter will be empty",
            signals.payload_range.min,
            signals.payload_range.max
        );
    }
    let criteria = FilterCriteria {
        site: signals.site.clone(),
        payload_range: signals.payload_range,
    };
    let view = filter::apply(dataset, &criteria);
    if view.is_empty() {
        log::debug!("No launches match {criteria:?}");
    }
    let title = match &signals.site {
        SiteSelection::All => "Correlation between Payload Mass and Success for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Correlation between Payload Mass and Success for Site {name}"),
    };
    ChartState::Scatter(ScatterChart {
        title,
        points: compute_scatter_points(&view),
    })
}

// ---------------------------------------------------------------------------
// Dashboard – signal state plus output slots
// ---------------------------------------------------------------------------

pub struct Dashboard {
    dataset: Arc<Dataset>,
    bindings: &'static [Binding],
    signals: Signals,
    pie_chart: PieChart,
    scatter_chart: ScatterChart,
}

impl Dashboard {
    /// Start with the given signals and compute every slot once.
    pub fn new(dataset: Arc<Dataset>, signals: Signals) -> Self {
        Self::with_bindings(dataset, signals, BINDINGS)
    }

    pub fn with_bindings(dataset: Arc<Dataset>, signals: Signals, bindings: &'static [Binding]) -> Self {
        let mut dashboard = Dashboard {
            dataset,
            bindings,
            signals,
            pie_chart: PieChart::default(),
            scatter_chart: ScatterChart::default(),
        };
        for binding in bindings {
            dashboard.run(binding);
        }
        dashboard
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    pub fn pie_chart(&self) -> &PieChart {
        &self.pie_chart
    }

    pub fn scatter_chart(&self) -> &ScatterChart {
        &self.scatter_chart
    }

    /// Returns whether anything was recomputed.
    pub fn set_site(&mut self, site: SiteSelection) -> bool {
        if self.signals.site == site {
            return false;
        }
        self.signals.site = site;
        self.dispatch(SignalKind::SiteSelection);
        true
    }

    /// Returns whether anything was recomputed.
    pub fn set_payload_range(&mut self, range: PayloadRange) -> bool {
        if self.signals.payload_range == range {
            return false;
        }
        self.signals.payload_range = range;
        self.dispatch(SignalKind::PayloadRange);
        true
    }

    fn dispatch(&mut self, changed: SignalKind) {
        let bindings = self.bindings;
        for binding in bindings.iter().filter(|b| b.inputs.contains(&changed)) {
            self.run(binding);
        }
    }

    fn run(&mut self, binding: &Binding) {
        let state = (binding.handler)(&self.dataset, &self.signals);
        debug_assert_eq!(state.slot(), binding.output);
        match state {
            ChartState::Pie(chart) => {
                log::debug!(
                    "{:?} <- {} ({} launches)",
                    binding.output,
                    chart.title,
                    chart.summary.total()
                );
                self.pie_chart = chart;
            }
            ChartState::Scatter(chart) => {
                log::debug!("{:?} <- {} ({} points)", binding.output, chart.title, chart.points.len());
                self.scatter_chart = chart;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::three_launches;
    use crate::summary::{FAILURE_LABEL, SUCCESS_LABEL};

    fn range(min: f64, max: f64) -> PayloadRange {
        PayloadRange { min, max }
    }

    fn dashboard(site: &str, min: f64, max: f64) -> Dashboard {
        Dashboard::new(
            Arc::new(three_launches()),
            Signals {
                site: SiteSelection::from_value(site),
                payload_range: range(min, max),
            },
        )
    }

    fn masses(d: &Dashboard) -> Vec<f64> {
        d.scatter_chart().points.iter().map(|p| p.payload_mass_kg).collect()
    }

    #[test]
    fn handlers_fill_their_declared_slots() {
        let ds = three_launches();
        let signals = Signals {
            site: SiteSelection::All,
            payload_range: range(0.0, 10_000.0),
        };
        for binding in BINDINGS {
            assert_eq!((binding.handler)(&ds, &signals).slot(), binding.output);
        }
    }

    #[test]
    fn every_signal_drives_both_slots() {
        for kind in [SignalKind::SiteSelection, SignalKind::PayloadRange] {
            let slots: Vec<OutputSlot> = BINDINGS
                .iter()
                .filter(|b| b.inputs.contains(&kind))
                .map(|b| b.output)
                .collect();
            assert_eq!(slots, vec![OutputSlot::PieChart, OutputSlot::ScatterChart]);
        }
    }

    #[test]
    fn initial_state_all_sites_default_range() {
        let d = dashboard("ALL", 2500.0, 8000.0);
        assert_eq!(masses(&d), vec![3000.0, 5000.0]);
        let pie = &d.pie_chart().summary;
        assert_eq!(pie.get("A"), Some(1));
        assert_eq!(pie.get("B"), Some(1));
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(d.pie_chart().title, "Total Successful Launches by Site");
    }

    #[test]
    fn single_site_full_range() {
        let mut d = dashboard("ALL", 0.0, 10_000.0);
        assert!(d.set_site(SiteSelection::from_value("A")));
        let pie = &d.pie_chart().summary;
        assert_eq!(pie.get(SUCCESS_LABEL), Some(1));
        assert_eq!(pie.get(FAILURE_LABEL), Some(1));
        assert_eq!(d.pie_chart().title, "Launch Success Rate for Site A");
        assert_eq!(masses(&d), vec![3000.0, 9000.0]);
        assert_eq!(
            d.scatter_chart().title,
            "Correlation between Payload Mass and Success for Site A"
        );
    }

    #[test]
    fn pie_ignores_payload_range() {
        let unfiltered = dashboard("ALL", 0.0, 10_000.0);
        let mut d = dashboard("ALL", 2500.0, 8000.0);
        assert!(d.set_payload_range(range(0.0, 0.0)));
        assert!(d.scatter_chart().points.is_empty());
        assert_eq!(d.pie_chart(), unfiltered.pie_chart());

        // Single-site pie is equally unaffected.
        d.set_site(SiteSelection::from_value("A"));
        assert_eq!(d.pie_chart().summary.total(), 2);
    }

    #[test]
    fn range_change_recomputes_scatter_for_current_site() {
        let mut d = dashboard("B", 2500.0, 8000.0);
        assert_eq!(masses(&d), vec![5000.0]);
        d.set_payload_range(range(6000.0, 10_000.0));
        assert!(d.scatter_chart().points.is_empty());
        d.set_site(SiteSelection::from_value("A"));
        assert_eq!(masses(&d), vec![9000.0]);
    }

    #[test]
    fn inverted_range_yields_empty_scatter() {
        let mut d = dashboard("ALL", 2500.0, 8000.0);
        d.set_payload_range(range(8000.0, 2500.0));
        assert!(d.scatter_chart().points.is_empty());
        assert_eq!(d.pie_chart().summary.total(), 2);
    }

    #[test]
    fn unchanged_signal_is_a_no_op() {
        let mut d = dashboard("ALL", 2500.0, 8000.0);
        assert!(!d.set_site(SiteSelection::All));
        assert!(!d.set_payload_range(range(2500.0, 8000.0)));
    }

    #[test]
    fn recomputation_depends_only_on_current_signals() {
        let mut d = dashboard("ALL", 2500.0, 8000.0);
        d.set_site(SiteSelection::from_value("A"));
        d.set_payload_range(range(0.0, 4000.0));
        d.set_site(SiteSelection::All);
        d.set_payload_range(range(2500.0, 8000.0));

        let fresh = dashboard("ALL", 2500.0, 8000.0);
        assert_eq!(d.pie_chart(), fresh.pie_chart());
        assert_eq!(d.scatter_chart(), fresh.scatter_chart());
        assert_eq!(d.dataset().len(), 3);
    }

    #[test]
    fn unknown_site_shows_empty_charts() {
        let d = dashboard("Boca Chica", 0.0, 10_000.0);
        assert!(d.scatter_chart().points.is_empty());
        assert_eq!(d.pie_chart().summary.total(), 0);
        assert_eq!(d.pie_chart().summary.slices.len(), 2);
    }
}
