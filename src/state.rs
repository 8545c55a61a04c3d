use std::sync::Arc;

use crate::binding::{Dashboard, Signals};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{PayloadRange, SiteSelection, ALL_SITES};
use crate::data::model::Dataset;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Signals and chart slots.
    pub dashboard: Dashboard,

    /// Scatter colours, one per booster category in the whole dataset.
    pub booster_colors: ColorMap,

    /// By-site pie colours.
    pub site_colors: ColorMap,

    /// Payload handle positions as edited by the sliders.
    pub range_handles: [f64; 2],

    /// Text typed into the site dropdown's search box.
    pub site_query: String,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Arc<Dataset>) -> Result<Self, ConfigError> {
        let initial = config.payload_slider.initial_range()?;
        let booster_colors = ColorMap::new(dataset.booster_categories().iter().cloned());
        let site_colors = ColorMap::new(config.sites.iter().chain(dataset.sites()).cloned());
        let dashboard = Dashboard::new(
            dataset,
            Signals {
                site: SiteSelection::All,
                payload_range: initial,
            },
        );
        Ok(Self {
            config,
            dashboard,
            booster_colors,
            site_colors,
            range_handles: [initial.min, initial.max],
            site_query: String::new(),
        })
    }

    pub fn select_site(&mut self, site: SiteSelection) {
        if self.dashboard.set_site(site) {
            log::debug!("site selection -> {}", self.dashboard.signals().site);
        }
    }

    /// Dropdown values whose label contains `site_query`, ignoring case.
    /// "All Sites" comes first, then the configured sites in order.
    pub fn site_options(&self) -> Vec<&str> {
        let query = self.site_query.trim().to_lowercase();
        std::iter::once(ALL_SITES)
            .chain(self.config.sites.iter().map(String::as_str))
            .filter(|value| site_label(value).to_lowercase().contains(&query))
            .collect()
    }

    /// Push edited handle positions into the payload signal. The handle
    /// that moved last wins: the other one is dragged along so `min <= max`.
    pub fn commit_range(&mut self, moved_min: bool) {
        let [lo, hi] = &mut self.range_handles;
        if *lo > *hi {
            if moved_min {
                *hi = *lo;
            } else {
                *lo = *hi;
            }
        }
        let range = PayloadRange { min: *lo, max: *hi };
        if self.dashboard.set_payload_range(range) {
            log::debug!("payload range -> [{}, {}]", range.min, range.max);
        }
    }

    /// Records in the dataset vs. points currently plotted.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.dashboard.dataset().len(),
            self.dashboard.scatter_chart().points.len(),
        )
    }
}

/// Text shown in the dropdown for a raw site value.
pub fn site_label(value: &str) -> &str {
    if value == ALL_SITES {
        "All Sites"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::three_launches;

    fn state() -> AppState {
        AppState::new(DashboardConfig::default(), Arc::new(three_launches())).unwrap()
    }

    #[test]
    fn starts_from_configured_range() {
        let s = state();
        assert_eq!(s.range_handles, [2500.0, 8000.0]);
        assert_eq!(s.dashboard.signals().site, SiteSelection::All);
        assert_eq!(s.counts(), (3, 2));
    }

    #[test]
    fn crossing_handles_keeps_range_ordered() {
        let mut s = state();
        s.range_handles = [9000.0, 8000.0];
        s.commit_range(true);
        assert_eq!(s.range_handles, [9000.0, 9000.0]);
        assert!(s.dashboard.signals().payload_range.is_ordered());
        assert_eq!(s.counts().1, 1);

        s.range_handles = [9000.0, 1000.0];
        s.commit_range(false);
        assert_eq!(s.range_handles, [1000.0, 1000.0]);
        assert_eq!(s.counts().1, 0);
    }

    #[test]
    fn selecting_site_updates_both_charts() {
        let mut s = state();
        s.select_site(SiteSelection::from_value("B"));
        assert_eq!(s.dashboard.pie_chart().summary.slices.len(), 2);
        assert_eq!(s.counts().1, 1);
    }

    #[test]
    fn every_dataset_category_has_a_colour() {
        let s = state();
        for cat in s.dashboard.dataset().booster_categories() {
            assert_ne!(s.booster_colors.color_for(cat), eframe::egui::Color32::GRAY);
        }
    }

    #[test]
    fn site_search_filters_dropdown_ignoring_case() {
        let mut s = state();
        assert_eq!(s.site_options().len(), 1 + s.config.sites.len());

        s.site_query = "ksc".into();
        assert_eq!(s.site_options(), vec!["KSC LC-39A"]);

        s.site_query = "  slc ".into();
        assert_eq!(s.site_options(), vec!["VAFB SLC-4E", "CCAFS SLC-40"]);

        s.site_query = "all".into();
        assert_eq!(s.site_options(), vec![ALL_SITES]);

        s.site_query = "Cape Canaveral".into();
        assert!(s.site_options().is_empty());
    }
}
