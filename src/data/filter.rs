use std::fmt;

use super::model::{Dataset, LaunchRecord};
use crate::error::RangeError;

/// Dropdown value meaning "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The launch-site dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw dropdown value; `"ALL"` selects every site.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The dropdown value this selection corresponds to.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    /// Build a range, rejecting `min > max`.
    pub fn try_new(min: f64, max: f64) -> Result<Self, RangeError> {
        let range = PayloadRange { min, max };
        if range.is_ordered() {
            Ok(range)
        } else {
            Err(RangeError::Inverted { min, max })
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, mass_kg: f64) -> bool {
        self.min <= mass_kg && mass_kg <= self.max
    }
}

/// One user interaction's worth of filter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

// ---------------------------------------------------------------------------
// View – an ordered subset of dataset rows
// ---------------------------------------------------------------------------

/// Borrowed rows of a [`Dataset`] in their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View<'a> {
    rows: Vec<&'a LaunchRecord>,
}

impl<'a> View<'a> {
    /// A view over every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        View {
            rows: dataset.records().iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a LaunchRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn retain(&self, keep: impl Fn(&LaunchRecord) -> bool) -> Self {
        View {
            rows: self.rows.iter().copied().filter(|r| keep(*r)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Rows with `min <= payload <= max`. An inverted range matches nothing.
pub fn filter_by_payload<'a>(view: &View<'a>, range: PayloadRange) -> View<'a> {
    view.retain(|r| range.contains(r.payload_mass_kg))
}

/// Rows launched from the selected site. `All` returns the rows unchanged;
/// a site absent from the data yields an empty view.
pub fn filter_by_site<'a>(view: &View<'a>, site: &SiteSelection) -> View<'a> {
    match site {
        SiteSelection::All => view.clone(),
        SiteSelection::Site(name) => view.retain(|r| r.launch_site == *name),
    }
}

/// Payload range first, then site.
pub fn apply<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> View<'a> {
    let by_payload = filter_by_payload(&View::all(dataset), criteria.payload_range);
    filter_by_site(&by_payload, &criteria.site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, three_launches};

    fn range(min: f64, max: f64) -> PayloadRange {
        PayloadRange { min, max }
    }

    #[test]
    fn payload_filter_is_inclusive() {
        let ds = three_launches();
        let view = filter_by_payload(&View::all(&ds), range(3000.0, 5000.0));
        let masses: Vec<f64> = view.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![3000.0, 5000.0]);
    }

    #[test]
    fn payload_filter_respects_bounds_for_many_ranges() {
        let ds = Dataset::from_records(
            (0..=20)
                .map(|i| record("A", i as f64 * 500.0, (i % 2) as u8, "F9 FT B1"))
                .collect(),
        );
        for lo in (0..=10_000).step_by(1000) {
            for hi in (lo..=10_000).step_by(1500) {
                let r = range(lo as f64, hi as f64);
                let view = filter_by_payload(&View::all(&ds), r);
                assert!(view.iter().all(|rec| r.contains(rec.payload_mass_kg)));
                let expected = ds.records().iter().filter(|rec| r.contains(rec.payload_mass_kg)).count();
                assert_eq!(view.len(), expected);
            }
        }
        let full = filter_by_payload(&View::all(&ds), range(0.0, 10_000.0));
        assert_eq!(full.len(), ds.len());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = three_launches();
        assert!(filter_by_payload(&View::all(&ds), range(8000.0, 2500.0)).is_empty());
        assert_eq!(
            PayloadRange::try_new(8000.0, 2500.0),
            Err(RangeError::Inverted { min: 8000.0, max: 2500.0 })
        );
        assert!(PayloadRange::try_new(0.0, 0.0).is_ok());
    }

    #[test]
    fn site_filter_all_is_identity() {
        let ds = three_launches();
        let all = View::all(&ds);
        assert_eq!(filter_by_site(&all, &SiteSelection::All), all);
    }

    #[test]
    fn site_filter_keeps_matching_rows_in_order() {
        let ds = three_launches();
        let view = filter_by_site(&View::all(&ds), &SiteSelection::from_value("A"));
        let masses: Vec<f64> = view.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![3000.0, 9000.0]);
    }

    #[test]
    fn unknown_site_is_empty_not_error() {
        let ds = three_launches();
        let view = filter_by_site(&View::all(&ds), &SiteSelection::from_value("Boca Chica"));
        assert!(view.is_empty());
    }

    #[test]
    fn apply_composes_both_filters_without_touching_dataset() {
        let ds = three_launches();
        let criteria = FilterCriteria {
            site: SiteSelection::from_value("A"),
            payload_range: range(2500.0, 8000.0),
        };
        let view = apply(&ds, &criteria);
        assert_eq!(view.len(), 1);
        assert_eq!(view.iter().next().map(|r| r.payload_mass_kg), Some(3000.0));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn all_value_round_trips() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::All.value(), "ALL");
        assert_eq!(SiteSelection::from_value("KSC LC-39A").to_string(), "KSC LC-39A");
    }
}
