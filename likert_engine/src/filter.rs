use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::*;
use crate::dataset::*;

/// The values allowed for each demographic column.
///
/// A column without values (or with an empty set) is not constrained.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FilterSelection {
    allowed: BTreeMap<DemographicColumn, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new() -> FilterSelection {
        FilterSelection::default()
    }

    /// Adds allowed values to a column, identified by its configuration key,
    /// its label or its source header.
    pub fn select(
        &mut self,
        headers: &DemographicHeaders,
        name: &str,
        values: &[String],
    ) -> Result<(), EngineErrors> {
        let column = headers.resolve(name)?;
        self.select_column(column, values);
        Ok(())
    }

    pub fn select_column(&mut self, column: DemographicColumn, values: &[String]) {
        self.allowed
            .entry(column)
            .or_insert_with(BTreeSet::new)
            .extend(values.iter().cloned());
    }

    pub fn allowed(&self, column: DemographicColumn) -> Option<&BTreeSet<String>> {
        self.allowed.get(&column).filter(|s| !s.is_empty())
    }

    /// The constrained columns, in display order.
    pub fn active(&self) -> Vec<(DemographicColumn, &BTreeSet<String>)> {
        DemographicColumn::ALL
            .iter()
            .filter_map(|c| self.allowed(*c).map(|s| (*c, s)))
            .collect()
    }
}

fn accepts(active: &[(DemographicColumn, &BTreeSet<String>)], respondent: &Respondent) -> bool {
    active
        .iter()
        .all(|(column, values)| match respondent.demographic(*column) {
            Some(v) => values.contains(v),
            None => false,
        })
}

/// The respondents of a dataset that passed a filter selection.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over all the respondents.
    pub fn all(dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the selected respondents in the dataset, in increasing order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn respondents(&self) -> impl Iterator<Item = &'a Respondent> + '_ {
        let all = self.dataset.respondents();
        self.rows.iter().map(move |idx| &all[*idx])
    }
}

/// Result of a filter. No matching respondent is a normal outcome, which
/// callers are expected to report instead of running further computations.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum FilterOutcome<'a> {
    Matched(FilteredView<'a>),
    NoMatch,
}

impl<'a> FilterOutcome<'a> {
    pub fn view(self) -> Option<FilteredView<'a>> {
        match self {
            FilterOutcome::Matched(v) => Some(v),
            FilterOutcome::NoMatch => None,
        }
    }
}

/// Keeps the respondents that match every constrained column (and any of the
/// values allowed for that column).
pub fn apply_filters<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilterOutcome<'a> {
    let active = selection.active();
    let rows: Vec<usize> = dataset
        .respondents()
        .iter()
        .enumerate()
        .filter(|(_, r)| accepts(&active, r))
        .map(|(idx, _)| idx)
        .collect();
    debug!(
        "apply_filters: {} of {} respondents kept with {:?}",
        rows.len(),
        dataset.len(),
        active
    );
    if rows.is_empty() {
        FilterOutcome::NoMatch
    } else {
        FilterOutcome::Matched(FilteredView { dataset, rows })
    }
}

/// The distinct values of a demographic column over the whole dataset, sorted.
///
/// Missing values are skipped. The current filter selection has no effect on
/// the outcome, so that the choices offered to the user stay stable.
pub fn distinct_values(dataset: &Dataset, column: DemographicColumn) -> Vec<String> {
    let values: BTreeSet<&str> = dataset
        .respondents()
        .iter()
        .filter_map(|r| r.demographic(column))
        .collect();
    values.into_iter().map(|s| s.to_string()).collect()
}
