//! Filter engine
//!
//! A [`FilterState`] combines a free-text term with one [`FacetMode`]:
//! nothing selected, a multi-select of facet values, or a single drill-down
//! value. A drill-down replaces the multi-select constraint on its own
//! dimension; selections on other dimensions keep applying.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use super::{FacetDimension, Vendor};

/// Selected values per dimension, OR within a dimension, AND across them
pub type Selections = BTreeMap<FacetDimension, BTreeSet<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FacetMode {
    #[default]
    None,
    /// One clicked facet value. `selections` are the multi-select choices
    /// made before the drill-down, restored when it is cleared.
    DrillDown {
        dimension: FacetDimension,
        value: String,
        selections: Selections,
    },
    MultiSelect(Selections),
}

impl FacetMode {
    fn from_selections(selections: Selections) -> Self {
        if selections.is_empty() {
            FacetMode::None
        } else {
            FacetMode::MultiSelect(selections)
        }
    }

    fn take_selections(&mut self) -> Selections {
        match std::mem::take(self) {
            FacetMode::None => Selections::new(),
            FacetMode::DrillDown { selections, .. } | FacetMode::MultiSelect(selections) => selections,
        }
    }
}

/// Interactive filter state, changed only through its transition methods
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    text: String,
    mode: FacetMode,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> &FacetMode {
        &self.mode
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check or uncheck one multi-select value
    pub fn toggle(&mut self, dimension: FacetDimension, value: impl Into<String>, checked: bool) {
        let value = value.into();
        let edit = |selections: &mut Selections| {
            if checked {
                selections.entry(dimension).or_default().insert(value);
            } else if let Some(values) = selections.get_mut(&dimension) {
                values.remove(&value);
                if values.is_empty() {
                    selections.remove(&dimension);
                }
            }
        };

        match &mut self.mode {
            FacetMode::DrillDown { selections, .. } => edit(selections),
            mode => {
                let mut selections = mode.take_selections();
                edit(&mut selections);
                *mode = FacetMode::from_selections(selections);
            }
        }
    }

    /// Narrow to exactly one facet value, replacing any previous drill-down
    pub fn drill_down(&mut self, dimension: FacetDimension, value: impl Into<String>) {
        let selections = self.mode.take_selections();
        self.mode = FacetMode::DrillDown {
            dimension,
            value: value.into(),
            selections,
        };
    }

    /// Leave drill-down, going back to whatever was multi-selected
    pub fn clear_drill_down(&mut self) {
        if let FacetMode::DrillDown { .. } = self.mode {
            let selections = self.mode.take_selections();
            self.mode = FacetMode::from_selections(selections);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_cleared(&self) -> bool {
        self.text.trim().is_empty() && self.mode == FacetMode::None
    }

    /// Whether one vendor passes every active predicate
    pub fn matches(&self, vendor: &Vendor) -> bool {
        let term = self.text.trim();
        if !term.is_empty() && !vendor.name.to_lowercase().contains(&term.to_lowercase()) {
            return false;
        }

        match &self.mode {
            FacetMode::None => true,
            FacetMode::DrillDown {
                dimension,
                value,
                selections,
            } => {
                vendor.has_facet_value(*dimension, value)
                    && matches_selections(vendor, selections, Some(*dimension))
            }
            FacetMode::MultiSelect(selections) => matches_selections(vendor, selections, None),
        }
    }
}

fn matches_selections(vendor: &Vendor, selections: &Selections, skip: Option<FacetDimension>) -> bool {
    selections
        .iter()
        .filter(|(dimension, _)| Some(**dimension) != skip)
        .all(|(dimension, wanted)| {
            wanted.is_empty()
                || vendor
                    .facet_values(*dimension)
                    .into_iter()
                    .any(|value| wanted.contains(value))
        })
}

/// The vendors passing `state`, in their original order.
///
/// The input is never modified; a cleared state returns a copy of it.
pub fn filter(vendors: &[Vendor], state: &FilterState) -> Vec<Vendor> {
    let filtered: Vec<Vendor> = vendors
        .iter()
        .filter(|vendor| state.matches(vendor))
        .cloned()
        .collect();
    debug!("Filter kept {} of {} vendors", filtered.len(), vendors.len());
    filtered
}

/// Parse a `dimension=value` pair as given on the command line
pub fn parse_selection(s: &str) -> Result<(FacetDimension, String), String> {
    let (dimension, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected dimension=value, got '{}'", s))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("missing value in '{}'", s));
    }
    Ok((dimension.parse()?, value.to_string()))
}
