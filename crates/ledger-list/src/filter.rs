//! Column filter dropdowns and the query-string rewrite they perform.
//!
//! The server renders the list with two maps: every distinct value of each
//! filterable column, and the values currently filtered on. A dropdown is
//! built on demand from those maps; applying it rewrites only its own field's
//! query parameters.

use std::collections::BTreeMap;

use serde::Deserialize;
use url::Url;

use crate::error::ListError;

/// The page-injected filter maps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterCatalog {
    #[serde(default)]
    pub options: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub active: BTreeMap<String, Vec<String>>,
}

impl FilterCatalog {
    /// Open the dropdown for `field`, if the column has any values.
    #[must_use]
    pub fn dropdown(&self, field: &str) -> Option<FilterDropdown> {
        let options = self.options.get(field)?;
        let active = self.active.get(field).map_or(&[][..], Vec::as_slice);
        FilterDropdown::open(field, options, active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDropdown {
    field: String,
    options: Vec<(String, bool)>,
}

impl FilterDropdown {
    /// `None` when there is nothing to filter on. Options already in the
    /// active filter start checked.
    #[must_use]
    pub fn open(field: &str, options: &[String], active: &[String]) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        let mut deduped: Vec<(String, bool)> = Vec::with_capacity(options.len());
        for value in options {
            if deduped.iter().any(|(seen, _)| seen == value) {
                continue;
            }
            deduped.push((value.clone(), active.contains(value)));
        }
        Some(Self {
            field: field.to_string(),
            options: deduped,
        })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn options(&self) -> &[(String, bool)] {
        &self.options
    }

    /// Returns false for a value the dropdown does not list.
    pub fn toggle(&mut self, value: &str, checked: bool) -> bool {
        match self.options.iter_mut().find(|(option, _)| option == value) {
            Some(option) => {
                option.1 = checked;
                true
            }
            None => false,
        }
    }

    /// The dropdown's own "select all" box.
    pub fn toggle_all(&mut self, checked: bool) {
        for option in &mut self.options {
            option.1 = checked;
        }
    }

    /// Checked values in option order.
    #[must_use]
    pub fn checked(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(value, _)| value.as_str())
            .collect()
    }

    /// `current` with every `field` parameter replaced by the checked values.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidUrl`] when `current` is not an absolute URL.
    pub fn apply(&self, current: &str) -> Result<String, ListError> {
        rewrite_query(current, &self.field, &self.checked())
    }

    /// `current` without any `field` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidUrl`] when `current` is not an absolute URL.
    pub fn clear(&self, current: &str) -> Result<String, ListError> {
        rewrite_query(current, &self.field, &[])
    }
}

/// Drop every `field` pair from the query of `current`, then append one pair
/// per value. Other parameters keep their order.
///
/// # Errors
///
/// Returns [`ListError::InvalidUrl`] when `current` is not an absolute URL.
pub fn rewrite_query(current: &str, field: &str, values: &[&str]) -> Result<String, ListError> {
    let mut url = Url::parse(current)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != field)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() && values.is_empty() {
        url.set_query(None);
    } else {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept);
        for value in values {
            query.append_pair(field, value);
        }
    }
    Ok(url.into())
}
