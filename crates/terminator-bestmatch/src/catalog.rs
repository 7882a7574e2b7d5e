//! Candidate catalog: every name a descendant can be reached by
//!
//! Names are derived from each descendant's automation id, class name and
//! display name, alone and in pairs, plus "label + control type" names for
//! input controls that follow a label. Order matters: it is the last
//! tie-break when two candidates score the same.

use crate::element::{UIElement, LABELLED_CONTROL_TYPES};
use crate::errors::AutomationError;
use crate::utils::clean_separators;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// One candidate name and the index of its element in the catalog's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub element: usize,
}

/// Candidate names built from a root's descendants.
///
/// Names are not unique: the same string can point at different elements and
/// one element is reachable through many names. Empty names are kept here and
/// skipped by the matcher.
#[derive(Debug, Clone, Default)]
pub struct CandidateCatalog {
    elements: Vec<UIElement>,
    entries: Vec<CatalogEntry>,
}

// Attributes of one descendant, read once per build
struct Identifiers {
    automation_id: String,
    class_name: String,
    name: String,
    control_type: String,
}

impl CandidateCatalog {
    /// Index every descendant of `root`.
    ///
    /// Fails with `InvalidRoot` when `root` is no longer part of the tree;
    /// any traversal error while walking is returned as is.
    #[instrument(level = "debug", skip(root), fields(root = %root.describe()))]
    pub fn build(root: &UIElement) -> Result<Self, AutomationError> {
        if !root.is_valid() {
            return Err(AutomationError::InvalidRoot(format!(
                "{} is not attached to a tree",
                root.describe()
            )));
        }

        let elements = root.descendants()?;
        let identifiers = elements
            .iter()
            .map(|element| {
                Ok(Identifiers {
                    automation_id: element.automation_id()?,
                    class_name: element.class_name()?,
                    name: element.name()?,
                    control_type: element.control_type()?.to_lowercase(),
                })
            })
            .collect::<Result<Vec<_>, AutomationError>>()?;

        let mut catalog = Self {
            elements,
            entries: Vec::with_capacity(identifiers.len() * 6),
        };

        let rules: [fn(&Identifiers) -> String; 6] = [
            |ids| ids.automation_id.clone(),
            |ids| ids.class_name.clone(),
            |ids| ids.name.clone(),
            |ids| format!("{}_{}", ids.class_name, ids.name),
            |ids| format!("{}_{}", ids.automation_id, ids.name),
            |ids| format!("{}_{}", ids.class_name, ids.automation_id),
        ];
        for rule in rules {
            for (index, ids) in identifiers.iter().enumerate() {
                catalog.push(rule(ids), index);
            }
        }

        // Inputs are usually anonymous, but the label right before them is not
        for (index, ids) in identifiers.iter().enumerate() {
            if !LABELLED_CONTROL_TYPES.contains(&ids.control_type.as_str()) {
                continue;
            }
            let sibling = match catalog.elements.get(index) {
                Some(element) => element.previous_sibling()?,
                None => None,
            };
            let Some(label) = sibling else {
                continue;
            };
            let label_id = label.automation_id()?;
            let label_name = label.name()?;
            catalog.push(format!("{label_id}{}", ids.control_type), index);
            catalog.push(format!("{label_name}{}", ids.control_type), index);
        }

        debug!(
            "Built catalog with {} candidates over {} elements",
            catalog.entries.len(),
            catalog.elements.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from explicit (name, element) pairs, keeping their order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, UIElement)>,
    {
        let mut catalog = Self::default();
        for (name, element) in pairs {
            let index = match catalog.elements.iter().position(|e| *e == element) {
                Some(index) => index,
                None => {
                    catalog.elements.push(element);
                    catalog.elements.len() - 1
                }
            };
            catalog.push(name, index);
        }
        catalog
    }

    fn push(&mut self, name: String, element: usize) {
        self.entries.push(CatalogEntry { name, element });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Elements the catalog was built from, in tree order.
    pub fn elements(&self) -> &[UIElement] {
        &self.elements
    }

    pub fn element_of(&self, entry: &CatalogEntry) -> Option<&UIElement> {
        self.elements.get(entry.element)
    }

    /// Candidate names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// (name, element) pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UIElement)> + '_ {
        self.entries.iter().filter_map(|entry| {
            self.element_of(entry)
                .map(|element| (entry.name.as_str(), element))
        })
    }

    /// Distinct names that lead to `element`, separators trimmed, in
    /// catalog order. Useful in error messages and when writing tests.
    pub fn queries_producing(&self, element: &UIElement) -> Vec<String> {
        let mut seen = HashSet::new();
        self.iter()
            .filter(|(_, candidate)| *candidate == element)
            .map(|(name, _)| clean_separators(name))
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}
