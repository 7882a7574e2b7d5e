//! Fuzzy name resolution over accessibility trees
//!
//! Test scripts like to address controls by friendly names such as
//! `mainWindow.lblNewItemEdit` even when the exact automation id is unknown
//! or changes between builds. This crate indexes a window's descendants under
//! every name they could plausibly be called by and picks the best match for
//! a query.
//!
//! ```
//! use bestmatch::{NameResolver, SnapshotNode, SnapshotTree};
//!
//! let window = SnapshotNode::new("window", "frmMain", "Main").with_children(vec![
//!     SnapshotNode::new("text", "lblNewItem", "New item"),
//!     SnapshotNode::new("edit", "", ""),
//! ]);
//! let tree = SnapshotTree::from_node(&window);
//! let mut resolver = NameResolver::new(tree.root())?;
//!
//! let edit = resolver.resolve_by_name("lblNewItemEdit")?;
//! assert_eq!(edit.control_type()?, "edit");
//! # Ok::<(), bestmatch::AutomationError>(())
//! ```

pub mod catalog;
pub mod element;
pub mod errors;
pub mod matcher;
pub mod resolver;
pub mod snapshot;
#[cfg(test)]
mod tests;
pub mod tree_formatter;
pub mod utils;

pub use catalog::{CandidateCatalog, CatalogEntry};
pub use element::{Attribute, UIElement, UIElementImpl, LABELLED_CONTROL_TYPES};
pub use errors::AutomationError;
pub use matcher::{find_best_match, resolve, similarity, BestMatch, MatchConfig, DEFAULT_CUTOFF};
pub use resolver::NameResolver;
pub use snapshot::{SnapshotElement, SnapshotNode, SnapshotTree};
pub use tree_formatter::{
    format_candidate_report, format_control_identifiers, format_element_report,
};
pub use utils::normalize;
