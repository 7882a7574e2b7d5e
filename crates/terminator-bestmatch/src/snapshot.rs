//! In-memory accessibility tree loaded from a JSON snapshot
//!
//! A snapshot is a recursive [`SnapshotNode`] document, typically captured
//! from a live window once and replayed in tests or the inspector CLI.

use crate::element::{UIElement, UIElementImpl};
use crate::errors::AutomationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// One node of a serialized tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotNode {
    pub automation_id: String,
    pub name: String,
    pub class_name: String,
    pub control_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(f64, f64, f64, f64)>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    /// Shorthand for fixtures: a node with the given control type and ids.
    pub fn new(control_type: &str, automation_id: &str, name: &str) -> Self {
        Self {
            control_type: control_type.to_string(),
            automation_id: automation_id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_bounds(mut self, bounds: (f64, f64, f64, f64)) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_children(mut self, children: Vec<SnapshotNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug)]
struct NodeData {
    automation_id: String,
    name: String,
    class_name: String,
    control_type: String,
    bounds: Option<(f64, f64, f64, f64)>,
    properties: BTreeMap<String, String>,
    parent: Option<usize>,
    children: Vec<usize>,
    detached: AtomicBool,
}

/// Arena holding every node of one snapshot, in pre-order.
#[derive(Debug)]
pub struct SnapshotTree {
    nodes: Vec<NodeData>,
}

impl SnapshotTree {
    /// Flatten `root` into an arena and return the tree.
    pub fn from_node(root: &SnapshotNode) -> Arc<Self> {
        // Iterative pre-order so arena indices follow document order
        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<(&SnapshotNode, Option<usize>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let index = nodes.len();
            nodes.push(NodeData {
                automation_id: node.automation_id.clone(),
                name: node.name.clone(),
                class_name: node.class_name.clone(),
                control_type: node.control_type.to_lowercase(),
                bounds: node.bounds,
                properties: node.properties.clone(),
                parent,
                children: Vec::new(),
                detached: AtomicBool::new(false),
            });
            if let Some(parent_index) = parent {
                if let Some(parent_node) = nodes.get_mut(parent_index) {
                    parent_node.children.push(index);
                }
            }
            for child in node.children.iter().rev() {
                stack.push((child, Some(index)));
            }
        }
        debug!("Loaded snapshot tree with {} nodes", nodes.len());
        Arc::new(Self { nodes })
    }

    pub fn from_json(json: &str) -> Result<Arc<Self>, AutomationError> {
        let root: SnapshotNode = serde_json::from_str(json)?;
        Ok(Self::from_node(&root))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Arc<Self>, AutomationError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handle to the root node.
    pub fn root(self: &Arc<Self>) -> UIElement {
        self.element(0)
    }

    fn element(self: &Arc<Self>, index: usize) -> UIElement {
        UIElement::new(Arc::new(SnapshotElement {
            tree: Arc::clone(self),
            index,
        }))
    }

    /// Remove `element` and its subtree from the live tree, the way a dialog
    /// closing under the caller would. Handles stay alive but become invalid.
    pub fn detach(&self, element: &UIElement) -> Result<(), AutomationError> {
        let index = self.index_of(element)?;
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(current) {
                node.detached.store(true, Ordering::Relaxed);
                stack.extend(node.children.iter().copied());
            }
        }
        Ok(())
    }

    fn index_of(&self, element: &UIElement) -> Result<usize, AutomationError> {
        match element.object_id().checked_sub(self.base_id()) {
            Some(index) if index < self.nodes.len() => Ok(index),
            _ => Err(AutomationError::InvalidArgument(format!(
                "element {} does not belong to this snapshot",
                element.describe()
            ))),
        }
    }

    // Object ids are the arena address plus the node index, unique per process
    fn base_id(&self) -> usize {
        self.nodes.as_ptr() as usize
    }

    fn is_detached(&self, index: usize) -> bool {
        self.nodes
            .get(index)
            .map_or(true, |node| node.detached.load(Ordering::Relaxed))
    }

    fn live_node(&self, index: usize) -> Result<&NodeData, AutomationError> {
        match self.nodes.get(index) {
            Some(node) if !node.detached.load(Ordering::Relaxed) => Ok(node),
            Some(node) => Err(AutomationError::ElementNotAvailable(format!(
                "[{}] id='{}' name='{}' was removed from the tree",
                node.control_type, node.automation_id, node.name
            ))),
            None => Err(AutomationError::ElementNotAvailable(format!(
                "snapshot node #{index} does not exist"
            ))),
        }
    }
}

/// Element handle backed by a [`SnapshotTree`] node.
pub struct SnapshotElement {
    tree: Arc<SnapshotTree>,
    index: usize,
}

impl std::fmt::Debug for SnapshotElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotElement")
            .field("index", &self.index)
            .finish()
    }
}

impl SnapshotElement {
    fn node(&self) -> Result<&NodeData, AutomationError> {
        self.tree.live_node(self.index)
    }

    // Detached nodes are gone from the live tree, so they are skipped
    fn live_children(&self, index: usize) -> Result<Vec<usize>, AutomationError> {
        let node = self.tree.live_node(index)?;
        Ok(node
            .children
            .iter()
            .copied()
            .filter(|&child| !self.tree.is_detached(child))
            .collect())
    }

    fn sibling(&self, offset: isize) -> Result<Option<UIElement>, AutomationError> {
        let node = self.node()?;
        let Some(parent_index) = node.parent else {
            return Ok(None);
        };
        let siblings = self.live_children(parent_index)?;
        let Some(position) = siblings.iter().position(|&c| c == self.index) else {
            return Ok(None);
        };
        Ok(position
            .checked_add_signed(offset)
            .and_then(|target| siblings.get(target))
            .map(|&sibling| self.tree.element(sibling)))
    }
}

impl UIElementImpl for SnapshotElement {
    fn object_id(&self) -> usize {
        self.tree.base_id() + self.index
    }

    fn is_valid(&self) -> bool {
        self.node().is_ok()
    }

    fn get_automation_id(&self) -> Result<String, AutomationError> {
        Ok(self.node()?.automation_id.clone())
    }

    fn get_name(&self) -> Result<String, AutomationError> {
        Ok(self.node()?.name.clone())
    }

    fn get_class_name(&self) -> Result<String, AutomationError> {
        Ok(self.node()?.class_name.clone())
    }

    fn get_control_type(&self) -> Result<String, AutomationError> {
        Ok(self.node()?.control_type.clone())
    }

    fn get_bounding_rectangle(&self) -> Result<Option<(f64, f64, f64, f64)>, AutomationError> {
        Ok(self.node()?.bounds)
    }

    fn get_supported_properties(&self) -> Result<BTreeMap<String, String>, AutomationError> {
        Ok(self.node()?.properties.clone())
    }

    fn children(&self) -> Result<Vec<UIElement>, AutomationError> {
        Ok(self
            .live_children(self.index)?
            .into_iter()
            .map(|child| self.tree.element(child))
            .collect())
    }

    fn previous_sibling(&self) -> Result<Option<UIElement>, AutomationError> {
        self.sibling(-1)
    }

    fn next_sibling(&self) -> Result<Option<UIElement>, AutomationError> {
        self.sibling(1)
    }
}
