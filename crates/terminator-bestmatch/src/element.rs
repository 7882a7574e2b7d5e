//! Element handle and the backend seam it wraps
//!
//! A tree backend (a live UI Automation session, a JSON snapshot, a test
//! fixture) implements [`UIElementImpl`]. Everything else in this crate works
//! on the clonable [`UIElement`] handle.

use crate::errors::AutomationError;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Control types whose preceding sibling usually labels them.
pub const LABELLED_CONTROL_TYPES: &[&str] = &["edit", "listbox", "combobox", "updown", "list"];

/// Properties left out of inspector output because they rarely help telling
/// controls apart.
pub const NOISY_PROPERTIES: &[&str] = &[
    "HelpText",
    "IsKeyboardFocusable",
    "IsPassword",
    "Orientation",
    "IsRequiredForForm",
    "IsOffscreen",
    "RuntimeId",
    "LabeledBy",
    "IsContentElement",
    "LocalizedControlType",
    "ItemStatus",
    "ProcessId",
    "HasKeyboardFocus",
    "FrameworkId",
    "IsControlElement",
    "ItemType",
    "AcceleratorKey",
    "AccessKey",
];

/// Canonical names of the attributes every element exposes.
pub const CORE_ATTRIBUTES: &[&str] = &["AutomationId", "Name", "ClassName", "ControlType"];

/// Capabilities a tree backend has to provide.
pub trait UIElementImpl: Send + Sync + fmt::Debug {
    /// Identity of the underlying node, stable for the node's lifetime.
    fn object_id(&self) -> usize;

    /// False once the node has left the tree.
    fn is_valid(&self) -> bool;

    fn get_automation_id(&self) -> Result<String, AutomationError>;
    fn get_name(&self) -> Result<String, AutomationError>;
    fn get_class_name(&self) -> Result<String, AutomationError>;

    /// Short lower-case token such as `edit` or `button`.
    fn get_control_type(&self) -> Result<String, AutomationError>;

    /// (x, y, width, height), when the backend knows the geometry.
    fn get_bounding_rectangle(&self) -> Result<Option<(f64, f64, f64, f64)>, AutomationError> {
        Ok(None)
    }

    fn get_supported_properties(&self) -> Result<BTreeMap<String, String>, AutomationError>;

    fn children(&self) -> Result<Vec<UIElement>, AutomationError>;

    /// All descendants in pre-order, the element itself excluded.
    fn descendants(&self) -> Result<Vec<UIElement>, AutomationError> {
        // Explicit stack so deep trees cannot overflow
        let mut result = Vec::new();
        let mut stack: Vec<UIElement> = self.children()?.into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            let children = element.children()?;
            stack.extend(children.into_iter().rev());
            result.push(element);
        }
        Ok(result)
    }

    fn previous_sibling(&self) -> Result<Option<UIElement>, AutomationError>;
    fn next_sibling(&self) -> Result<Option<UIElement>, AutomationError>;
}

/// Value of a dotted attribute access: either a literal property of the
/// element or a descendant resolved by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Literal(String),
    Element(UIElement),
}

/// Clonable handle to one node of an accessibility tree.
#[derive(Clone)]
pub struct UIElement {
    inner: Arc<dyn UIElementImpl>,
}

impl UIElement {
    pub fn new(inner: Arc<dyn UIElementImpl>) -> Self {
        Self { inner }
    }

    pub fn object_id(&self) -> usize {
        self.inner.object_id()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    pub fn automation_id(&self) -> Result<String, AutomationError> {
        self.inner.get_automation_id()
    }

    pub fn name(&self) -> Result<String, AutomationError> {
        self.inner.get_name()
    }

    pub fn class_name(&self) -> Result<String, AutomationError> {
        self.inner.get_class_name()
    }

    pub fn control_type(&self) -> Result<String, AutomationError> {
        self.inner.get_control_type()
    }

    pub fn bounds(&self) -> Result<Option<(f64, f64, f64, f64)>, AutomationError> {
        self.inner.get_bounding_rectangle()
    }

    pub fn supported_properties(&self) -> Result<BTreeMap<String, String>, AutomationError> {
        self.inner.get_supported_properties()
    }

    pub fn children(&self) -> Result<Vec<UIElement>, AutomationError> {
        self.inner.children()
    }

    pub fn descendants(&self) -> Result<Vec<UIElement>, AutomationError> {
        self.inner.descendants()
    }

    pub fn previous_sibling(&self) -> Result<Option<UIElement>, AutomationError> {
        self.inner.previous_sibling()
    }

    pub fn next_sibling(&self) -> Result<Option<UIElement>, AutomationError> {
        self.inner.next_sibling()
    }

    /// Look up `name` as a literal attribute of this element.
    ///
    /// The core attributes are checked first, then the backend's supported
    /// properties. `Ok(None)` means the element has no such attribute, which
    /// is the cue to try resolving `name` against the descendants instead.
    pub fn try_get_literal_attribute(&self, name: &str) -> Result<Option<String>, AutomationError> {
        let value = match name {
            "AutomationId" => Some(self.automation_id()?),
            "Name" => Some(self.name()?),
            "ClassName" => Some(self.class_name()?),
            "ControlType" => Some(self.control_type()?),
            _ => self.supported_properties()?.remove(name),
        };
        Ok(value)
    }

    /// Supported properties without the [`NOISY_PROPERTIES`].
    pub fn important_properties(&self) -> Result<BTreeMap<String, String>, AutomationError> {
        let mut properties = self.supported_properties()?;
        properties.retain(|key, _| {
            !NOISY_PROPERTIES.contains(&key.as_str()) && !CORE_ATTRIBUTES.contains(&key.as_str())
        });
        Ok(properties)
    }

    /// One-line description used in logs and diagnostics.
    pub fn describe(&self) -> String {
        let control_type = self.control_type().unwrap_or_default();
        let automation_id = self.automation_id().unwrap_or_default();
        let name = self.name().unwrap_or_default();
        format!("[{control_type}] id='{automation_id}' name='{name}'")
    }
}

impl PartialEq for UIElement {
    fn eq(&self, other: &Self) -> bool {
        self.object_id() == other.object_id()
    }
}

impl Eq for UIElement {}

impl fmt::Debug for UIElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UIElement")
            .field("object_id", &self.object_id())
            .field("inner", &self.inner)
            .finish()
    }
}
