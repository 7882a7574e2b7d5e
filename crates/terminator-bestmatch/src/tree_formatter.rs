//! Text dumps of a window's descendants for test authoring
//!
//! Three views: an indented control-identifier tree, a flat per-element
//! report, and the catalog grouped by element with the names that reach it.

use crate::catalog::CandidateCatalog;
use crate::element::UIElement;
use crate::errors::AutomationError;
use std::collections::BTreeMap;
use std::fmt::Write;

const INDENT: &str = "        ";

fn format_bounds(bounds: Option<(f64, f64, f64, f64)>) -> String {
    match bounds {
        Some((x, y, w, h)) => format!("(L{x:.0}, T{y:.0}, R{:.0}, B{:.0})", x + w, y + h),
        None => "(no bounds)".to_string(),
    }
}

fn format_properties(properties: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = properties
        .iter()
        .map(|(key, value)| format!("'{key}': '{value}'"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

/// Indented tree of every descendant of `root`:
///
/// ```text
/// edit - 'Item name'   (L10, T40, R210, B60)
///     Properties: {'IsEnabled': 'True'}
///     AutomationId: 'txtNewItem'
/// ```
pub fn format_control_identifiers(root: &UIElement) -> Result<String, AutomationError> {
    let mut output = String::new();
    // Explicit stack of (element, depth) so deep trees cannot overflow
    let mut stack: Vec<(UIElement, usize)> = root
        .children()?
        .into_iter()
        .rev()
        .map(|child| (child, 0))
        .collect();

    while let Some((element, depth)) = stack.pop() {
        let indent = INDENT.repeat(depth);
        let _ = writeln!(
            output,
            "{indent}{} - '{}'   {}",
            element.control_type()?,
            element.name()?,
            format_bounds(element.bounds()?)
        );
        let _ = writeln!(
            output,
            "{indent}\tProperties: {}",
            format_properties(&element.important_properties()?)
        );
        let _ = writeln!(output, "{indent}\tAutomationId: '{}'\n", element.automation_id()?);

        for child in element.children()?.into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    Ok(output)
}

/// Flat report: the root's attributes, then the identifying attributes and
/// properties of every descendant in tree order.
pub fn format_element_report(root: &UIElement) -> Result<String, AutomationError> {
    let mut output = String::from("Main window attributes:\n\n");
    let _ = writeln!(output, "AutomationId = \"{}\"", root.automation_id()?);
    let _ = writeln!(output, "Name = \"{}\"", root.name()?);
    let _ = writeln!(output, "ClassName = \"{}\"", root.class_name()?);
    let _ = writeln!(output, "ControlType = \"{}\"", root.control_type()?);
    for (key, value) in root.supported_properties()? {
        let _ = writeln!(output, "{key} = \"{value}\"");
    }
    output.push_str("\n\n");

    for element in root.descendants()? {
        let _ = writeln!(output, "AutomationId: \"{}\"", element.automation_id()?);
        let _ = writeln!(output, "Name: \"{}\"", element.name()?);
        let _ = writeln!(output, "ClassName: \"{}\"", element.class_name()?);
        let _ = writeln!(output, "Control type: \"{}\"", element.control_type()?);
        let _ = writeln!(
            output,
            "Properties: {}\n",
            format_properties(&element.supported_properties()?)
        );
    }
    Ok(output)
}

/// Every indexed element followed by the catalog names that point at it.
pub fn format_candidate_report(catalog: &CandidateCatalog) -> String {
    let mut output = String::new();
    for (index, element) in catalog.elements().iter().enumerate() {
        let _ = writeln!(output, "#{} {}", index + 1, element.describe());
        for query in catalog.queries_producing(element) {
            let _ = writeln!(output, "    {query}");
        }
    }
    output
}
