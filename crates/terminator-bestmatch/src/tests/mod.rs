mod matcher_tests;
mod property_tests;

use crate::{SnapshotNode, SnapshotTree};
use std::sync::Arc;

/// Window with the usual shapes: title bar buttons, a labelled edit, a
/// labelled combo box and a named menu bar.
pub(crate) fn sample_window() -> Arc<SnapshotTree> {
    let window = SnapshotNode::new("window", "frmGUIat", "GUI at")
        .with_class_name("WindowsForms10.Window")
        .with_property("ProcessId", "4242")
        .with_property("IsEnabled", "True")
        .with_children(vec![
            SnapshotNode::new("titlebar", "TitleBar", "").with_children(vec![
                SnapshotNode::new("button", "Minimize", "Minimize"),
                SnapshotNode::new("button", "Button_Minimize", ""),
                SnapshotNode::new("button", "Close", "Close"),
            ]),
            SnapshotNode::new("menubar", "MenuBar", "frmGUIat"),
            SnapshotNode::new("pane", "pnlItems", "").with_children(vec![
                SnapshotNode::new("text", "lblNewItem", "New item:")
                    .with_class_name("Static")
                    .with_bounds((10.0, 40.0, 80.0, 20.0)),
                SnapshotNode::new("Edit", "", "")
                    .with_class_name("Edit")
                    .with_bounds((100.0, 40.0, 200.0, 20.0))
                    .with_property("IsPassword", "False")
                    .with_property("IsReadOnly", "False"),
                SnapshotNode::new("text", "lblCategory", "Category"),
                SnapshotNode::new("combobox", "cmbCategory", ""),
                SnapshotNode::new("button", "btnAdd", "Add"),
            ]),
        ]);
    SnapshotTree::from_node(&window)
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
