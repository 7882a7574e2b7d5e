//! Error types for name resolution against an accessibility tree

use thiserror::Error;

/// Errors raised while indexing a tree or resolving a name against it.
///
/// `NoMatch` and `AttributeNotFound` are the expected outcome of asking for a
/// name that does not exist and are always recoverable. Everything else means
/// the setup is broken (bad root, element vanished mid-walk, bad config).
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("No candidate matches '{query}' (best score: {})", format_score(.best_score))]
    NoMatch {
        query: String,
        best_score: Option<f64>,
    },

    #[error("'{name}' is neither an attribute nor a resolvable element name (best score: {})", format_score(.best_score))]
    AttributeNotFound {
        name: String,
        best_score: Option<f64>,
    },

    #[error("Invalid root element: {0}")]
    InvalidRoot(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element is no longer available: {0}")]
    ElementNotAvailable(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Platform error: {0}")]
    PlatformError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AutomationError {
    /// True for the misses a caller is expected to branch on.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AutomationError::NoMatch { .. }
                | AutomationError::AttributeNotFound { .. }
                | AutomationError::ElementNotFound(_)
        )
    }

    /// Best similarity score seen before giving up, if any candidate was scored.
    pub fn best_score(&self) -> Option<f64> {
        match self {
            AutomationError::NoMatch { best_score, .. }
            | AutomationError::AttributeNotFound { best_score, .. } => *best_score,
            _ => None,
        }
    }
}

fn format_score(score: &Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.3}"),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_display() {
        let err = AutomationError::NoMatch {
            query: "btnOk".to_string(),
            best_score: Some(0.25),
        };
        assert_eq!(
            err.to_string(),
            "No candidate matches 'btnOk' (best score: 0.250)"
        );
        assert!(err.is_not_found());
        assert_eq!(err.best_score(), Some(0.25));
    }

    #[test]
    fn test_invalid_root_is_not_a_miss() {
        let err = AutomationError::InvalidRoot("detached".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.best_score(), None);
    }

    #[test]
    fn test_empty_score_display() {
        let err = AutomationError::AttributeNotFound {
            name: "Foo".to_string(),
            best_score: None,
        };
        assert!(err.to_string().ends_with("(best score: none)"));
    }
}
