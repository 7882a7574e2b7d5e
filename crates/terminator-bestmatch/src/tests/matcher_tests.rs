use super::{init_tracing, sample_window};
use crate::matcher::{find_best_match, resolve, similarity, MatchConfig};
use crate::{AutomationError, CandidateCatalog, SnapshotNode, SnapshotTree, UIElement};

fn leaves(count: usize) -> Vec<UIElement> {
    let children = (0..count)
        .map(|i| SnapshotNode::new("button", &format!("leaf{i}"), ""))
        .collect();
    let tree = SnapshotTree::from_node(&SnapshotNode::new("window", "w", "").with_children(children));
    tree.root().children().unwrap()
}

fn catalog_of(pairs: &[(&str, &UIElement)]) -> CandidateCatalog {
    CandidateCatalog::from_pairs(
        pairs
            .iter()
            .map(|(name, element)| (name.to_string(), (*element).clone())),
    )
}

#[test]
fn test_exact_match_wins() {
    init_tracing();
    let tree = sample_window();
    let catalog = CandidateCatalog::build(&tree.root()).unwrap();

    let found = find_best_match("Minimize", &catalog, &MatchConfig::default()).unwrap();
    assert!(found.exact);
    assert_eq!(found.score, 1.0);
    assert_eq!(found.candidate, "Minimize");
    assert_eq!(found.element.automation_id().unwrap(), "Minimize");
}

#[test]
fn test_exact_match_ignores_case_and_punctuation() {
    let tree = sample_window();
    let catalog = CandidateCatalog::build(&tree.root()).unwrap();

    let found = find_best_match("lbl New-Item  EDIT", &catalog, &MatchConfig::default()).unwrap();
    assert!(found.exact);
    assert_eq!(found.candidate, "lblNewItemedit");
    assert_eq!(found.element.control_type().unwrap(), "edit");
}

#[test]
fn test_misspelled_name_resolves_by_score() {
    init_tracing();
    let tree = sample_window();
    let catalog = CandidateCatalog::build(&tree.root()).unwrap();

    let found = find_best_match("Button_Minimise", &catalog, &MatchConfig::default()).unwrap();
    assert!(!found.exact);
    assert_eq!(found.candidate, "Button_Minimize");
    assert_eq!(found.element.automation_id().unwrap(), "Button_Minimize");
    assert!(found.score > 0.9 && found.score < 1.0, "{}", found.score);
}

#[test]
fn test_unrelated_query_is_rejected() {
    let tree = sample_window();
    let catalog = CandidateCatalog::build(&tree.root()).unwrap();

    let err = resolve("qqqqqqqqqqqq", &catalog, &MatchConfig::default()).unwrap_err();
    match err {
        AutomationError::NoMatch { query, best_score } => {
            assert_eq!(query, "qqqqqqqqqqqq");
            assert!(best_score.is_some_and(|score| score < 0.5));
        }
        other => panic!("expected NoMatch, got {other:?}"),
    }
}

#[test]
fn test_cutoff_is_configurable() {
    let tree = sample_window();
    let catalog = CandidateCatalog::build(&tree.root()).unwrap();
    let strict = MatchConfig::with_cutoff(0.95).unwrap();

    let err = resolve("Button_Minimise", &catalog, &strict).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.best_score().is_some_and(|score| score > 0.9));

    // exact matches do not depend on the cutoff
    let strictest = MatchConfig::with_cutoff(1.0).unwrap();
    assert!(resolve("Button_Minimize", &catalog, &strictest).is_ok());
}

#[test]
fn test_cutoff_out_of_range_is_rejected() {
    assert!(matches!(
        MatchConfig::with_cutoff(1.5),
        Err(AutomationError::InvalidArgument(_))
    ));
    assert!(MatchConfig::with_cutoff(-0.1).is_err());
    assert_eq!(MatchConfig::default().cutoff, 0.5);
}

#[test]
fn test_empty_catalog_never_matches() {
    let catalog = CandidateCatalog::default();
    for query in ["Minimize", "", "!!!"] {
        match resolve(query, &catalog, &MatchConfig::default()) {
            Err(AutomationError::NoMatch { best_score, .. }) => assert_eq!(best_score, None),
            other => panic!("expected NoMatch for '{query}', got {other:?}"),
        }
    }
}

#[test]
fn test_empty_candidates_are_never_matched() {
    let elements = leaves(2);
    let catalog = catalog_of(&[("", &elements[0]), ("!?", &elements[1])]);

    let err = resolve("", &catalog, &MatchConfig::with_cutoff(0.0).unwrap()).unwrap_err();
    assert!(matches!(err, AutomationError::NoMatch { best_score: None, .. }));
}

#[test]
fn test_normalized_queries_pick_the_same_winner() {
    let elements = leaves(2);
    let catalog = catalog_of(&[("OK", &elements[0]), ("foobar", &elements[1])]);
    let config = MatchConfig::default();

    let punctuated = resolve("Foo_Bar!", &catalog, &config).unwrap();
    let plain = resolve("foobar", &catalog, &config).unwrap();
    assert_eq!(punctuated, plain);
    assert_eq!(plain, elements[1]);
}

#[test]
fn test_tie_prefers_closest_length() {
    let elements = leaves(2);
    // both score 2/3 against "abcdef"
    let catalog = catalog_of(&[("abc", &elements[0]), ("abcdxy", &elements[1])]);
    assert_eq!(similarity("abcdef", "abc"), similarity("abcdef", "abcdxy"));

    let found = find_best_match("abcdef", &catalog, &MatchConfig::default()).unwrap();
    assert_eq!(found.candidate, "abcdxy");
    assert_eq!(found.element, elements[1]);
}

#[test]
fn test_full_tie_prefers_catalog_order() {
    init_tracing();
    let elements = leaves(2);
    let catalog = catalog_of(&[("abcdzz", &elements[1]), ("abcdxy", &elements[0])]);

    let found = find_best_match("abcdef", &catalog, &MatchConfig::default()).unwrap();
    assert_eq!(found.candidate, "abcdzz");
    assert_eq!(found.element, elements[1]);
}

#[test]
fn test_first_exact_match_in_catalog_order_wins() {
    let elements = leaves(3);
    let catalog = catalog_of(&[
        ("Save As", &elements[0]),
        ("saveas", &elements[1]),
        ("SAVE_AS", &elements[2]),
    ]);

    let found = find_best_match("SaveAs", &catalog, &MatchConfig::default()).unwrap();
    assert!(found.exact);
    assert_eq!(found.element, elements[0]);
}

#[test]
fn test_similarity_bounds() {
    assert_eq!(similarity("minimize", "minimize"), 1.0);
    assert_eq!(similarity("abc", "xyz"), 0.0);
    let score = similarity("button_minimise", "button_minimize");
    assert!((score - 28.0 / 30.0).abs() < 1e-6, "{score}");
}
