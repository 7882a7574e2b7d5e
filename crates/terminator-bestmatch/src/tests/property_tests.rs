use crate::matcher::{resolve, similarity, MatchConfig};
use crate::{normalize, CandidateCatalog, SnapshotNode, SnapshotTree, UIElement};
use proptest::prelude::*;

const POOL: usize = 6;

fn element_pool() -> Vec<UIElement> {
    let children = (0..POOL)
        .map(|i| SnapshotNode::new("button", &format!("el{i}"), ""))
        .collect();
    let tree = SnapshotTree::from_node(&SnapshotNode::new("window", "w", "").with_children(children));
    tree.root().children().unwrap()
}

fn catalog_from(names: &[(String, usize)], pool: &[UIElement]) -> CandidateCatalog {
    CandidateCatalog::from_pairs(
        names
            .iter()
            .map(|(name, slot)| (name.clone(), pool[slot % POOL].clone())),
    )
}

fn entries() -> impl Strategy<Value = Vec<(String, usize)>> {
    prop::collection::vec(("[A-Za-z_ .:]{0,12}", 0..POOL), 0..24)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC{0,32}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in "[a-z_]{0,16}", b in "[a-z_]{0,16}") {
        let ab = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ab));
        prop_assert_eq!(ab, similarity(&b, &a));
        prop_assert_eq!(ab == 1.0, a == b);
    }

    #[test]
    fn literal_entry_always_wins(names in entries(), query in "[A-Za-z_]{1,12}", slot in 0..POOL, at in 0usize..24) {
        let pool = element_pool();
        let mut names = names;
        let at = at.min(names.len());
        names.insert(at, (query.clone(), slot));

        let catalog = catalog_from(&names, &pool);
        let expected = names
            .iter()
            .find(|(name, _)| normalize(name) == normalize(&query))
            .map(|(_, slot)| pool[slot % POOL].clone());

        let found = resolve(&query, &catalog, &MatchConfig::default()).unwrap();
        prop_assert_eq!(Some(found), expected);
    }

    #[test]
    fn removing_competitors_keeps_the_winner(names in entries(), query in "[A-Za-z_]{1,12}") {
        let pool = element_pool();
        let config = MatchConfig::default();
        let catalog = catalog_from(&names, &pool);

        if let Ok(winner) = resolve(&query, &catalog, &config) {
            let reduced: Vec<(String, usize)> = names
                .iter()
                .filter(|(_, slot)| pool[slot % POOL] == winner)
                .cloned()
                .collect();
            let reduced = catalog_from(&reduced, &pool);
            prop_assert_eq!(resolve(&query, &reduced, &config).unwrap(), winner);
        }
    }
}
