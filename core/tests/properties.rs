use std::collections::{BTreeSet, HashMap, VecDeque};

use degrees_core::{shortest_path, Graph, SearchEngine, SearchError};
use proptest::prelude::*;

const ENTITIES: usize = 10;

fn entity(i: usize) -> String {
    format!("e{i}")
}

fn build(groups: &[BTreeSet<usize>]) -> Graph {
    let mut g = Graph::new();
    for i in 0..ENTITIES {
        g.add_entity(entity(i), format!("Entity {i}"), None);
    }
    for (gi, members) in groups.iter().enumerate() {
        let gid = format!("g{gi:02}");
        g.add_group(gid.clone(), format!("Group {gi}"), None);
        for &m in members {
            g.add_membership(&entity(m), &gid);
        }
    }
    g
}

/// Hop distances from `source`, computed directly from group lists.
fn reference_distances(groups: &[BTreeSet<usize>], source: usize) -> HashMap<usize, usize> {
    let mut dist = HashMap::from([(source, 0)]);
    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for members in groups.iter().filter(|g| g.contains(&current)) {
            for &m in members {
                if !dist.contains_key(&m) {
                    dist.insert(m, d + 1);
                    queue.push_back(m);
                }
            }
        }
    }
    dist
}

fn groups_strategy() -> impl Strategy<Value = Vec<BTreeSet<usize>>> {
    prop::collection::vec(prop::collection::btree_set(0..ENTITIES, 0..4), 0..10)
}

proptest! {
    #[test]
    fn path_length_matches_bfs_depth(groups in groups_strategy()) {
        let g = build(&groups);
        for a in 0..ENTITIES {
            let dist = reference_distances(&groups, a);
            for b in 0..ENTITIES {
                let path = shortest_path(&g, &entity(a), &entity(b)).unwrap();
                match dist.get(&b) {
                    Some(&d) => {
                        let path = path.expect("reachable pair must have a path");
                        prop_assert_eq!(path.degrees(), d);
                    }
                    None => prop_assert!(path.is_none()),
                }
            }
        }
    }

    #[test]
    fn path_steps_follow_shared_groups(
        groups in groups_strategy(),
        a in 0..ENTITIES,
        b in 0..ENTITIES,
    ) {
        let g = build(&groups);
        if let Some(path) = shortest_path(&g, &entity(a), &entity(b)).unwrap() {
            let source = entity(a);
            for (from, connector, to) in path.hops_from(&source) {
                let group = g.group(connector).expect("connector is a known group");
                prop_assert!(group.members.contains(from));
                prop_assert!(group.members.contains(to));
            }
            if a != b {
                let target = entity(b);
                prop_assert_eq!(path.last_entity(), Some(&target));
            }
        }
    }

    #[test]
    fn repeated_searches_agree(groups in groups_strategy(), a in 0..ENTITIES, b in 0..ENTITIES) {
        let g = build(&groups);
        let engine = SearchEngine::new(&g);
        let first = engine.shortest_path(&entity(a), &entity(b)).unwrap();
        let second = engine.shortest_path(&entity(a), &entity(b)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn self_path_is_empty(groups in groups_strategy(), a in 0..ENTITIES) {
        let g = build(&groups);
        let path = shortest_path(&g, &entity(a), &entity(a)).unwrap();
        prop_assert!(path.is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn unknown_ids_error_in_either_position(groups in groups_strategy(), a in 0..ENTITIES) {
        let g = build(&groups);
        let missing = "missing".to_string();
        let source_err = shortest_path(&g, &missing, &entity(a));
        let target_err = shortest_path(&g, &entity(a), &missing);
        let source_is_unknown = matches!(source_err, Err(SearchError::UnknownEntity { .. }));
        let target_is_unknown = matches!(target_err, Err(SearchError::UnknownEntity { .. }));
        prop_assert!(source_is_unknown);
        prop_assert!(target_is_unknown);
    }
}
