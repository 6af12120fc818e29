//! Grouping of parameter sets by structural equality.
//!
//! This is an all-pairs grouping: every set is bucketed by its canonical
//! configuration, so equal configurations merge even when other
//! configurations appear between them. Buckets are keyed by hash, making a
//! pass linear in the number of sets (plus hashing the values).

use std::collections::HashMap;

use rcg_common::{ConfigMap, ParameterSet};

/// Partition `sets` into groups of equal `parameters`.
///
/// Groups are returned in order of first appearance. A group's contexts are
/// the contexts of its members, concatenated in input order. Contexts of the
/// input never influence grouping.
pub fn group_parameter_sets(sets: Vec<ParameterSet>) -> Vec<ParameterSet> {
    let mut groups: Vec<ParameterSet> = Vec::new();
    let mut group_of: HashMap<Option<ConfigMap>, usize> = HashMap::new();

    for set in sets {
        match group_of.get(&set.parameters) {
            Some(&index) => groups[index].contexts.extend(set.contexts),
            None => {
                group_of.insert(set.parameters.clone(), groups.len());
                groups.push(set);
            }
        }
    }
    groups
}

/// Whether `sets` reduce to a single configuration.
pub fn is_consistent(groups: &[ParameterSet]) -> bool {
    groups.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcg_common::ConfigValue;
    use std::path::PathBuf;

    fn params(b: i64) -> Option<ConfigMap> {
        let mut map = ConfigMap::new();
        map.insert("b".into(), ConfigValue::from(b));
        Some(map)
    }

    fn set(context: &str, b: i64) -> ParameterSet {
        ParameterSet::new(vec![PathBuf::from(context)], params(b))
    }

    fn contexts(set: &ParameterSet) -> Vec<&str> {
        set.contexts.iter().map(|p| p.to_str().unwrap()).collect()
    }

    #[test]
    fn test_two_equal_merge() {
        let grouped = group_parameter_sets(vec![set("b", 1), set("c", 1)]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(contexts(&grouped[0]), vec!["b", "c"]);
        assert_eq!(grouped[0].parameters, params(1));
    }

    #[test]
    fn test_two_unequal_stay_apart() {
        let grouped = group_parameter_sets(vec![set("b", 2), set("c", 1)]);
        assert_eq!(grouped, vec![set("b", 2), set("c", 1)]);
    }

    #[test]
    fn test_non_adjacent_equal_merge() {
        let grouped = group_parameter_sets(vec![set("b", 2), set("c", 1), set("d", 2)]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(contexts(&grouped[0]), vec!["b", "d"]);
        assert_eq!(grouped[0].parameters, params(2));
        assert_eq!(contexts(&grouped[1]), vec!["c"]);
        assert_eq!(grouped[1].parameters, params(1));
    }

    #[test]
    fn test_multi_context_members_keep_order() {
        let first = ParameterSet::new(vec!["x1".into(), "x2".into()], params(7));
        let second = ParameterSet::new(vec!["y1".into()], params(8));
        let third = ParameterSet::new(vec!["z1".into(), "z2".into()], params(7));
        let grouped = group_parameter_sets(vec![first, second, third]);
        assert_eq!(contexts(&grouped[0]), vec!["x1", "x2", "z1", "z2"]);
        assert_eq!(contexts(&grouped[1]), vec!["y1"]);
    }

    #[test]
    fn test_key_order_independent() {
        let mut a = ConfigMap::new();
        a.insert("x".into(), "1".into());
        a.insert("y".into(), "2".into());
        let mut b = ConfigMap::new();
        b.insert("y".into(), "2".into());
        b.insert("x".into(), "1".into());
        let grouped = group_parameter_sets(vec![
            ParameterSet::resolved("a", a),
            ParameterSet::resolved("b", b),
        ]);
        assert!(is_consistent(&grouped));
    }

    #[test]
    fn test_empty_maps_group_together_but_not_with_unresolved() {
        let grouped = group_parameter_sets(vec![
            ParameterSet::resolved("a", ConfigMap::new()),
            ParameterSet::new(vec!["u".into()], None),
            ParameterSet::resolved("b", ConfigMap::new()),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(contexts(&grouped[0]), vec!["a", "b"]);
        assert!(!grouped[1].is_resolved());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let once = group_parameter_sets(vec![set("a", 1), set("b", 2), set("c", 1)]);
        let twice = group_parameter_sets(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_parameter_sets(Vec::new()).is_empty());
        assert!(!is_consistent(&[]));
    }
}
