//! Checkbox normalization tests
//!
//! Conversions between the editable selection and the complete persisted map.
//!
use kabe_vars::prelude::*;
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;

fn checkbox_with(option_count: usize) -> VariableDefinition {
    VariableDefinition::new("tags", VarType::MultiOption)
        .with_options((0..option_count).map(|i| format!("opt{}", i)))
}

fn xyz() -> VariableDefinition {
    VariableDefinition::new("tags", VarType::MultiOption).with_options(["x", "y", "z"])
}

#[cfg(test)]
mod checkbox_tests {
    use super::*;

    #[test]
    fn test_map_with_missing_options_reads_as_false() {
        let selected = to_editable(Some(&json!({"x": true, "z": true})), &xyz());
        assert_eq!(selected, ["x", "z"]);
    }

    #[test]
    fn test_re_expanding_completes_the_map() {
        let selected = to_editable(Some(&json!({"x": true, "z": true})), &xyz());
        let backend = to_backend(&selected, &xyz());

        assert_eq!(backend.len(), 3);
        assert_eq!(backend.get("x"), Some(&true));
        assert_eq!(backend.get("y"), Some(&false));
        assert_eq!(backend.get("z"), Some(&true));
    }

    #[test]
    fn test_unknown_selected_values_are_dropped() {
        let backend = to_backend(&["x", "removed"], &xyz());
        assert_eq!(backend.len(), 3);
        assert!(!backend.contains_key("removed"));
    }

    #[test]
    fn test_non_true_flags_are_unselected() {
        let selected = to_editable(Some(&json!({"x": "true", "y": 1, "z": true})), &xyz());
        assert_eq!(selected, ["z"]);
    }

    #[test]
    fn test_default_list_and_map_forms() {
        let list_default = xyz().with_default(json!(["y", "z"]));
        assert_eq!(to_editable(None, &list_default), ["y", "z"]);

        let map_default = xyz().with_default(json!({"z": true, "x": true}));
        assert_eq!(to_editable(None, &map_default), ["x", "z"]);
    }

    #[test]
    fn test_unusable_values_give_empty_selection() {
        assert!(to_editable(Some(&json!(42)), &xyz()).is_empty());
        assert!(to_editable(Some(&json!(null)), &xyz()).is_empty());
        assert!(to_editable(Some(&json!("q")), &xyz()).is_empty());
    }

    #[test]
    fn test_empty_selection_is_all_false() {
        let backend = to_backend::<&str>(&[], &xyz());
        assert_eq!(backend.len(), 3);
        assert!(backend.values().all(|on| !on));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_backend_has_one_entry_per_option(
        option_count in 0usize..12,
        picks in proptest::collection::vec(0usize..16, 0..16),
    ) {
        let def = checkbox_with(option_count);
        let selected: Vec<String> = picks.iter().map(|i| format!("opt{}", i)).collect();

        let backend = to_backend(&selected, &def);

        prop_assert_eq!(backend.len(), option_count);
    }

    #[test]
    fn prop_selection_survives_backend_round_trip(
        mask in proptest::collection::vec(any::<bool>(), 0..12),
    ) {
        let def = checkbox_with(mask.len());
        let selected: Vec<String> = mask
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| format!("opt{}", i))
            .collect();

        let persisted = serde_json::to_value(to_backend(&selected, &def)).unwrap();
        let restored = to_editable(Some(&persisted), &def);

        let expected: BTreeSet<_> = selected.into_iter().collect();
        let actual: BTreeSet<_> = restored.into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_backend_map_always_validates(
        mask in proptest::collection::vec(any::<bool>(), 1..12),
    ) {
        let def = checkbox_with(mask.len());
        let selected: Vec<String> = mask
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| format!("opt{}", i))
            .collect();

        let persisted = serde_json::to_value(to_backend(&selected, &def)).unwrap();

        prop_assert!(validate(&persisted, &def).is_ok());
    }
}
