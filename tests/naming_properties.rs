use csb::class_names::ClassNames;
use csb::naming::{camel, constant_name, is_valid_class_name, pascal, sanitize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sanitize_yields_class_identifier_or_fallback(raw in "[ -~]{0,40}") {
        let name = sanitize(&raw, "Fallback");
        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(name.starts_with(|c: char| c.is_ascii_uppercase()));
    }

    #[test]
    fn sanitize_is_idempotent(raw in "[ -~]{0,40}") {
        let once = sanitize(&raw, "Fallback");
        prop_assert_eq!(sanitize(&once, "Other"), once);
    }

    #[test]
    fn constant_names_are_upper_snake_case(alias in "[ -~]{0,40}") {
        let constant = constant_name(&alias);
        prop_assert!(constant.starts_with(|c: char| c.is_ascii_uppercase()));
        prop_assert!(constant.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!constant.contains("__"));
        prop_assert!(!constant.ends_with('_'));
    }

    #[test]
    fn camel_is_pascal_with_lower_first(raw in "[ -~]{0,40}") {
        let pascal = pascal(&raw);
        let camel = camel(&raw);
        prop_assert_eq!(pascal.to_lowercase(), camel.to_lowercase());
        prop_assert!(!camel.starts_with(|c: char| c.is_uppercase()));
    }

    #[test]
    fn naming_chain_always_holds(model in "[ -~]{0,30}") {
        let names = ClassNames::new(&model);
        prop_assert!(names.steps().ends_with("Steps"));
        let base = names.steps().strip_suffix("Steps").unwrap_or_default();
        prop_assert_eq!(names.page(), format!("{base}Page"));
        prop_assert!(is_valid_class_name(names.model()));
        prop_assert!(is_valid_class_name(names.page()));
    }

    #[test]
    fn renaming_the_model_never_leaves_stale_names(first in "[A-Za-z]{1,12}", second in "[A-Za-z]{1,12}") {
        let mut names = ClassNames::new(&first).with_steps_override("CustomSteps");
        names.set_model_class(&second);
        let fresh = ClassNames::new(&second);
        prop_assert_eq!(names.steps(), fresh.steps());
        prop_assert_eq!(names.page(), fresh.page());
        prop_assert!(!names.has_steps_override());
    }
}
