//! Property tests for extraction and the validity gate.

use mongoplug_core::{ActionConfiguration, Property, Value};
use proptest::prelude::*;

use super::complete_templates;
use crate::{Command, ConfigurationIndex, Distinct, Operation};

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::from("")),
        "[a-z{}]{1,8}".prop_map(Value::from),
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    (0..Operation::ALL.len()).prop_map(|i| Operation::ALL[i])
}

fn distinct_templates() -> Vec<Property> {
    complete_templates(Operation::Distinct)
}

proptest! {
    #[test]
    fn is_valid_is_idempotent(
        op in arb_operation(),
        values in proptest::collection::vec(arb_value(), 0..30),
    ) {
        let config = ActionConfiguration::new(values.into_iter().map(Property::new).collect());
        if let Ok(cmd) = Command::new(op, &config, ConfigurationIndex::standard()) {
            let first = cmd.is_valid();
            prop_assert_eq!(first, cmd.is_valid());
            prop_assert_eq!(first, cmd.missing_fields().is_empty());
            let again = Command::new(op, &config, ConfigurationIndex::standard()).unwrap();
            prop_assert_eq!(cmd, again);
        }
    }

    #[test]
    fn unrelated_offset_never_changes_fields(
        offset in (2usize..40).prop_filter("distinct offsets", |o| *o != 18 && *o != 19),
        value in arb_value(),
    ) {
        let original = ActionConfiguration::new(distinct_templates());
        let mut templates = distinct_templates();
        if offset >= templates.len() {
            templates.resize(offset + 1, Property::empty());
        }
        templates[offset] = Property::new(value);
        let changed = ActionConfiguration::new(templates);

        let before = Distinct::new(&original, ConfigurationIndex::standard()).unwrap();
        let after = Distinct::new(&changed, ConfigurationIndex::standard()).unwrap();
        prop_assert_eq!(before.key(), after.key());
        prop_assert_eq!(before.query(), after.query());
        prop_assert_eq!(before.base(), after.base());
    }

    #[test]
    fn truncation_equals_emptying(op in arb_operation(), len in 0usize..27) {
        let mut truncated = complete_templates(op);
        truncated.truncate(len);

        let mut emptied = complete_templates(op);
        for slot in emptied.iter_mut().skip(len) {
            *slot = Property::empty();
        }

        let index = ConfigurationIndex::standard();
        let a = Command::new(op, &ActionConfiguration::new(truncated), index).unwrap();
        let b = Command::new(op, &ActionConfiguration::new(emptied), index).unwrap();
        prop_assert_eq!(a.is_valid(), b.is_valid());
        prop_assert_eq!(a, b);
    }
}
