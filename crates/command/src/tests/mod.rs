//! Test modules for the command crate.

pub mod properties;

use mongoplug_core::{ActionConfiguration, Property, Value};

use crate::{ConfigurationIndex, FieldKind, Operation};

/// A sample value that satisfies `kind`.
pub(crate) fn sample(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::from("status"),
        FieldKind::Json => Value::from("{}"),
        FieldKind::Integer => Value::from("5"),
        FieldKind::Boolean => Value::Bool(true),
    }
}

/// Template with the tag, the collection and every declared field of `op`
/// filled in at their standard offsets.
pub(crate) fn complete_templates(op: Operation) -> Vec<Property> {
    let index = ConfigurationIndex::standard();
    let mut templates = vec![Property::empty(); 27];
    templates[index.command_offset()] = Property::new(op.name());
    templates[index.collection_offset()] = Property::new("orders");
    for spec in op.fields() {
        let offset = index.offset_for(op, spec.field).unwrap();
        templates[offset] = Property::new(sample(spec.kind));
    }
    templates
}

pub(crate) fn complete(op: Operation) -> ActionConfiguration {
    ActionConfiguration::new(complete_templates(op))
}
