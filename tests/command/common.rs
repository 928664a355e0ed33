//! Shared helpers for command integration tests.

#![allow(dead_code)]

use mongoplug::{ActionConfiguration, ConfigurationIndex, Operation, Property, Value};

/// Builds a property list by offset, padding gaps with unset slots.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    templates: Vec<Property>,
}

impl TemplateBuilder {
    /// Start a template for `op` on `collection` at the standard offsets.
    pub fn standard(op: Operation, collection: &str) -> Self {
        let index = ConfigurationIndex::standard();
        TemplateBuilder::default()
            .set(index.command_offset(), op.name().to_uppercase())
            .set(index.collection_offset(), collection)
    }

    pub fn set(mut self, offset: usize, value: impl Into<Value>) -> Self {
        if offset >= self.templates.len() {
            self.templates.resize(offset + 1, Property::empty());
        }
        self.templates[offset] = Property::new(value);
        self
    }

    pub fn build(self) -> ActionConfiguration {
        ActionConfiguration::new(self.templates)
    }
}

/// Parse an action configuration as the template editor saves it.
pub fn from_json(json: &str) -> ActionConfiguration {
    serde_json::from_str(json).expect("valid action configuration JSON")
}
