//! Replace: swap the first matching document for a new one.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Replace command. Requires `query` and `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    base: BaseCommand,
    query: Option<String>,
    replacement: Option<String>,
    upsert: Option<bool>,
}

impl Replace {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Replace, config, index);
        Ok(Replace {
            base,
            query: fields.text(Field::Query)?,
            replacement: fields.text(Field::Replacement)?,
            upsert: fields.boolean(Field::Upsert)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter source text.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Replacement document source; operator keys are rejected when rendering.
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Whether to insert when nothing matches.
    pub fn upsert(&self) -> Option<bool> {
        self.upsert
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let query = document::object(Field::Query, self.query.as_deref().unwrap_or_default())?;
        let replacement = document::replacement(
            Field::Replacement,
            self.replacement.as_deref().unwrap_or_default(),
        )?;
        Ok(json!({
            "update": collection,
            "updates": [{
                "q": query,
                "u": replacement,
                "multi": false,
                "upsert": self.upsert.unwrap_or(false),
            }],
        }))
    }
}

impl FieldPresence for Replace {
    const OPERATION: Operation = Operation::Replace;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Replacement => self.replacement.is_some(),
            Field::Upsert => self.upsert.is_some(),
            _ => false,
        }
    }
}
