//! Count: number of matching documents.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Count command. Requires `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count {
    base: BaseCommand,
    query: Option<String>,
}

impl Count {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Count, config, index);
        Ok(Count {
            base,
            query: fields.text(Field::Query)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter source text.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
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
        Ok(json!({"count": collection, "query": query}))
    }
}

impl FieldPresence for Count {
    const OPERATION: Operation = Operation::Count;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        matches!(field, Field::Query) && self.query.is_some()
    }
}
