//! Update: apply an update specification to matching documents.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Update command. Requires `query` and `update`; `multi` selects all
/// matching documents instead of the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    base: BaseCommand,
    query: Option<String>,
    update: Option<String>,
    multi: Option<bool>,
    upsert: Option<bool>,
}

impl Update {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Update, config, index);
        Ok(Update {
            base,
            query: fields.text(Field::Query)?,
            update: fields.text(Field::Update)?,
            multi: fields.boolean(Field::Multi)?,
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

    /// Update source: an operator object or a pipeline.
    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    /// Whether every match is updated rather than the first.
    pub fn multi(&self) -> Option<bool> {
        self.multi
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

    /// Render as an `update` command with a single statement.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let query = document::object(Field::Query, self.query.as_deref().unwrap_or_default())?;
        let update =
            document::update_spec(Field::Update, self.update.as_deref().unwrap_or_default())?;
        Ok(json!({
            "update": collection,
            "updates": [{
                "q": query,
                "u": update,
                "multi": self.multi.unwrap_or(false),
                "upsert": self.upsert.unwrap_or(false),
            }],
        }))
    }
}

impl FieldPresence for Update {
    const OPERATION: Operation = Operation::Update;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Update => self.update.is_some(),
            Field::Multi => self.multi.is_some(),
            Field::Upsert => self.upsert.is_some(),
            _ => false,
        }
    }
}
