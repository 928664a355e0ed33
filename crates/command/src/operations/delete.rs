//! Delete: remove matching documents.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Delete command. Requires `query`; removes only the first match unless
/// `multi` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    base: BaseCommand,
    query: Option<String>,
    multi: Option<bool>,
}

impl Delete {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Delete, config, index);
        Ok(Delete {
            base,
            query: fields.text(Field::Query)?,
            multi: fields.boolean(Field::Multi)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter source text.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether every match is deleted rather than the first; unset means one.
    pub fn multi(&self) -> Option<bool> {
        self.multi
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    /// Render as a `delete` command with one statement; `limit` is 0 for multi.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let query = document::object(Field::Query, self.query.as_deref().unwrap_or_default())?;
        // limit 0 removes every match
        let limit = if self.multi.unwrap_or(false) { 0 } else { 1 };
        Ok(json!({
            "delete": collection,
            "deletes": [{"q": query, "limit": limit}],
        }))
    }
}

impl FieldPresence for Delete {
    const OPERATION: Operation = Operation::Delete;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Multi => self.multi.is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongoplug_core::{Property, Value};

    fn config(multi: Value) -> ActionConfiguration {
        let mut templates = vec![Property::empty(); 17];
        templates[1] = Property::new("sessions");
        templates[15] = Property::new(r#"{"expired": true}"#);
        templates[16] = Property::new(multi);
        ActionConfiguration::new(templates)
    }

    #[test]
    fn test_delete_one_by_default() {
        let cmd = Delete::new(&config(Value::Null), ConfigurationIndex::standard()).unwrap();
        assert_eq!(
            cmd.to_document().unwrap(),
            json!({"delete": "sessions", "deletes": [{"q": {"expired": true}, "limit": 1}]})
        );
    }

    #[test]
    fn test_delete_many() {
        let cmd = Delete::new(&config(Value::Bool(true)), ConfigurationIndex::standard()).unwrap();
        let doc = cmd.to_document().unwrap();
        assert_eq!(doc["deletes"][0]["limit"], json!(0));
    }
}
