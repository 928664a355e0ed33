//! Insert: one or more new documents.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Insert command. Requires `documents`, a single object or an array of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    base: BaseCommand,
    documents: Option<String>,
}

impl Insert {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Insert, config, index);
        Ok(Insert {
            base,
            documents: fields.text(Field::Documents)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Documents source: a single object or a non-empty array of objects.
    pub fn documents(&self) -> Option<&str> {
        self.documents.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    /// Render as `{"insert": <collection>, "documents": [...]}`.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let documents = document::non_empty_object_list(
            Field::Documents,
            self.documents.as_deref().unwrap_or_default(),
        )?;
        Ok(json!({
            "insert": collection,
            "documents": documents,
        }))
    }
}

impl FieldPresence for Insert {
    const OPERATION: Operation = Operation::Insert;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        matches!(field, Field::Documents) && self.documents.is_some()
    }
}
