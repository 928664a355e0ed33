//! Aggregate: run an aggregation pipeline.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document::{self, DEFAULT_BATCH_SIZE};
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Aggregate command. Requires `pipeline`, a stage object or array of stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    base: BaseCommand,
    pipeline: Option<String>,
    batch_size: Option<i64>,
}

impl Aggregate {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Aggregate, config, index);
        Ok(Aggregate {
            base,
            pipeline: fields.text(Field::Pipeline)?,
            batch_size: fields.integer(Field::BatchSize)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Pipeline source: one stage object or an array of stages.
    pub fn pipeline(&self) -> Option<&str> {
        self.pipeline.as_deref()
    }

    /// Cursor batch size; unset means [`DEFAULT_BATCH_SIZE`].
    pub fn batch_size(&self) -> Option<i64> {
        self.batch_size
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    /// Render as `{"aggregate": <collection>, "pipeline": [...], "cursor": {"batchSize": n}}`.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let pipeline = document::object_list(
            Field::Pipeline,
            self.pipeline.as_deref().unwrap_or_default(),
        )?;
        Ok(json!({
            "aggregate": collection,
            "pipeline": pipeline,
            "cursor": {"batchSize": self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)},
        }))
    }
}

impl FieldPresence for Aggregate {
    const OPERATION: Operation = Operation::Aggregate;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Pipeline => self.pipeline.is_some(),
            Field::BatchSize => self.batch_size.is_some(),
            _ => false,
        }
    }
}
