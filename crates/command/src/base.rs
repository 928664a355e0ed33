//! Extraction shared by every operation.

use mongoplug_core::ActionConfiguration;

use crate::accessor;
use crate::index::{ConfigurationIndex, Field, FieldKind, FieldSpec};
use crate::Result;

const COLLECTION: FieldSpec = FieldSpec::required(Field::Collection, FieldKind::Text);

/// Operation-agnostic part of a command: the target collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseCommand {
    collection: Option<String>,
}

impl BaseCommand {
    /// Extract the base fields from `config` at the offsets of `index`.
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let collection = accessor::extract(
            config.templates(),
            index.collection_offset(),
            &COLLECTION,
        )?
        .map(|value| value.into_text(Field::Collection))
        .transpose()?;
        Ok(BaseCommand { collection })
    }

    /// Target collection, if the template names one.
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// True iff every base field is present and non-empty.
    pub fn is_valid(&self) -> bool {
        self.collection.is_some()
    }

    /// Base fields that are absent, in declaration order.
    pub fn missing_fields(&self) -> Vec<Field> {
        if self.is_valid() {
            Vec::new()
        } else {
            vec![Field::Collection]
        }
    }
}
