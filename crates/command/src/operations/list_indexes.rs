//! ListIndexes: indexes defined on a collection.

use mongoplug_core::ActionConfiguration;
use serde_json::{json, Value as JsonValue};

use crate::base::BaseCommand;
use crate::gate::{self, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// ListIndexes command. Reads no fields of its own, so only the base rule
/// applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIndexes {
    base: BaseCommand,
}

impl ListIndexes {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        Ok(ListIndexes {
            base: BaseCommand::new(config, index)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        Ok(json!({"listIndexes": collection}))
    }
}

impl FieldPresence for ListIndexes {
    const OPERATION: Operation = Operation::ListIndexes;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, _field: Field) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongoplug_core::Property;

    #[test]
    fn test_valid_with_collection_only() {
        let config =
            ActionConfiguration::new(vec![Property::new("LIST_INDEXES"), Property::new("users")]);
        let cmd = ListIndexes::new(&config, ConfigurationIndex::standard()).unwrap();
        assert!(cmd.is_valid());
        assert_eq!(cmd.to_document().unwrap(), json!({"listIndexes": "users"}));
    }

    #[test]
    fn test_invalid_without_collection() {
        let config = ActionConfiguration::new(vec![Property::new("LIST_INDEXES")]);
        let cmd = ListIndexes::new(&config, ConfigurationIndex::standard()).unwrap();
        assert!(!cmd.is_valid());
        assert_eq!(cmd.missing_fields(), vec![Field::Collection]);
    }
}
