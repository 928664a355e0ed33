//! FindAndModify: atomically update one document and return it.

use mongoplug_core::ActionConfiguration;
use serde_json::{Map, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document;
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// FindAndModify command. Requires `query` and `update`.
///
/// `return_new` selects the post-update document instead of the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindAndModify {
    base: BaseCommand,
    query: Option<String>,
    update: Option<String>,
    sort: Option<String>,
    upsert: Option<bool>,
    return_new: Option<bool>,
}

impl FindAndModify {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::FindAndModify, config, index);
        Ok(FindAndModify {
            base,
            query: fields.text(Field::Query)?,
            update: fields.text(Field::Update)?,
            sort: fields.text(Field::Sort)?,
            upsert: fields.boolean(Field::Upsert)?,
            return_new: fields.boolean(Field::ReturnNew)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter selecting the document to modify.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Update source: an operator object or a pipeline.
    pub fn update(&self) -> Option<&str> {
        self.update.as_deref()
    }

    /// Sort deciding which match is modified when several qualify.
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Whether to insert when nothing matches.
    pub fn upsert(&self) -> Option<bool> {
        self.upsert
    }

    /// Whether the reply carries the modified document instead of the original.
    pub fn return_new(&self) -> Option<bool> {
        self.return_new
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let mut doc = Map::new();
        doc.insert("findAndModify".into(), collection.into());
        doc.insert(
            "query".into(),
            document::object(Field::Query, self.query.as_deref().unwrap_or_default())?.into(),
        );
        if let Some(sort) = &self.sort {
            doc.insert("sort".into(), document::object(Field::Sort, sort)?.into());
        }
        doc.insert(
            "update".into(),
            document::update_spec(Field::Update, self.update.as_deref().unwrap_or_default())?,
        );
        doc.insert("new".into(), self.return_new.unwrap_or(false).into());
        doc.insert("upsert".into(), self.upsert.unwrap_or(false).into());
        Ok(JsonValue::Object(doc))
    }
}

impl FieldPresence for FindAndModify {
    const OPERATION: Operation = Operation::FindAndModify;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Update => self.update.is_some(),
            Field::Sort => self.sort.is_some(),
            Field::Upsert => self.upsert.is_some(),
            Field::ReturnNew => self.return_new.is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongoplug_core::Property;
    use serde_json::json;

    #[test]
    fn test_find_and_modify_document() {
        let mut templates = vec![Property::empty(); 27];
        templates[1] = Property::new("counters");
        templates[22] = Property::new(r#"{"_id": "orders"}"#);
        templates[23] = Property::new(r#"{"$inc": {"seq": 1}}"#);
        templates[26] = Property::new("true");
        let cmd = FindAndModify::new(
            &ActionConfiguration::new(templates),
            ConfigurationIndex::standard(),
        )
        .unwrap();

        assert_eq!(cmd.return_new(), Some(true));
        let doc = cmd.to_document().unwrap();
        assert_eq!(
            doc,
            json!({
                "findAndModify": "counters",
                "query": {"_id": "orders"},
                "update": {"$inc": {"seq": 1}},
                "new": true,
                "upsert": false,
            })
        );
        let first_key = doc.as_object().unwrap().keys().next().cloned();
        assert_eq!(first_key.as_deref(), Some("findAndModify"));
    }
}
