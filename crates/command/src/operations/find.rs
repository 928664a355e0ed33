//! Find: documents matching a filter.

use mongoplug_core::ActionConfiguration;
use serde_json::{Map, Value as JsonValue};

use crate::base::BaseCommand;
use crate::document::{self, DEFAULT_FIND_LIMIT, DEFAULT_FIND_SKIP};
use crate::gate::{self, Extractor, FieldPresence};
use crate::index::{ConfigurationIndex, Field, Operation};
use crate::Result;

/// Find command. Requires `query`; `sort`, `projection`, `limit` and `skip`
/// are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Find {
    base: BaseCommand,
    query: Option<String>,
    sort: Option<String>,
    projection: Option<String>,
    limit: Option<i64>,
    skip: Option<i64>,
}

impl Find {
    pub fn new(config: &ActionConfiguration, index: &ConfigurationIndex) -> Result<Self> {
        let base = BaseCommand::new(config, index)?;
        let fields = Extractor::new(Operation::Find, config, index);
        Ok(Find {
            base,
            query: fields.text(Field::Query)?,
            sort: fields.text(Field::Sort)?,
            projection: fields.text(Field::Projection)?,
            limit: fields.integer(Field::Limit)?,
            skip: fields.integer(Field::Skip)?,
        })
    }

    pub fn base(&self) -> &BaseCommand {
        &self.base
    }

    /// Filter source text.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Sort specification source. Key order is the sort priority.
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// Projection source text.
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Maximum documents returned, if set.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Documents to skip before returning, if set.
    pub fn skip(&self) -> Option<i64> {
        self.skip
    }

    pub fn is_valid(&self) -> bool {
        gate::is_valid(self)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        gate::missing_fields(self)
    }

    /// Render as a `find` command. Unset `limit` and `skip` take their defaults.
    pub fn to_document(&self) -> Result<JsonValue> {
        let collection = gate::require_valid(self)?;
        let mut doc = Map::new();
        doc.insert("find".into(), collection.into());
        doc.insert(
            "filter".into(),
            document::object(Field::Query, self.query.as_deref().unwrap_or_default())?.into(),
        );
        if let Some(sort) = &self.sort {
            doc.insert("sort".into(), document::object(Field::Sort, sort)?.into());
        }
        if let Some(projection) = &self.projection {
            doc.insert(
                "projection".into(),
                document::object(Field::Projection, projection)?.into(),
            );
        }
        doc.insert("limit".into(), self.limit.unwrap_or(DEFAULT_FIND_LIMIT).into());
        doc.insert("skip".into(), self.skip.unwrap_or(DEFAULT_FIND_SKIP).into());
        Ok(JsonValue::Object(doc))
    }
}

impl FieldPresence for Find {
    const OPERATION: Operation = Operation::Find;

    fn base(&self) -> &BaseCommand {
        &self.base
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Query => self.query.is_some(),
            Field::Sort => self.sort.is_some(),
            Field::Projection => self.projection.is_some(),
            Field::Limit => self.limit.is_some(),
            Field::Skip => self.skip.is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongoplug_core::{Property, Value};
    use serde_json::json;

    fn config(entries: &[(usize, Value)]) -> ActionConfiguration {
        let mut templates = vec![Property::empty(); 7];
        templates[0] = Property::new("FIND");
        templates[1] = Property::new("users");
        for (offset, value) in entries {
            templates[*offset] = Property::new(value.clone());
        }
        ActionConfiguration::new(templates)
    }

    #[test]
    fn test_defaults_applied() {
        let cmd = Find::new(&config(&[(2, Value::from("{}"))]), ConfigurationIndex::standard())
            .unwrap();
        assert!(cmd.is_valid());
        assert_eq!(cmd.limit(), None);
        assert_eq!(
            cmd.to_document().unwrap(),
            json!({"find": "users", "filter": {}, "limit": 10, "skip": 0})
        );
    }

    #[test]
    fn test_all_fields() {
        let cmd = Find::new(
            &config(&[
                (2, Value::from(r#"{"age": {"$gt": 21}}"#)),
                (3, Value::from(r#"{"age": -1}"#)),
                (4, Value::from(r#"{"name": 1}"#)),
                (5, Value::from("5")),
                (6, Value::Int(20)),
            ]),
            ConfigurationIndex::standard(),
        )
        .unwrap();
        assert_eq!(cmd.limit(), Some(5));
        assert_eq!(cmd.skip(), Some(20));
        assert_eq!(
            cmd.to_document().unwrap(),
            json!({
                "find": "users",
                "filter": {"age": {"$gt": 21}},
                "sort": {"age": -1},
                "projection": {"name": 1},
                "limit": 5,
                "skip": 20,
            })
        );
    }

    #[test]
    fn test_missing_query_invalid() {
        let cmd = Find::new(&config(&[(5, Value::Int(3))]), ConfigurationIndex::standard())
            .unwrap();
        assert!(!cmd.is_valid());
        assert_eq!(cmd.missing_fields(), vec![Field::Query]);
    }

    #[test]
    fn test_bad_sort_json() {
        let cmd = Find::new(
            &config(&[(2, Value::from("{}")), (3, Value::from("name asc"))]),
            ConfigurationIndex::standard(),
        )
        .unwrap();
        assert!(cmd.is_valid());
        assert!(cmd.to_document().is_err());
    }
}
