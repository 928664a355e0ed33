//! Configuration index: where each field lives in a template.
//!
//! Templates are positional. For a given layout version the same offset
//! always denotes the same semantic field of an operation, so offsets are a
//! versioned contract held in an immutable table rather than derived at
//! runtime.
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | operation tag |
//! | 1 | collection |
//! | 2-6 | find: query, sort, projection, limit, skip |
//! | 7 | insert: documents |
//! | 8-11 | update: query, update, multi, upsert |
//! | 12-14 | replace: query, replacement, upsert |
//! | 15-16 | delete: query, multi |
//! | 17 | count: query |
//! | 18-19 | distinct: query, key |
//! | 20-21 | aggregate: pipeline, batch_size |
//! | 22-26 | find_and_modify: query, update, sort, upsert, return_new |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::Result;

// =============================================================================
// Operations
// =============================================================================

/// Database operation a template can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Find,
    Insert,
    Update,
    Replace,
    Delete,
    Count,
    Distinct,
    Aggregate,
    FindAndModify,
    ListIndexes,
}

impl Operation {
    /// Every operation, in template dropdown order.
    pub const ALL: [Operation; 10] = [
        Operation::Find,
        Operation::Insert,
        Operation::Update,
        Operation::Replace,
        Operation::Delete,
        Operation::Count,
        Operation::Distinct,
        Operation::Aggregate,
        Operation::FindAndModify,
        Operation::ListIndexes,
    ];

    /// Snake-case name, as used in layout files.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Find => "find",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Replace => "replace",
            Operation::Delete => "delete",
            Operation::Count => "count",
            Operation::Distinct => "distinct",
            Operation::Aggregate => "aggregate",
            Operation::FindAndModify => "find_and_modify",
            Operation::ListIndexes => "list_indexes",
        }
    }

    /// Name of the database command this operation renders to.
    ///
    /// Replace shares the `update` command with a replacement document.
    pub fn command_name(&self) -> &'static str {
        match self {
            Operation::Find => "find",
            Operation::Insert => "insert",
            Operation::Update | Operation::Replace => "update",
            Operation::Delete => "delete",
            Operation::Count => "count",
            Operation::Distinct => "distinct",
            Operation::Aggregate => "aggregate",
            Operation::FindAndModify => "findAndModify",
            Operation::ListIndexes => "listIndexes",
        }
    }

    /// Fields this operation reads from a template, required ones flagged.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Operation::Find => FIND_FIELDS,
            Operation::Insert => INSERT_FIELDS,
            Operation::Update => UPDATE_FIELDS,
            Operation::Replace => REPLACE_FIELDS,
            Operation::Delete => DELETE_FIELDS,
            Operation::Count => COUNT_FIELDS,
            Operation::Distinct => DISTINCT_FIELDS,
            Operation::Aggregate => AGGREGATE_FIELDS,
            Operation::FindAndModify => FIND_AND_MODIFY_FIELDS,
            Operation::ListIndexes => &[],
        }
    }

    /// Declared spec for `field`, if this operation reads it.
    pub fn spec(&self, field: Field) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.field == field)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Case-insensitive; `_`, `-` and spaces are ignored, so `DISTINCT`,
    /// `findAndModify` and `FIND_AND_MODIFY` all parse.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Operation::ALL
            .into_iter()
            .find(|op| normalize(op.name()) == wanted)
            .ok_or_else(|| Error::UnknownOperation {
                name: s.to_string(),
            })
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Fields
// =============================================================================

/// Semantic identifier of a template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Operation tag (base)
    Command,
    /// Target collection (base)
    Collection,
    Query,
    Sort,
    Projection,
    Limit,
    Skip,
    Documents,
    Update,
    Replacement,
    Multi,
    Upsert,
    Key,
    Pipeline,
    BatchSize,
    ReturnNew,
}

impl Field {
    /// Snake-case name, as used in layout files.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Command => "command",
            Field::Collection => "collection",
            Field::Query => "query",
            Field::Sort => "sort",
            Field::Projection => "projection",
            Field::Limit => "limit",
            Field::Skip => "skip",
            Field::Documents => "documents",
            Field::Update => "update",
            Field::Replacement => "replacement",
            Field::Multi => "multi",
            Field::Upsert => "upsert",
            Field::Key => "key",
            Field::Pipeline => "pipeline",
            Field::BatchSize => "batch_size",
            Field::ReturnNew => "return_new",
        }
    }

    /// Look up a field by its snake-case name.
    pub fn from_name(name: &str) -> Option<Field> {
        const ALL: [Field; 16] = [
            Field::Command,
            Field::Collection,
            Field::Query,
            Field::Sort,
            Field::Projection,
            Field::Limit,
            Field::Skip,
            Field::Documents,
            Field::Update,
            Field::Replacement,
            Field::Multi,
            Field::Upsert,
            Field::Key,
            Field::Pipeline,
            Field::BatchSize,
            Field::ReturnNew,
        ];
        ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected type of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain string
    Text,
    /// JSON source text, or a structured array/object
    Json,
    /// Whole number, possibly supplied as a string
    Integer,
    /// Flag, possibly supplied as `"true"`/`"yes"`
    Boolean,
}

impl FieldKind {
    /// Type name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Json => "Json",
            FieldKind::Integer => "Integer",
            FieldKind::Boolean => "Boolean",
        }
    }
}

/// Declaration of one field an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    /// A field the operation cannot run without.
    pub const fn required(field: Field, kind: FieldKind) -> Self {
        FieldSpec {
            field,
            kind,
            required: true,
        }
    }

    /// A field that falls back to a default when absent.
    pub const fn optional(field: Field, kind: FieldKind) -> Self {
        FieldSpec {
            field,
            kind,
            required: false,
        }
    }
}

// =============================================================================
// Declared field tables
// =============================================================================

const FIND_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::optional(Field::Sort, FieldKind::Json),
    FieldSpec::optional(Field::Projection, FieldKind::Json),
    FieldSpec::optional(Field::Limit, FieldKind::Integer),
    FieldSpec::optional(Field::Skip, FieldKind::Integer),
];

const INSERT_FIELDS: &[FieldSpec] = &[FieldSpec::required(Field::Documents, FieldKind::Json)];

const UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::required(Field::Update, FieldKind::Json),
    FieldSpec::optional(Field::Multi, FieldKind::Boolean),
    FieldSpec::optional(Field::Upsert, FieldKind::Boolean),
];

const REPLACE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::required(Field::Replacement, FieldKind::Json),
    FieldSpec::optional(Field::Upsert, FieldKind::Boolean),
];

const DELETE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::optional(Field::Multi, FieldKind::Boolean),
];

const COUNT_FIELDS: &[FieldSpec] = &[FieldSpec::required(Field::Query, FieldKind::Json)];

const DISTINCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::required(Field::Key, FieldKind::Text),
];

const AGGREGATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Pipeline, FieldKind::Json),
    FieldSpec::optional(Field::BatchSize, FieldKind::Integer),
];

const FIND_AND_MODIFY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(Field::Query, FieldKind::Json),
    FieldSpec::required(Field::Update, FieldKind::Json),
    FieldSpec::optional(Field::Sort, FieldKind::Json),
    FieldSpec::optional(Field::Upsert, FieldKind::Boolean),
    FieldSpec::optional(Field::ReturnNew, FieldKind::Boolean),
];

// =============================================================================
// Index
// =============================================================================

/// Layout version of the standard template.
pub const STANDARD_VERSION: u32 = 1;

const STANDARD_COMMAND: usize = 0;
const STANDARD_COLLECTION: usize = 1;

const STANDARD_OFFSETS: &[(Operation, Field, usize)] = &[
    (Operation::Find, Field::Query, 2),
    (Operation::Find, Field::Sort, 3),
    (Operation::Find, Field::Projection, 4),
    (Operation::Find, Field::Limit, 5),
    (Operation::Find, Field::Skip, 6),
    (Operation::Insert, Field::Documents, 7),
    (Operation::Update, Field::Query, 8),
    (Operation::Update, Field::Update, 9),
    (Operation::Update, Field::Multi, 10),
    (Operation::Update, Field::Upsert, 11),
    (Operation::Replace, Field::Query, 12),
    (Operation::Replace, Field::Replacement, 13),
    (Operation::Replace, Field::Upsert, 14),
    (Operation::Delete, Field::Query, 15),
    (Operation::Delete, Field::Multi, 16),
    (Operation::Count, Field::Query, 17),
    (Operation::Distinct, Field::Query, 18),
    (Operation::Distinct, Field::Key, 19),
    (Operation::Aggregate, Field::Pipeline, 20),
    (Operation::Aggregate, Field::BatchSize, 21),
    (Operation::FindAndModify, Field::Query, 22),
    (Operation::FindAndModify, Field::Update, 23),
    (Operation::FindAndModify, Field::Sort, 24),
    (Operation::FindAndModify, Field::Upsert, 25),
    (Operation::FindAndModify, Field::ReturnNew, 26),
];

static STANDARD: Lazy<ConfigurationIndex> = Lazy::new(|| {
    ConfigurationIndex::from_parts(
        STANDARD_VERSION,
        STANDARD_COMMAND,
        STANDARD_COLLECTION,
        STANDARD_OFFSETS
            .iter()
            .map(|&(op, field, offset)| ((op, field), offset))
            .collect(),
    )
});

/// Immutable mapping from (operation, field) to template offset.
///
/// Build one from a [`TemplateLayout`](crate::TemplateLayout) or use the
/// process-wide [`ConfigurationIndex::standard`] table. Instances are never
/// mutated after construction and can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationIndex {
    version: u32,
    command: usize,
    collection: usize,
    offsets: HashMap<(Operation, Field), usize>,
}

impl ConfigurationIndex {
    /// The standard layout shipped with the plugin templates.
    pub fn standard() -> &'static ConfigurationIndex {
        &STANDARD
    }

    /// Callers must have validated the table; see `TemplateLayout::into_index`.
    pub(crate) fn from_parts(
        version: u32,
        command: usize,
        collection: usize,
        offsets: HashMap<(Operation, Field), usize>,
    ) -> Self {
        ConfigurationIndex {
            version,
            command,
            collection,
            offsets,
        }
    }

    /// Layout version this index describes.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Offset of the operation tag.
    pub fn command_offset(&self) -> usize {
        self.command
    }

    /// Offset of the collection name.
    pub fn collection_offset(&self) -> usize {
        self.collection
    }

    /// Offset of `field` for `operation`.
    ///
    /// Fails closed with [`Error::UnknownField`] when the operation does not
    /// declare the field.
    pub fn offset_for(&self, operation: Operation, field: Field) -> Result<usize> {
        match field {
            Field::Command => return Ok(self.command),
            Field::Collection => return Ok(self.collection),
            _ => {}
        }
        if operation.spec(field).is_none() {
            return Err(Error::UnknownField { operation, field });
        }
        self.offsets
            .get(&(operation, field))
            .copied()
            .ok_or(Error::UnknownField { operation, field })
    }

    /// Every (operation, field, offset) entry, sorted by operation then offset.
    pub fn entries(&self) -> Vec<(Operation, Field, usize)> {
        let mut entries: Vec<_> = self
            .offsets
            .iter()
            .map(|(&(op, field), &offset)| (op, field, offset))
            .collect();
        entries.sort_by_key(|&(op, _, offset)| (op, offset));
        entries
    }
}
