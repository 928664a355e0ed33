//! Template layout configuration via TOML.
//!
//! A layout file describes where each field sits in a template's property
//! list, for one template version. It is validated once when converted into
//! a [`ConfigurationIndex`]; after that, offsets are trusted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::info;

use crate::error::Error;
use crate::index::{ConfigurationIndex, Field, Operation, STANDARD_VERSION};
use crate::Result;

/// Template layout loaded from TOML.
///
/// # Example
///
/// ```toml
/// version = 1
/// command = 0
/// collection = 1
///
/// [operations.distinct]
/// query = 18
/// key = 19
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLayout {
    /// Template version this layout describes.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Offset of the operation tag.
    pub command: usize,
    /// Offset of the collection name.
    pub collection: usize,
    /// Per-operation field offsets, keyed by snake-case names.
    #[serde(default)]
    pub operations: BTreeMap<String, BTreeMap<String, usize>>,
}

fn default_version() -> u32 {
    STANDARD_VERSION
}

impl TemplateLayout {
    /// Layout of the standard index.
    pub fn standard() -> Self {
        let index = ConfigurationIndex::standard();
        let mut operations: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for (op, field, offset) in index.entries() {
            operations
                .entry(op.name().to_string())
                .or_default()
                .insert(field.name().to_string(), offset);
        }
        TemplateLayout {
            version: index.version(),
            command: index.command_offset(),
            collection: index.collection_offset(),
            operations,
        }
    }

    /// Returns the standard layout file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Template layout for the MongoDB plugin
#
# Offsets index into the action's pluginSpecifiedTemplates list.
# Changing an offset breaks every template saved against this version;
# bump `version` instead.
version = 1

# Operation tag ("FIND", "DISTINCT", ...) and target collection
command = 0
collection = 1

[operations.find]
query = 2
sort = 3
projection = 4
limit = 5
skip = 6

[operations.insert]
documents = 7

[operations.update]
query = 8
update = 9
multi = 10
upsert = 11

[operations.replace]
query = 12
replacement = 13
upsert = 14

[operations.delete]
query = 15
multi = 16

[operations.count]
query = 17

[operations.distinct]
query = 18
key = 19

[operations.aggregate]
pipeline = 20
batch_size = 21

[operations.find_and_modify]
query = 22
update = 23
sort = 24
upsert = 25
return_new = 26
"#
    }

    /// Parse a layout from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] if the text is not a layout document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidLayout {
            reason: e.to_string(),
        })
    }

    /// Read and parse a layout from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            reason: format!("failed to read layout file '{}': {}", path.display(), e),
        })?;
        let layout = Self::from_toml_str(&content)?;
        info!(
            target: "mongoplug::config",
            path = %path.display(),
            version = layout.version,
            "Loaded template layout"
        );
        Ok(layout)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::InvalidLayout {
            reason: e.to_string(),
        })
    }

    /// Validate the layout and build the index it describes.
    ///
    /// Rejects unknown operation sections and field names, fields an
    /// operation does not declare, missing offsets for declared fields, and
    /// offsets that collide within an operation or with the command and
    /// collection offsets.
    pub fn into_index(self) -> Result<ConfigurationIndex> {
        if self.command == self.collection {
            return Err(invalid(format!(
                "command and collection share offset {}",
                self.command
            )));
        }

        let mut offsets = HashMap::new();
        for (section, fields) in &self.operations {
            let op = operation_named(section)?;
            let mut used = HashSet::from([self.command, self.collection]);
            for (name, &offset) in fields {
                let field = Field::from_name(name)
                    .filter(|field| op.spec(*field).is_some())
                    .ok_or_else(|| invalid(format!("operation {} has no field '{}'", op, name)))?;
                if !used.insert(offset) {
                    return Err(invalid(format!(
                        "offset {} of {}.{} is already in use",
                        offset, op, field
                    )));
                }
                offsets.insert((op, field), offset);
            }
        }

        for op in Operation::ALL {
            if let Some(spec) = op
                .fields()
                .iter()
                .find(|spec| !offsets.contains_key(&(op, spec.field)))
            {
                return Err(invalid(format!(
                    "operation {} has no offset for {}",
                    op, spec.field
                )));
            }
        }

        Ok(ConfigurationIndex::from_parts(
            self.version,
            self.command,
            self.collection,
            offsets,
        ))
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self::standard()
    }
}

fn operation_named(section: &str) -> Result<Operation> {
    Operation::ALL
        .into_iter()
        .find(|op| op.name() == section)
        .ok_or_else(|| invalid(format!("unknown operation section '{}'", section)))
}

fn invalid(reason: String) -> Error {
    Error::InvalidLayout { reason }
}
