//! Field extraction and the validity gate shared by all operations.
//!
//! Every operation declares its fields once (see [`Operation::fields`]). The
//! gate evaluates the same conjunctive rule for all of them: the base command
//! must be valid, and then every required field must be present.

use mongoplug_core::{ActionConfiguration, Property};
use tracing::debug;

use crate::accessor::{self, FieldValue};
use crate::base::BaseCommand;
use crate::error::Error;
use crate::index::{ConfigurationIndex, Field, FieldKind, Operation};
use crate::Result;

/// Reads one operation's fields from a template.
pub(crate) struct Extractor<'a> {
    operation: Operation,
    list: &'a [Property],
    index: &'a ConfigurationIndex,
}

impl<'a> Extractor<'a> {
    pub(crate) fn new(
        operation: Operation,
        config: &'a ActionConfiguration,
        index: &'a ConfigurationIndex,
    ) -> Self {
        Extractor {
            operation,
            list: config.templates(),
            index,
        }
    }

    /// Extract `field`, which must be declared with one of `kinds`.
    ///
    /// An accessor that disagrees with the declaration is a bug in the
    /// operation, so it fails even when the template leaves the field empty.
    fn field(
        &self,
        field: Field,
        requested: &str,
        kinds: &[FieldKind],
    ) -> Result<Option<FieldValue>> {
        let spec = self
            .operation
            .spec(field)
            .ok_or(Error::UnknownField {
                operation: self.operation,
                field,
            })?;
        if !kinds.contains(&spec.kind) {
            return Err(Error::KindMismatch {
                field,
                declared: spec.kind.name().to_string(),
                requested: requested.to_string(),
            });
        }
        let offset = self.index.offset_for(self.operation, field)?;
        accessor::extract(self.list, offset, spec)
    }

    /// Text or JSON field.
    pub(crate) fn text(&self, field: Field) -> Result<Option<String>> {
        self.field(field, "Text", &[FieldKind::Text, FieldKind::Json])?
            .map(|v| v.into_text(field))
            .transpose()
    }

    pub(crate) fn integer(&self, field: Field) -> Result<Option<i64>> {
        self.field(field, "Integer", &[FieldKind::Integer])?
            .map(|v| v.into_integer(field))
            .transpose()
    }

    pub(crate) fn boolean(&self, field: Field) -> Result<Option<bool>> {
        self.field(field, "Boolean", &[FieldKind::Boolean])?
            .map(|v| v.into_boolean(field))
            .transpose()
    }
}

/// Presence of extracted fields, implemented by each operation struct.
pub(crate) trait FieldPresence {
    const OPERATION: Operation;

    fn base(&self) -> &BaseCommand;

    /// Whether `field` was extracted with a non-empty value.
    fn has(&self, field: Field) -> bool;
}

pub(crate) fn is_valid<C: FieldPresence>(command: &C) -> bool {
    command.base().is_valid()
        && C::OPERATION
            .fields()
            .iter()
            .filter(|spec| spec.required)
            .all(|spec| command.has(spec.field))
}

/// Absent required fields: base fields first, then the operation's own in
/// declaration order. Empty iff `is_valid` holds.
pub(crate) fn missing_fields<C: FieldPresence>(command: &C) -> Vec<Field> {
    let mut missing = command.base().missing_fields();
    missing.extend(
        C::OPERATION
            .fields()
            .iter()
            .filter(|spec| spec.required && !command.has(spec.field))
            .map(|spec| spec.field),
    );
    missing
}

/// Collection name of a command that passes the gate.
pub(crate) fn require_valid<C: FieldPresence>(command: &C) -> Result<&str> {
    match command.base().collection() {
        Some(collection) if is_valid(command) => Ok(collection),
        _ => {
            let missing = missing_fields(command);
            debug!(
                target: "mongoplug::command",
                operation = %C::OPERATION,
                ?missing,
                "Refusing to render invalid command"
            );
            Err(Error::InvalidCommand {
                operation: C::OPERATION,
                missing,
            })
        }
    }
}
