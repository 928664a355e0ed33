//! Custom Layout Tests
//!
//! Templates saved against a different layout version, described by a
//! TOML layout file.

use crate::common::*;
use mongoplug::{Command, Error, Field, Operation, TemplateLayout};
use std::io::Write;

/// Layout v2: distinct fields moved to the front, everything else shifted.
fn v2_layout() -> TemplateLayout {
    let mut layout = TemplateLayout::standard();
    layout.version = 2;
    for fields in layout.operations.values_mut() {
        for offset in fields.values_mut() {
            *offset += 2;
        }
    }
    let distinct = layout.operations.get_mut("distinct").unwrap();
    distinct.insert("query".to_string(), 2);
    distinct.insert("key".to_string(), 3);
    layout
}

#[test]
fn layout_file_drives_extraction() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(v2_layout().to_toml_string().unwrap().as_bytes())
        .unwrap();

    let index = TemplateLayout::from_file(file.path())
        .unwrap()
        .into_index()
        .unwrap();
    assert_eq!(index.version(), 2);
    assert_eq!(index.offset_for(Operation::Distinct, Field::Key), Ok(3));

    let config = TemplateBuilder::default()
        .set(0, "DISTINCT")
        .set(1, "orders")
        .set(2, "{}")
        .set(3, "status")
        .build();
    let cmd = Command::from_action_configuration(&config, &index).unwrap();
    assert!(cmd.is_valid());

    // The same template read with the standard layout finds nothing
    let standard_index = mongoplug::ConfigurationIndex::standard();
    let standard = Command::from_action_configuration(&config, standard_index).unwrap();
    assert_eq!(standard.missing_fields(), vec![Field::Query, Field::Key]);
}

#[test]
fn inconsistent_layout_file_rejected() {
    let text = r#"
        command = 0
        collection = 1

        [operations.distinct]
        query = 5
        key = 5
    "#;
    let err = TemplateLayout::from_toml_str(text)
        .unwrap()
        .into_index()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLayout { .. }));
}
