//! Concurrency Tests
//!
//! Commands are built independently per request against the one shared,
//! immutable standard index.

use crate::common::*;
use mongoplug::{Command, ConfigurationIndex, Operation};
use std::sync::Arc;
use std::thread;

#[test]
fn parallel_construction_shares_standard_index() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let key = format!("field_{}", i);
                let config = TemplateBuilder::standard(Operation::Distinct, "orders")
                    .set(18, "{}")
                    .set(19, key.clone())
                    .build();
                let cmd =
                    Command::from_action_configuration(&config, ConfigurationIndex::standard())
                        .unwrap();
                match cmd {
                    Command::Distinct(distinct) => {
                        assert_eq!(distinct.key(), Some(key.as_str()));
                        distinct.is_valid()
                    }
                    other => panic!("Expected Distinct, got {:?}", other),
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn standard_index_is_one_instance() {
    let addresses: Vec<usize> = (0..4)
        .map(|_| thread::spawn(|| ConfigurationIndex::standard() as *const _ as usize))
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn commands_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Command>();
    assert_send_sync::<ConfigurationIndex>();

    let config = Arc::new(
        TemplateBuilder::standard(Operation::Count, "orders")
            .set(17, "{}")
            .build(),
    );
    let cmd = Arc::new(
        Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap(),
    );
    let shared = Arc::clone(&cmd);
    let valid = thread::spawn(move || shared.is_valid()).join().unwrap();
    assert_eq!(valid, cmd.is_valid());
}
