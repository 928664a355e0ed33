//! One plain command struct per operation.
//!
//! Each struct extracts the fields its [`Operation`](crate::Operation)
//! declares, exposes them through accessors, and answers `is_valid()` with the
//! shared gate.

mod aggregate;
mod count;
mod delete;
mod distinct;
mod find;
mod find_and_modify;
mod insert;
mod list_indexes;
mod replace;
mod update;

pub use aggregate::Aggregate;
pub use count::Count;
pub use delete::Delete;
pub use distinct::Distinct;
pub use find::Find;
pub use find_and_modify::FindAndModify;
pub use insert::Insert;
pub use list_indexes::ListIndexes;
pub use replace::Replace;
pub use update::Update;
