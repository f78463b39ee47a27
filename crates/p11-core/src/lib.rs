//! PKCS#11 attribute vocabulary for the p11 tooling.
//!
//! Maps human-readable attribute names such as `CKA_LABEL` to their
//! `CK_ATTRIBUTE_TYPE` codes. Names compare ignoring ASCII case and are found
//! by binary search over a table that is sorted when it is built: at compile
//! time for the built-in vocabulary, at construction for vendor extensions.
//! Tables are immutable and can be shared freely between threads.

pub mod attributes;
pub mod compare;
#[cfg(test)]
mod dataset;
pub mod error;

pub use attributes::{resolve, AttributeEntry, AttributeId, AttributeTable, NOT_FOUND};
pub use compare::compare_ignore_ascii_case;
pub use error::{TableError, TableResult};
