//! Fabric Seed Core - Document schema for the Cosmos DB retail dataset.
//!
//! This crate defines the documents written to the database:
//! - [`Product`] with its embedded [`CategorySnapshot`]
//! - [`Order`] with payment, shipping, amounts and line items
//! - [`RetailStore`] and [`RetailInventory`], which share one container and
//!   are told apart by their `docType`
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. The serialized shape of every record is the storage
//! contract read by downstream systems, so field keys, optionality and nesting
//! must not change.
//!
//! # Modules
//!
//! - [`documents`] - Document records, key tables, and JSON encode/decode
//! - [`types`] - Timestamps, exact money amounts, and `docType` discriminators
//! - [`validation`] - Opt-in cross-field consistency checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod documents;
pub mod types;
pub mod validation;

pub use documents::*;
pub use types::*;
pub use validation::{Validate, ValidationIssue};
