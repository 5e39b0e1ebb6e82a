//! Primitive types shared by all document kinds.

pub mod doc_type;
pub mod money;
pub mod timestamp;

pub use doc_type::{InventoryDocType, StoreDocType};
pub use money::Money;
pub use timestamp::{Timestamp, TimestampError};
