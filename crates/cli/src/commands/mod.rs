//! CLI command implementations.

pub mod config;
pub mod ping;
pub mod upsert;
pub mod validate;

use clap::ValueEnum;
use fabric_seed_core::{Document, Order, Product, RetailStore};

/// Which schema input documents follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Product,
    Order,
    Store,
    Inventory,
    /// Store or inventory, chosen per document by `docType`
    Retail,
}

impl KindArg {
    /// Container written to when none is given on the command line.
    #[must_use]
    pub const fn default_container(self) -> &'static str {
        match self {
            Self::Product => Product::DEFAULT_CONTAINER,
            Self::Order => Order::DEFAULT_CONTAINER,
            Self::Store | Self::Inventory | Self::Retail => RetailStore::DEFAULT_CONTAINER,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_containers() {
        assert_eq!(KindArg::Product.default_container(), "products");
        assert_eq!(KindArg::Order.default_container(), "orders");
        assert_eq!(KindArg::Store.default_container(), "retail");
        assert_eq!(KindArg::Inventory.default_container(), "retail");
        assert_eq!(KindArg::Retail.default_container(), "retail");
    }
}
