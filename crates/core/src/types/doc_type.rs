//! Fixed `docType` discriminators for documents that share a container.
//!
//! Use the `define_doc_type!` macro to create a zero-sized marker that always
//! serializes to one literal and refuses to deserialize any other value.

/// Macro to define a fixed-literal discriminator type.
///
/// Creates a unit struct with:
/// - `Serialize` writing the literal as a JSON string
/// - `Deserialize` accepting only that literal
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - An associated `VALUE` constant and `as_str()`
///
/// # Example
///
/// ```rust
/// # use fabric_seed_core::define_doc_type;
/// define_doc_type!(WarehouseDocType, "warehouse");
///
/// let json = serde_json::to_string(&WarehouseDocType).unwrap();
/// assert_eq!(json, "\"warehouse\"");
/// assert!(serde_json::from_str::<WarehouseDocType>("\"store\"").is_err());
/// ```
#[macro_export]
macro_rules! define_doc_type {
    ($name:ident, $value:literal) => {
        #[doc = concat!("Discriminator that is always `\"", $value, "\"`.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl $name {
            /// The literal written to the `docType` field.
            pub const VALUE: &'static str = $value;

            /// Returns the discriminator literal.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                Self::VALUE
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(Self::VALUE)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(Self::VALUE)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as ::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                if raw == Self::VALUE {
                    Ok(Self)
                } else {
                    Err(<D::Error as ::serde::de::Error>::invalid_value(
                        ::serde::de::Unexpected::Str(&raw),
                        &concat!("\"", $value, "\""),
                    ))
                }
            }
        }
    };
}

define_doc_type!(StoreDocType, "store");
define_doc_type!(InventoryDocType, "inventory");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(StoreDocType::VALUE, "store");
        assert_eq!(InventoryDocType.as_str(), "inventory");
        assert_eq!(format!("{StoreDocType}"), "store");
    }

    #[test]
    fn test_serialize_literal() {
        assert_eq!(serde_json::to_string(&StoreDocType).unwrap(), "\"store\"");
        assert_eq!(
            serde_json::to_string(&InventoryDocType).unwrap(),
            "\"inventory\""
        );
    }

    #[test]
    fn test_deserialize_matching_literal() {
        let parsed: InventoryDocType = serde_json::from_str("\"inventory\"").unwrap();
        assert_eq!(parsed, InventoryDocType);
    }

    #[test]
    fn test_deserialize_rejects_other_literal() {
        let err = serde_json::from_str::<StoreDocType>("\"inventory\"").unwrap_err();
        assert!(err.to_string().contains("\"store\""));
    }

    #[test]
    fn test_deserialize_rejects_case_variant() {
        assert!(serde_json::from_str::<StoreDocType>("\"Store\"").is_err());
    }
}
