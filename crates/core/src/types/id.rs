//! Newtype IDs for type-safe entity references.
//!
//! Shopify's REST Admin API identifies resources with unsigned 64-bit
//! integers. Use the `define_id!` macro to create wrappers that prevent
//! accidentally passing an order ID where a customer ID is expected.

/// Macro to define a type-safe Shopify ID wrapper.
///
/// Creates a newtype wrapper around `u64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Default`
/// - Conversion methods: `new()`, `get()`, `is_unset()`
/// - `From<u64>` and `Into<u64>` implementations
///
/// The zero value is the "unset" sentinel: Shopify never issues ID `0`,
/// and payloads that omit the field deserialize to it.
///
/// # Example
///
/// ```rust
/// # use phone_sync_core::define_id;
/// define_id!(ProductId);
/// define_id!(VariantId);
///
/// let product_id = ProductId::new(1);
/// let variant_id = VariantId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = variant_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// The sentinel used when no ID is known.
            pub const UNSET: Self = Self(0);

            /// Create a new ID from a u64 value.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the underlying u64 value.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Whether this is the unset sentinel.
            #[must_use]
            pub const fn is_unset(&self) -> bool {
                self.0 == 0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CustomerId);
define_id!(OrderId);
