//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the stored record struct and its [`Entity`]
//! implementation for each collection.
//!
//! [`Entity`]: crate::core::entity::Entity

/// Complete macro to create a stored entity with its `Entity` implementation
///
/// Generates:
/// - the struct with the business identifier, every domain field as an
///   `Option` (so partially upserted records can be read back) and the
///   `created_at` / `updated_at` timestamps
/// - `impl Entity`, with `dates` (if any) listed as timestamp fields
/// - `new(stamp, required fields..., optional fields...)`, where `required`
///   fields are taken by value and `optional` ones as `Option`
///
/// # Example
///
/// ```rust,ignore
/// impl_restaurant_entity!(
///     Table {
///         resource: "tables",
///         singular: "table",
///         collection: "table",
///         id: table_id,
///     },
///     required {
///         number_of_guests: u32,
///         table_number: u32,
///     },
///     optional {}
/// );
///
/// let table = Table::new(Stamp::fresh(), 4, 12);
/// assert_eq!(table.created_at, table.updated_at);
/// ```
#[macro_export]
macro_rules! impl_restaurant_entity {
    (
        $(#[$struct_meta:meta])*
        $type:ident {
            resource: $resource:expr,
            singular: $singular:expr,
            collection: $collection:expr,
            id: $id_field:ident
            $(, dates: [ $( $date_field:ident ),* $(,)? ] )? $(,)?
        },
        required {
            $( $(#[$req_meta:meta])* $req_field:ident : $req_type:ty ),* $(,)?
        },
        optional {
            $( $(#[$opt_meta:meta])* $opt_field:ident : $opt_type:ty ),* $(,)?
        } $(,)?
    ) => {
        $(#[$struct_meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Business identifier
            pub $id_field: String,

            $(
                $(#[$req_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $req_field: Option<$req_type>,
            )*

            $(
                $(#[$opt_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $opt_field: Option<$opt_type>,
            )*

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $resource
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn collection_name() -> &'static str {
                $collection
            }

            fn id_field() -> &'static str {
                stringify!($id_field)
            }

            fn timestamp_fields() -> &'static [&'static str] {
                &[
                    "created_at",
                    "updated_at",
                    $( $( stringify!($date_field), )* )?
                ]
            }

            fn id(&self) -> &str {
                &self.$id_field
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }
        }

        impl $type {
            /// Create a new record with the stamp's identifier and timestamps
            #[allow(clippy::too_many_arguments)]
            pub fn new(
                stamp: $crate::core::entity::Stamp,
                $( $req_field: $req_type, )*
                $( $opt_field: Option<$opt_type>, )*
            ) -> Self {
                Self {
                    $id_field: stamp.id,
                    $( $req_field: Some($req_field), )*
                    $( $opt_field, )*
                    created_at: stamp.at,
                    updated_at: stamp.at,
                }
            }
        }
    };
}
