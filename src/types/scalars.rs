//! Built-in GraphQL scalars.
//!
//! Every full type collection merges these in, whether or not the schema
//! references them.

use std::sync::{Arc, LazyLock};

use crate::schema::meta::{MetaType, ScalarMeta};

static INT: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ScalarMeta::new("Int")
            .description(
                "The `Int` scalar type represents non-fractional signed whole numeric values.",
            )
            .into_meta(),
    )
});

static FLOAT: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ScalarMeta::new("Float")
            .description(
                "The `Float` scalar type represents signed double-precision fractional values.",
            )
            .into_meta(),
    )
});

static STRING: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ScalarMeta::new("String")
            .description(
                "The `String` scalar type represents textual data, represented as UTF-8 \
                 character sequences.",
            )
            .into_meta(),
    )
});

static BOOLEAN: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ScalarMeta::new("Boolean")
            .description("The `Boolean` scalar type represents `true` or `false`.")
            .into_meta(),
    )
});

static ID: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ScalarMeta::new("ID")
            .description("The `ID` scalar type represents a unique identifier.")
            .into_meta(),
    )
});

/// The built-in `Int` scalar.
pub fn int() -> Arc<MetaType> {
    INT.clone()
}

/// The built-in `Float` scalar.
pub fn float() -> Arc<MetaType> {
    FLOAT.clone()
}

/// The built-in `String` scalar.
pub fn string() -> Arc<MetaType> {
    STRING.clone()
}

/// The built-in `Boolean` scalar.
pub fn boolean() -> Arc<MetaType> {
    BOOLEAN.clone()
}

/// The built-in `ID` scalar.
pub fn id() -> Arc<MetaType> {
    ID.clone()
}

/// All the built-in scalars, in specification order.
pub fn builtin_scalars() -> [Arc<MetaType>; 5] {
    [int(), float(), string(), boolean(), id()]
}
