//! Meta-types of the GraphQL introspection system.
//!
//! Every full type collection is seeded with [`schema_type()`], so these
//! types are part of any schema.

use std::sync::{Arc, LazyLock};

use crate::{
    schema::{
        meta::{Argument, EnumMeta, EnumValue, Field, Fields, MetaType, ObjectMeta},
        model::{DirectiveLocation, TypeType},
    },
    types::{base::TypeKind, scalars},
};

fn non_null(t: Arc<MetaType>) -> TypeType {
    TypeType::from(t).non_null()
}

fn list_of_non_null(t: Arc<MetaType>) -> TypeType {
    non_null(t).list()
}

fn include_deprecated() -> Argument {
    Argument::new("includeDeprecated", scalars::boolean())
}

static SCHEMA: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__Schema",
            Fields::lazy(|| {
                vec![
                    Field::new("description", scalars::string()),
                    Field::new("types", list_of_non_null(type_()).non_null()),
                    Field::new("queryType", non_null(type_())),
                    Field::new("mutationType", type_()),
                    Field::new("subscriptionType", type_()),
                    Field::new("directives", list_of_non_null(directive()).non_null()),
                ]
            }),
        )
        .description(
            "A GraphQL Schema defines the capabilities of a GraphQL server. It exposes all \
             available types and directives on the server, as well as the entry points for \
             query, mutation, and subscription operations.",
        )
        .into_meta(),
    )
});

static TYPE: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__Type",
            Fields::lazy(|| {
                vec![
                    Field::new("kind", non_null(type_kind())),
                    Field::new("name", scalars::string()),
                    Field::new("description", scalars::string()),
                    Field::new("specifiedByURL", scalars::string()),
                    Field::new("fields", list_of_non_null(field()))
                        .argument(include_deprecated()),
                    Field::new("interfaces", list_of_non_null(type_())),
                    Field::new("possibleTypes", list_of_non_null(type_())),
                    Field::new("enumValues", list_of_non_null(enum_value()))
                        .argument(include_deprecated()),
                    Field::new("inputFields", list_of_non_null(input_value())),
                    Field::new("ofType", type_()),
                ]
            }),
        )
        .into_meta(),
    )
});

static FIELD: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__Field",
            Fields::lazy(|| {
                vec![
                    Field::new("name", non_null(scalars::string())),
                    Field::new("description", scalars::string()),
                    Field::new("args", list_of_non_null(input_value()).non_null()),
                    Field::new("type", non_null(type_())),
                    Field::new("isDeprecated", non_null(scalars::boolean())),
                    Field::new("deprecationReason", scalars::string()),
                ]
            }),
        )
        .into_meta(),
    )
});

static INPUT_VALUE: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__InputValue",
            Fields::lazy(|| {
                vec![
                    Field::new("name", non_null(scalars::string())),
                    Field::new("description", scalars::string()),
                    Field::new("type", non_null(type_())),
                    Field::new("defaultValue", scalars::string()),
                ]
            }),
        )
        .into_meta(),
    )
});

static ENUM_VALUE: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__EnumValue",
            Fields::new(vec![
                Field::new("name", non_null(scalars::string())),
                Field::new("description", scalars::string()),
                Field::new("isDeprecated", non_null(scalars::boolean())),
                Field::new("deprecationReason", scalars::string()),
            ]),
        )
        .into_meta(),
    )
});

static DIRECTIVE: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    Arc::new(
        ObjectMeta::new(
            "__Directive",
            Fields::lazy(|| {
                vec![
                    Field::new("name", non_null(scalars::string())),
                    Field::new("description", scalars::string()),
                    Field::new("locations", list_of_non_null(directive_location()).non_null()),
                    Field::new("args", list_of_non_null(input_value()).non_null()),
                    Field::new("isRepeatable", non_null(scalars::boolean())),
                ]
            }),
        )
        .into_meta(),
    )
});

static TYPE_KIND: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    let values = TypeKind::ALL
        .iter()
        .map(|kind| EnumValue::new(kind.to_string()))
        .collect::<Vec<_>>();
    Arc::new(
        EnumMeta::new("__TypeKind", &values)
            .description("An enum describing what kind of type a given `__Type` is.")
            .into_meta(),
    )
});

static DIRECTIVE_LOCATION: LazyLock<Arc<MetaType>> = LazyLock::new(|| {
    let values = DirectiveLocation::ALL
        .iter()
        .map(|loc| EnumValue::new(loc.introspection_name()))
        .collect::<Vec<_>>();
    Arc::new(EnumMeta::new("__DirectiveLocation", &values).into_meta())
});

/// The `__Schema` meta-type, root of the introspection type graph.
pub fn schema_type() -> Arc<MetaType> {
    SCHEMA.clone()
}

fn type_() -> Arc<MetaType> {
    TYPE.clone()
}

fn field() -> Arc<MetaType> {
    FIELD.clone()
}

fn input_value() -> Arc<MetaType> {
    INPUT_VALUE.clone()
}

fn enum_value() -> Arc<MetaType> {
    ENUM_VALUE.clone()
}

fn directive() -> Arc<MetaType> {
    DIRECTIVE.clone()
}

fn type_kind() -> Arc<MetaType> {
    TYPE_KIND.clone()
}

fn directive_location() -> Arc<MetaType> {
    DIRECTIVE_LOCATION.clone()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::schema::extract::{ReachableTypes, TypeGraphExtractor};

    use super::schema_type;

    #[test]
    fn schema_type_reaches_every_meta_type() {
        let types = ReachableTypes.extract(&[schema_type()]);

        let mut names = types.keys().map(|n| n.as_str()).collect::<Vec<_>>();
        names.sort_unstable();
        assert_eq!(
            names,
            [
                "Boolean",
                "String",
                "__Directive",
                "__DirectiveLocation",
                "__EnumValue",
                "__Field",
                "__InputValue",
                "__Schema",
                "__Type",
                "__TypeKind",
            ],
        );
    }

    #[test]
    fn type_refers_to_itself() {
        let schema = schema_type();
        let type_ = schema
            .field_by_name("queryType")
            .unwrap()
            .field_type
            .innermost_concrete()
            .clone();

        let of_type = type_.field_by_name("ofType").unwrap();
        assert_eq!(of_type.field_type.to_string(), "__Type");
        assert!(std::sync::Arc::ptr_eq(
            of_type.field_type.innermost_concrete(),
            &type_,
        ));
    }
}
