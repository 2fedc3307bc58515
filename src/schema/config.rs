//! Validated configuration of a [`Schema`](crate::Schema).

use std::sync::Arc;

use arcstr::ArcStr;
use derive_more::with_trait::{Debug, Display, Error, From};

use crate::{
    schema::{
        descriptor::{Descriptor, DescriptorError},
        loader::TypeLoader,
        meta::MetaType,
        model::{DirectiveType, OperationType},
    },
    types::{
        base::TypeKind,
        name::{Name, NameParseError},
    },
};

/// Error of building a [`SchemaConfig`].
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum ConfigError {
    /// No query type was provided.
    #[display("Schema query type must be provided")]
    MissingQuery,

    /// A root operation type isn't an object type.
    #[display("Schema {operation} type must be Object Type but got: {kind} \"{name}\"")]
    RootKind {
        /// Operation the type was provided for.
        operation: OperationType,
        /// Name of the provided type.
        name: ArcStr,
        /// Actual kind of the provided type.
        kind: TypeKind,
    },

    /// An entry of the extra types has an invalid name.
    #[display(
        "Schema types must be named types, but entry at index {index} is {kind} \"{name}\": \
         {source}"
    )]
    InvalidType {
        /// Index of the entry.
        index: usize,
        /// Name of the entry.
        name: ArcStr,
        /// Kind of the entry.
        kind: TypeKind,
        /// Why the name is invalid.
        source: NameParseError,
    },

    /// An entry of the directives has an invalid name.
    #[display(
        "Schema directives must be named directives, but entry at index {index} is \
         \"{name}\": {source}"
    )]
    InvalidDirectiveName {
        /// Index of the entry.
        index: usize,
        /// Name of the entry.
        name: ArcStr,
        /// Why the name is invalid.
        source: NameParseError,
    },

    /// An entry of the directives can't be placed anywhere.
    #[display(
        "Schema directives must declare locations, but entry at index {index} (\"@{name}\") \
         declares none"
    )]
    DirectiveWithoutLocations {
        /// Index of the entry.
        index: usize,
        /// Name of the entry.
        name: ArcStr,
    },

    /// The provided [`Descriptor`] is malformed.
    #[display("Schema descriptor is malformed: {_0}")]
    #[from]
    Descriptor(DescriptorError),
}

/// Immutable configuration of a [`Schema`](crate::Schema).
///
/// Can only be obtained through [`SchemaConfig::builder()`], which validates
/// every option, so holding a [`SchemaConfig`] means holding a valid one.
#[derive(Clone, Debug)]
pub struct SchemaConfig {
    query: Arc<MetaType>,
    mutation: Option<Arc<MetaType>>,
    subscription: Option<Arc<MetaType>>,
    types: Vec<Arc<MetaType>>,
    directives: Option<Vec<DirectiveType>>,
    descriptor: Option<Arc<Descriptor>>,
    #[debug(skip)]
    type_loader: Option<Arc<dyn TypeLoader>>,
    cache_misses: bool,
}

impl SchemaConfig {
    /// Starts building a new [`SchemaConfig`].
    pub fn builder() -> SchemaConfigBuilder {
        SchemaConfigBuilder::default()
    }

    /// Root type of queries.
    pub fn query(&self) -> &Arc<MetaType> {
        &self.query
    }

    /// Root type of mutations, if any.
    pub fn mutation(&self) -> Option<&Arc<MetaType>> {
        self.mutation.as_ref()
    }

    /// Root type of subscriptions, if any.
    pub fn subscription(&self) -> Option<&Arc<MetaType>> {
        self.subscription.as_ref()
    }

    /// Types to include into the schema even if no root type refers to them.
    pub fn types(&self) -> &[Arc<MetaType>] {
        &self.types
    }

    /// Explicitly configured directives, if any.
    pub fn directives(&self) -> Option<&[DirectiveType]> {
        self.directives.as_deref()
    }

    /// Precomputed [`Descriptor`], if any.
    pub fn descriptor(&self) -> Option<&Arc<Descriptor>> {
        self.descriptor.as_ref()
    }

    /// Loader of types by name, if any.
    pub fn type_loader(&self) -> Option<&dyn TypeLoader> {
        self.type_loader.as_deref()
    }

    /// Whether failed type lookups are remembered.
    pub fn caches_misses(&self) -> bool {
        self.cache_misses
    }
}

/// Builder of a [`SchemaConfig`].
///
/// Options are only checked on [`build()`](SchemaConfigBuilder::build).
#[derive(Clone, Debug, Default)]
pub struct SchemaConfigBuilder {
    query: Option<Arc<MetaType>>,
    mutation: Option<Arc<MetaType>>,
    subscription: Option<Arc<MetaType>>,
    types: Vec<Arc<MetaType>>,
    directives: Option<Vec<DirectiveType>>,
    descriptor: Option<Arc<Descriptor>>,
    #[debug(skip)]
    type_loader: Option<Arc<dyn TypeLoader>>,
    cache_misses: bool,
}

impl SchemaConfigBuilder {
    /// Sets the root type of queries. Must be an object type.
    #[must_use]
    pub fn query(mut self, query: Arc<MetaType>) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the root type of mutations. Must be an object type.
    #[must_use]
    pub fn mutation(mut self, mutation: Arc<MetaType>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Sets the root type of subscriptions. Must be an object type.
    #[must_use]
    pub fn subscription(mut self, subscription: Arc<MetaType>) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Sets the types to include into the schema even if no root type refers
    /// to them, e.g. implementers of interfaces.
    ///
    /// Overwrites any previously set types.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = Arc<MetaType>>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Sets the exact list of directives of the schema, replacing the
    /// default ones.
    ///
    /// To extend the default directives, include them explicitly:
    ///
    /// ```ignore
    /// SchemaConfig::builder().directives(
    ///     default_directives().iter().cloned().chain([my_directive]),
    /// )
    /// ```
    #[must_use]
    pub fn directives(mut self, directives: impl IntoIterator<Item = DirectiveType>) -> Self {
        self.directives = Some(directives.into_iter().collect());
        self
    }

    /// Sets a precomputed [`Descriptor`] of the schema.
    #[must_use]
    pub fn descriptor(mut self, descriptor: impl Into<Arc<Descriptor>>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Sets the loader of types by name.
    #[must_use]
    pub fn type_loader(mut self, loader: impl TypeLoader + 'static) -> Self {
        self.type_loader = Some(Arc::new(loader));
        self
    }

    /// Sets whether a [`Schema`](crate::Schema) remembers names it failed to
    /// resolve, instead of asking the type loader again on every lookup.
    ///
    /// Disabled by default.
    #[must_use]
    pub fn cache_misses(mut self, enabled: bool) -> Self {
        self.cache_misses = enabled;
        self
    }

    /// Validates the options and builds a [`SchemaConfig`] out of them.
    ///
    /// # Errors
    ///
    /// On the first invalid option.
    pub fn build(self) -> Result<SchemaConfig, ConfigError> {
        let query = self.query.ok_or(ConfigError::MissingQuery)?;
        check_root(OperationType::Query, &query)?;
        if let Some(mutation) = &self.mutation {
            check_root(OperationType::Mutation, mutation)?;
        }
        if let Some(subscription) = &self.subscription {
            check_root(OperationType::Subscription, subscription)?;
        }

        for (index, t) in self.types.iter().enumerate() {
            t.name()
                .parse::<Name>()
                .map_err(|source| ConfigError::InvalidType {
                    index,
                    name: t.name().clone(),
                    kind: t.type_kind(),
                    source,
                })?;
        }

        for (index, directive) in self.directives.iter().flatten().enumerate() {
            directive
                .name
                .parse::<Name>()
                .map_err(|source| ConfigError::InvalidDirectiveName {
                    index,
                    name: directive.name.clone(),
                    source,
                })?;
            if directive.locations.is_empty() {
                return Err(ConfigError::DirectiveWithoutLocations {
                    index,
                    name: directive.name.clone(),
                });
            }
        }

        if let Some(descriptor) = &self.descriptor {
            descriptor.validate()?;
        }

        Ok(SchemaConfig {
            query,
            mutation: self.mutation,
            subscription: self.subscription,
            types: self.types,
            directives: self.directives,
            descriptor: self.descriptor,
            type_loader: self.type_loader,
            cache_misses: self.cache_misses,
        })
    }
}

fn check_root(operation: OperationType, t: &MetaType) -> Result<(), ConfigError> {
    match t {
        MetaType::Object(_) => Ok(()),
        _ => Err(ConfigError::RootKind {
            operation,
            name: t.name().clone(),
            kind: t.type_kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::{
        schema::{
            descriptor::{Descriptor, DescriptorError},
            meta::{Fields, InterfaceMeta, MetaType, ObjectMeta, UnionMeta},
            model::{DirectiveLocation, DirectiveType, OperationType},
        },
        types::{base::TypeKind, scalars},
    };

    use super::{ConfigError, SchemaConfig};

    fn object(name: &str) -> Arc<MetaType> {
        Arc::new(ObjectMeta::new(name, Fields::default()).into_meta())
    }

    #[test]
    fn requires_query() {
        let err = SchemaConfig::builder().build().unwrap_err();

        assert_eq!(err, ConfigError::MissingQuery);
    }

    #[test]
    fn query_must_be_object() {
        let err = SchemaConfig::builder()
            .query(scalars::string())
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::RootKind {
                operation: OperationType::Query,
                name: "String".into(),
                kind: TypeKind::Scalar,
            },
        );
        assert_eq!(
            err.to_string(),
            "Schema query type must be Object Type but got: SCALAR \"String\"",
        );
    }

    #[test]
    fn mutation_and_subscription_must_be_objects() {
        let node = Arc::new(InterfaceMeta::new("Node", Fields::default()).into_meta());
        let err = SchemaConfig::builder()
            .query(object("Query"))
            .mutation(node)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::RootKind {
                operation: OperationType::Mutation,
                name: "Node".into(),
                kind: TypeKind::Interface,
            },
        );

        let union = Arc::new(UnionMeta::new("Event", &[object("Ping")]).into_meta());
        let err = SchemaConfig::builder()
            .query(object("Query"))
            .mutation(object("Mutation"))
            .subscription(union)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RootKind {
                operation: OperationType::Subscription,
                kind: TypeKind::Union,
                ..
            },
        ));
    }

    #[test]
    fn types_must_be_validly_named() {
        let err = SchemaConfig::builder()
            .query(object("Query"))
            .types([object("User"), object("Bad-Name")])
            .build()
            .unwrap_err();

        assert!(matches!(
            &err,
            ConfigError::InvalidType {
                index: 1,
                kind: TypeKind::Object,
                name,
                ..
            } if name == "Bad-Name",
        ));
        assert!(err.to_string().contains("entry at index 1 is OBJECT \"Bad-Name\""));
    }

    #[test]
    fn directives_must_be_placeable() {
        let err = SchemaConfig::builder()
            .query(object("Query"))
            .directives([
                DirectiveType::new("cached", &[DirectiveLocation::Field], &[]),
                DirectiveType::new("nowhere", &[], &[]),
            ])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DirectiveWithoutLocations {
                index: 1,
                name: "nowhere".into(),
            },
        );

        let err = SchemaConfig::builder()
            .query(object("Query"))
            .directives([DirectiveType::new("1st", &[DirectiveLocation::Field], &[])])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDirectiveName { index: 0, .. }));
    }

    #[test]
    fn descriptor_must_be_well_formed() {
        let descriptor: Descriptor = serde_json::from_value(serde_json::json!({
            "version": "1.0",
            "created": "2024-01-01T00:00:00Z",
            "typeMap": ["Query"],
            "possibleTypeMap": {"Node": []},
        }))
        .unwrap();

        let err = SchemaConfig::builder()
            .query(object("Query"))
            .descriptor(descriptor)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Descriptor(DescriptorError::UnknownAbstractType("Node".into())),
        );
    }

    #[test]
    fn builds_valid_config() {
        let config = SchemaConfig::builder()
            .query(object("Query"))
            .mutation(object("Mutation"))
            .types([object("User")])
            .type_loader(|_: &str| -> Option<Arc<MetaType>> { None })
            .cache_misses(true)
            .build()
            .unwrap();

        assert_eq!(config.query().name().as_str(), "Query");
        assert_eq!(config.mutation().map(|t| t.name().as_str()), Some("Mutation"));
        assert!(config.subscription().is_none());
        assert_eq!(config.types().len(), 1);
        assert!(config.directives().is_none());
        assert!(config.descriptor().is_none());
        assert!(config.type_loader().is_some());
        assert!(config.caches_misses());
    }
}
