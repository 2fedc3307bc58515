use std::{
    fmt, slice,
    sync::{Arc, LazyLock},
};

use arcstr::ArcStr;
use derive_more::with_trait::{Debug, Display, Error};
use fnv::FnvBuildHasher;
use indexmap::{IndexMap, map::Entry};
use log::{debug, trace, warn};
use parking_lot::RwLock;

use crate::{
    introspection,
    schema::{
        config::SchemaConfig,
        descriptor::Descriptor,
        extract::{ReachableTypes, TypeGraphExtractor, TypeMap},
        meta::{Argument, InterfaceMeta, MetaType, UnionMeta},
    },
    types::{base::TypeKind, scalars},
};

/// Kind of the operation a root type serves.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum OperationType {
    /// Root of read-only queries.
    #[display("query")]
    Query,
    /// Root of mutations.
    #[display("mutation")]
    Mutation,
    /// Root of subscriptions.
    #[display("subscription")]
    Subscription,
}

/// Reference to a type, possibly wrapped into lists and non-null markers.
#[derive(Clone, Debug)]
pub enum TypeType {
    /// A named type.
    Concrete(Arc<MetaType>),
    /// Non-null wrapper of another type.
    NonNull(Box<TypeType>),
    /// List of another type.
    List(Box<TypeType>),
}

impl TypeType {
    /// Wraps this type into a non-null marker.
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Wraps this type into a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Returns the named type inside all the wrappers.
    #[inline]
    pub fn innermost_concrete(&self) -> &Arc<MetaType> {
        match self {
            Self::Concrete(t) => t,
            Self::NonNull(n) | Self::List(n) => n.innermost_concrete(),
        }
    }
}

impl From<Arc<MetaType>> for TypeType {
    fn from(t: Arc<MetaType>) -> Self {
        Self::Concrete(t)
    }
}

impl From<&Arc<MetaType>> for TypeType {
    fn from(t: &Arc<MetaType>) -> Self {
        Self::Concrete(t.clone())
    }
}

impl fmt::Display for TypeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(t) => f.write_str(t.name()),
            Self::List(i) => write!(f, "[{i}]"),
            Self::NonNull(i) => write!(f, "{i}!"),
        }
    }
}

/// Metadata of a directive.
#[derive(Clone, Debug)]
pub struct DirectiveType {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub locations: Vec<DirectiveLocation>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub is_repeatable: bool,
}

/// Location a directive may be placed at.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum DirectiveLocation {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
    #[display("field")]
    Field,
    #[display("fragment definition")]
    FragmentDefinition,
    #[display("fragment spread")]
    FragmentSpread,
    #[display("inline fragment")]
    InlineFragment,
    #[display("variable definition")]
    VariableDefinition,
    #[display("scalar")]
    Scalar,
    #[display("field definition")]
    FieldDefinition,
    #[display("argument definition")]
    ArgumentDefinition,
    #[display("input field definition")]
    InputFieldDefinition,
    #[display("enum value")]
    EnumValue,
}

impl DirectiveLocation {
    /// Every [`DirectiveLocation`], in the order introspection lists them.
    pub const ALL: [Self; 13] = [
        Self::Query,
        Self::Mutation,
        Self::Subscription,
        Self::Field,
        Self::FragmentDefinition,
        Self::FragmentSpread,
        Self::InlineFragment,
        Self::VariableDefinition,
        Self::Scalar,
        Self::FieldDefinition,
        Self::ArgumentDefinition,
        Self::InputFieldDefinition,
        Self::EnumValue,
    ];

    /// Name of this location as exposed by the `__DirectiveLocation` enum.
    pub const fn introspection_name(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
            Self::Scalar => "SCALAR",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
            Self::EnumValue => "ENUM_VALUE",
        }
    }
}

impl DirectiveType {
    /// Builds a new non-repeatable [`DirectiveType`].
    pub fn new(
        name: impl Into<ArcStr>,
        locations: &[DirectiveLocation],
        arguments: &[Argument],
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.to_vec(),
            arguments: arguments.to_vec(),
            is_repeatable: false,
        }
    }

    fn new_skip() -> Self {
        Self::new(
            "skip",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", TypeType::from(scalars::boolean()).non_null())],
        )
        .description(
            "Directs the executor to skip this field or fragment when the `if` argument is true.",
        )
    }

    fn new_include() -> Self {
        Self::new(
            "include",
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new("if", TypeType::from(scalars::boolean()).non_null())],
        )
        .description(
            "Directs the executor to include this field or fragment only when the `if` argument \
             is true.",
        )
    }

    fn new_deprecated() -> Self {
        Self::new(
            "deprecated",
            &[
                DirectiveLocation::FieldDefinition,
                DirectiveLocation::ArgumentDefinition,
                DirectiveLocation::InputFieldDefinition,
                DirectiveLocation::EnumValue,
            ],
            &[Argument::new("reason", scalars::string())],
        )
        .description("Marks an element of a GraphQL schema as no longer supported.")
    }

    fn new_specified_by() -> Self {
        Self::new(
            "specifiedBy",
            &[DirectiveLocation::Scalar],
            &[Argument::new("url", TypeType::from(scalars::string()).non_null())],
        )
        .description("Exposes a URL that specifies the behaviour of this scalar.")
    }

    /// Sets the `description` of this [`DirectiveType`].
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks this directive as repeatable at a single location.
    #[must_use]
    pub fn repeatable(mut self) -> Self {
        self.is_repeatable = true;
        self
    }
}

static DEFAULT_DIRECTIVES: LazyLock<Vec<DirectiveType>> = LazyLock::new(|| {
    vec![
        DirectiveType::new_include(),
        DirectiveType::new_skip(),
        DirectiveType::new_deprecated(),
        DirectiveType::new_specified_by(),
    ]
});

/// Directives a [`Schema`] exposes when its configuration doesn't list any.
pub fn default_directives() -> &'static [DirectiveType] {
    &DEFAULT_DIRECTIVES
}

/// Error of resolving a type in a [`Schema`].
///
/// An unknown type isn't an error: it's reported as `Ok(None)` instead.
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum ResolveError {
    /// The type loader returned a type with a name other than requested.
    #[display("Type loader returned type \"{returned}\" when asked for \"{requested}\"")]
    NameMismatch {
        /// Name of the requested type.
        requested: ArcStr,
        /// Name of the type the loader returned.
        returned: ArcStr,
    },

    /// The schema descriptor lists a type nothing can provide.
    #[display("Type \"{name}\" is listed by the schema descriptor but couldn't be loaded")]
    MissingType {
        /// Name of the missing type.
        name: ArcStr,
    },

    /// Possible types were requested for a type which is neither an
    /// interface nor a union.
    #[display("Can't retrieve possible types of non-abstract {kind} type \"{name}\"")]
    NotAbstract {
        /// Name of the type.
        name: ArcStr,
        /// Kind of the type.
        kind: TypeKind,
    },
}

/// Either a type already at hand, or a name of a type to look up.
#[derive(Clone, Debug)]
pub enum TypeOrName<'n> {
    /// A type instance.
    Type(Arc<MetaType>),
    /// Name of a type.
    Name(&'n str),
}

impl From<Arc<MetaType>> for TypeOrName<'_> {
    fn from(t: Arc<MetaType>) -> Self {
        Self::Type(t)
    }
}

impl From<&Arc<MetaType>> for TypeOrName<'_> {
    fn from(t: &Arc<MetaType>) -> Self {
        Self::Type(t.clone())
    }
}

impl<'n> From<&'n str> for TypeOrName<'n> {
    fn from(name: &'n str) -> Self {
        Self::Name(name)
    }
}

impl<'n> From<&'n ArcStr> for TypeOrName<'n> {
    fn from(name: &'n ArcStr) -> Self {
        Self::Name(name.as_str())
    }
}

#[derive(Clone, Debug)]
enum CacheEntry {
    Present(Arc<MetaType>),
    /// Looked up before and known not to exist.
    Absent,
}

#[derive(Debug, Default)]
struct ResolutionState {
    resolved: IndexMap<ArcStr, CacheEntry, FnvBuildHasher>,
    fully_loaded: bool,
    /// Present types of a fully loaded cache, dropped whenever a type is
    /// added.
    snapshot: Option<Arc<TypeMap>>,
    descriptor: Option<Arc<Descriptor>>,
}

impl ResolutionState {
    fn present(&self, name: &str) -> Option<Arc<MetaType>> {
        match self.resolved.get(name) {
            Some(CacheEntry::Present(t)) => Some(t.clone()),
            _ => None,
        }
    }

    fn present_types(&self) -> TypeMap {
        self.resolved
            .iter()
            .filter_map(|(name, entry)| match entry {
                CacheEntry::Present(t) => Some((name.clone(), t.clone())),
                CacheEntry::Absent => None,
            })
            .collect()
    }

    fn snapshot(&mut self) -> Arc<TypeMap> {
        if let Some(types) = &self.snapshot {
            return types.clone();
        }
        let types = Arc::new(self.present_types());
        self.snapshot = Some(types.clone());
        types
    }

    /// Caches the type `t` under `name`, unless some type is cached under it
    /// already, and returns the cached one.
    fn cache(&mut self, name: ArcStr, t: Arc<MetaType>) -> Arc<MetaType> {
        match self.resolved.entry(name) {
            Entry::Occupied(mut e) => match e.get() {
                CacheEntry::Present(existing) => existing.clone(),
                CacheEntry::Absent => {
                    e.insert(CacheEntry::Present(t.clone()));
                    self.snapshot = None;
                    t
                }
            },
            Entry::Vacant(e) => {
                e.insert(CacheEntry::Present(t.clone()));
                self.snapshot = None;
                t
            }
        }
    }
}

/// Registry of the types composing an executable schema.
///
/// Types are resolved lazily and memoized: either one by one through the
/// configured [`TypeLoader`](crate::TypeLoader), or all at once through the
/// [`TypeGraphExtractor`] walking the whole type graph from the root types.
/// Once every type is known the registry is _fully loaded_ and stays so.
///
/// A [`Schema`] may be shared between threads. The whole type graph is
/// walked at most once per [`Schema`], no matter how many callers race for
/// it.
///
/// Every type in a fully loaded [`Schema`] has the types it refers to loaded
/// as well: a type registered afterwards is walked on its own.
#[derive(Debug)]
pub struct Schema {
    config: SchemaConfig,
    #[debug(skip)]
    extractor: Box<dyn TypeGraphExtractor>,
    state: RwLock<ResolutionState>,
}

impl Schema {
    /// Creates a new [`Schema`] out of the already validated `config`,
    /// discovering types with the [`ReachableTypes`] extractor.
    pub fn new(config: SchemaConfig) -> Self {
        Self::with_extractor(config, ReachableTypes)
    }

    /// Creates a new [`Schema`] out of the already validated `config`,
    /// discovering types with the provided `extractor`.
    pub fn with_extractor(
        config: SchemaConfig,
        extractor: impl TypeGraphExtractor + 'static,
    ) -> Self {
        Self {
            config,
            extractor: Box::new(extractor),
            state: RwLock::new(ResolutionState::default()),
        }
    }

    /// Configuration this [`Schema`] was created from.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Root type of query operations.
    pub fn query_type(&self) -> &Arc<MetaType> {
        self.config.query()
    }

    /// Root type of mutation operations, if any.
    pub fn mutation_type(&self) -> Option<&Arc<MetaType>> {
        self.config.mutation()
    }

    /// Root type of subscription operations, if any.
    pub fn subscription_type(&self) -> Option<&Arc<MetaType>> {
        self.config.subscription()
    }

    /// Indicates whether every type of this [`Schema`] has been resolved
    /// already.
    pub fn is_fully_loaded(&self) -> bool {
        self.state.read().fully_loaded
    }

    /// Returns every type of this [`Schema`], keyed by name.
    ///
    /// When both a [`Descriptor`] and a type loader are configured, only the
    /// types listed by the descriptor and not resolved yet are loaded, one
    /// by one. Otherwise, the whole type graph is collected.
    ///
    /// Once fully loaded, the same map is returned until another type gets
    /// registered.
    ///
    /// # Errors
    ///
    /// If the type loader fails to provide a type listed by the descriptor,
    /// or provides a type with a wrong name.
    pub fn type_map(&self) -> Result<Arc<TypeMap>, ResolveError> {
        if let Some(types) = &self.state.read().snapshot {
            return Ok(types.clone());
        }
        if !self.is_fully_loaded() {
            self.load_all_types()?;
        }
        Ok(self.state.write().snapshot())
    }

    fn load_all_types(&self) -> Result<(), ResolveError> {
        match (self.config.descriptor(), self.config.type_loader()) {
            (Some(descriptor), Some(_)) => {
                let missing = {
                    let state = self.state.read();
                    descriptor
                        .type_names()
                        .filter(|name| state.present(name).is_none())
                        .cloned()
                        .collect::<Vec<_>>()
                };
                debug!(
                    "loading {} types listed by the schema descriptor",
                    missing.len(),
                );
                for name in missing {
                    let Some(loaded) = self.load_type(&name)? else {
                        warn!(
                            "type loader can't provide type `{name}` listed by the schema \
                             descriptor",
                        );
                        return Err(ResolveError::MissingType { name });
                    };
                    self.remember(&name, loaded);
                }
                self.state.write().fully_loaded = true;
            }
            _ => self.collect_all_types(),
        }
        Ok(())
    }

    /// Returns the type with the given `name`, if this [`Schema`] has one.
    ///
    /// Doesn't force the whole type graph to be collected when a type loader
    /// is configured.
    ///
    /// # Errors
    ///
    /// If the type loader returns a type with a different name.
    pub fn get_type(&self, name: &str) -> Result<Option<Arc<MetaType>>, ResolveError> {
        self.resolve_type(name)
    }

    /// Resolves either a type instance or a type name.
    ///
    /// A type instance is registered under its own name, unless a type of
    /// that name is known already, and is returned unchanged.
    ///
    /// A name is looked up in the cache first and loaded on a miss. Failed
    /// lookups are remembered only if the [`SchemaConfig`] was built with
    /// [`cache_misses`](crate::SchemaConfigBuilder::cache_misses), otherwise
    /// every lookup of an unknown name consults the type loader again.
    ///
    /// # Errors
    ///
    /// If the type loader returns a type with a different name.
    pub fn resolve_type<'n>(
        &self,
        type_or_name: impl Into<TypeOrName<'n>>,
    ) -> Result<Option<Arc<MetaType>>, ResolveError> {
        let name = match type_or_name.into() {
            TypeOrName::Type(t) => {
                self.remember(&t.name().clone(), t.clone());
                return Ok(Some(t));
            }
            TypeOrName::Name(name) => name,
        };

        let cached = self.state.read().resolved.get(name).cloned();
        match cached {
            Some(CacheEntry::Present(t)) => return Ok(Some(t)),
            Some(CacheEntry::Absent) => return Ok(None),
            None => {}
        }

        match self.load_type(name)? {
            Some(t) => Ok(Some(self.remember(&ArcStr::from(name), t))),
            None => {
                if self.config.caches_misses() {
                    self.state
                        .write()
                        .resolved
                        .entry(name.into())
                        .or_insert(CacheEntry::Absent);
                }
                Ok(None)
            }
        }
    }

    /// Loads the type with the given `name`, bypassing the cache.
    ///
    /// Without a configured type loader, the whole type graph is collected
    /// (once) and the type is looked up in it.
    ///
    /// # Errors
    ///
    /// If the type loader returns a type with a different name. Such a type
    /// is never cached.
    pub fn load_type(&self, name: &str) -> Result<Option<Arc<MetaType>>, ResolveError> {
        let Some(loader) = self.config.type_loader() else {
            self.collect_all_types();
            return Ok(self.state.read().present(name));
        };

        trace!("loading type `{name}`");
        match loader.load(name) {
            Some(t) if t.name().as_str() != name => {
                warn!(
                    "type loader returned type `{}` when asked for `{name}`",
                    t.name(),
                );
                Err(ResolveError::NameMismatch {
                    requested: name.into(),
                    returned: t.name().clone(),
                })
            }
            loaded => Ok(loaded),
        }
    }

    /// Returns the [`Descriptor`] of this [`Schema`].
    ///
    /// The [`Descriptor`] provided by the [`SchemaConfig`] always wins. Then
    /// goes the one built by this [`Schema`] before. Only if there is none,
    /// a new one is built, which requires every type to be resolved.
    pub fn descriptor(&self) -> Arc<Descriptor> {
        if let Some(descriptor) = self.available_descriptor() {
            return descriptor;
        }
        let built = self.make_descriptor();
        self.state
            .write()
            .descriptor
            .get_or_insert(built)
            .clone()
    }

    /// Builds a new [`Descriptor`] of this [`Schema`] out of all its types,
    /// and remembers it.
    ///
    /// The result may be persisted and provided to later
    /// [`SchemaConfig`]s to skip collecting the type graph on startup.
    pub fn build_descriptor(&self) -> Arc<Descriptor> {
        let descriptor = self.make_descriptor();
        self.state.write().descriptor = Some(descriptor.clone());
        descriptor
    }

    /// Returns the object types able to satisfy the given abstract type.
    ///
    /// Members of a union are returned as declared by it. Implementers of an
    /// interface are taken from the [`Descriptor`] and resolved one by one.
    ///
    /// # Errors
    ///
    /// If `abstract_type` is neither an interface nor a union, or if a type
    /// listed by the [`Descriptor`] can't be resolved.
    pub fn possible_types(
        &self,
        abstract_type: &MetaType,
    ) -> Result<Vec<Arc<MetaType>>, ResolveError> {
        match abstract_type {
            MetaType::Union(UnionMeta { of_types, .. }) => Ok(of_types.clone()),
            MetaType::Interface(InterfaceMeta { name, .. }) => {
                let descriptor = self.descriptor();
                descriptor
                    .possible_types_of(name)
                    .map(|type_name| {
                        self.resolve_type(type_name)?
                            .ok_or_else(|| ResolveError::MissingType {
                                name: type_name.clone(),
                            })
                    })
                    .collect()
            }
            t => Err(ResolveError::NotAbstract {
                name: t.name().clone(),
                kind: t.type_kind(),
            }),
        }
    }

    /// Checks whether `possible_type` can satisfy `abstract_type`.
    ///
    /// Answered by the [`Descriptor`] if one is available already, or by the
    /// types themselves otherwise. Never resolves any type.
    pub fn is_possible_type(&self, abstract_type: &MetaType, possible_type: &MetaType) -> bool {
        if let Some(descriptor) = self.available_descriptor() {
            return descriptor.is_possible_type(abstract_type.name(), possible_type.name());
        }

        match abstract_type {
            MetaType::Interface(InterfaceMeta { name, .. }) => {
                matches!(possible_type, MetaType::Object(_))
                    && possible_type.implements_interface(name)
            }
            MetaType::Union(u) => u.is_possible_type(possible_type.name()),
            _ => false,
        }
    }

    /// Checks whether values of the two types may ever be the same object.
    ///
    /// # Errors
    ///
    /// If possible types of an abstract type can't be resolved.
    pub fn type_overlap(&self, t1: &MetaType, t2: &MetaType) -> Result<bool, ResolveError> {
        if t1.name() == t2.name() {
            return Ok(true);
        }

        Ok(match (t1.is_abstract(), t2.is_abstract()) {
            (true, true) => self
                .possible_types(t1)?
                .iter()
                .any(|t| self.is_possible_type(t2, t)),
            (true, false) => self.is_possible_type(t1, t2),
            (false, true) => self.is_possible_type(t2, t1),
            (false, false) => false,
        })
    }

    /// Checks whether the type named `sub_type_name` may be used where the
    /// type named `super_type_name` is expected.
    ///
    /// # Errors
    ///
    /// If any of the types can't be resolved.
    pub fn is_named_subtype(
        &self,
        sub_type_name: &str,
        super_type_name: &str,
    ) -> Result<bool, ResolveError> {
        if sub_type_name == super_type_name {
            return Ok(true);
        }
        Ok(
            match (self.get_type(sub_type_name)?, self.get_type(super_type_name)?) {
                (Some(sub_type), Some(super_type)) => {
                    super_type.is_abstract() && self.is_possible_type(&super_type, &sub_type)
                }
                _ => false,
            },
        )
    }

    /// Returns the directives of this [`Schema`]: the configured ones, or
    /// the [`default_directives()`].
    pub fn directives(&self) -> &[DirectiveType] {
        self.config.directives().unwrap_or(default_directives())
    }

    /// Returns the directive with the given `name` among the
    /// [`Schema::directives()`].
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives().iter().find(|d| d.name == name)
    }

    fn available_descriptor(&self) -> Option<Arc<Descriptor>> {
        self.config
            .descriptor()
            .cloned()
            .or_else(|| self.state.read().descriptor.clone())
    }

    fn make_descriptor(&self) -> Arc<Descriptor> {
        self.collect_all_types();
        let types = self.state.write().snapshot();
        let descriptor = Descriptor::from_types(types.values());
        debug!(
            "built schema descriptor of {} types and {} abstract types",
            descriptor.type_names().len(),
            descriptor.abstract_type_names().len(),
        );
        Arc::new(descriptor)
    }

    /// Caches the type `t` under `name`, unless some type is cached under it
    /// already, and returns the cached one.
    ///
    /// Once fully loaded, the types `t` refers to are cached along with it.
    fn remember(&self, name: &ArcStr, t: Arc<MetaType>) -> Arc<MetaType> {
        loop {
            let fully_loaded = {
                let state = self.state.read();
                if let Some(existing) = state.present(name) {
                    return existing;
                }
                state.fully_loaded
            };

            let mut types = if fully_loaded {
                trace!("collecting types referred by late type `{name}`");
                self.extractor.extract(slice::from_ref(&t))
            } else {
                TypeMap::default()
            };
            types.insert(name.clone(), t.clone());

            let mut state = self.state.write();
            if state.fully_loaded != fully_loaded {
                continue;
            }
            let mut cached = t.clone();
            for (type_name, found) in types {
                let is_requested = type_name == *name;
                let found = state.cache(type_name, found);
                if is_requested {
                    cached = found;
                }
            }
            return cached;
        }
    }

    /// Collects every type reachable from the types resolved so far and
    /// from the root types, unless this [`Schema`] is fully loaded already.
    ///
    /// Types resolved before keep their identity. Remembered misses are
    /// dropped.
    fn collect_all_types(&self) {
        if self.state.read().fully_loaded {
            return;
        }
        let mut state = self.state.write();
        if state.fully_loaded {
            return;
        }

        let mut seeds = state.present_types().into_values().collect::<Vec<_>>();
        seeds.extend(self.seed_types());
        debug!("collecting schema types reachable from {} seed types", seeds.len());
        let mut types = self.extractor.extract(&seeds);
        for scalar in scalars::builtin_scalars() {
            types.entry(scalar.name().clone()).or_insert(scalar);
        }
        for (name, entry) in &state.resolved {
            if let CacheEntry::Present(t) = entry {
                types.insert(name.clone(), t.clone());
            }
        }
        debug!("collected {} schema types", types.len());

        state.resolved = types
            .into_iter()
            .map(|(name, t)| (name, CacheEntry::Present(t)))
            .collect();
        state.snapshot = None;
        state.fully_loaded = true;
    }

    fn seed_types(&self) -> Vec<Arc<MetaType>> {
        let mut seeds = vec![self.config.query().clone()];
        seeds.extend(self.config.mutation().cloned());
        seeds.extend(self.config.subscription().cloned());
        seeds.push(introspection::schema_type());
        seeds.extend(self.config.types().iter().cloned());
        seeds
    }
}
