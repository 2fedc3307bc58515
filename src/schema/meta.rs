//! Types used to describe a `GraphQL` schema

use std::{fmt, sync::Arc, sync::OnceLock};

use arcstr::ArcStr;

use crate::{schema::model::TypeType, types::base::TypeKind};

/// Whether an item is deprecated, with context.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DeprecationStatus {
    /// The field/variant is not deprecated.
    Current,
    /// The field/variant is deprecated, with an optional reason
    Deprecated(Option<ArcStr>),
}

type Thunk<T> = Box<dyn Fn() -> Vec<T> + Send + Sync>;

/// List of fields (or input fields) of a type, possibly evaluated lazily.
///
/// Types referring to each other through their fields can't be built eagerly,
/// so a thunk may be supplied instead. It is evaluated at most once, on the
/// first access.
pub struct Fields<T> {
    resolved: OnceLock<Vec<T>>,
    thunk: Option<Thunk<T>>,
}

impl<T> Fields<T> {
    /// Creates an eagerly evaluated list of fields.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            resolved: OnceLock::from(items),
            thunk: None,
        }
    }

    /// Creates a list of fields evaluated by `thunk` on the first access.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: Fn() -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            resolved: OnceLock::new(),
            thunk: Some(Box::new(thunk)),
        }
    }

    /// Returns the fields, evaluating the thunk if it hasn't been yet.
    pub fn get(&self) -> &[T] {
        self.resolved
            .get_or_init(|| self.thunk.as_ref().map(|f| f()).unwrap_or_default())
    }

    /// Indicates whether these fields have been evaluated already.
    pub fn is_evaluated(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for Fields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved.get() {
            Some(items) => f.debug_list().entries(items).finish(),
            None => f.write_str("<unevaluated>"),
        }
    }
}

/// Scalar type metadata
#[derive(Debug)]
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
}

/// Object type metadata
#[derive(Debug)]
pub struct ObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Fields<Field>,
    #[doc(hidden)]
    pub interfaces: Vec<Arc<MetaType>>,
}

/// Enum type metadata
#[derive(Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

/// Interface type metadata
#[derive(Debug)]
pub struct InterfaceMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Fields<Field>,
    #[doc(hidden)]
    pub interfaces: Vec<Arc<MetaType>>,
}

/// Union type metadata
#[derive(Debug)]
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub of_types: Vec<Arc<MetaType>>,
}

/// Input object metadata
#[derive(Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Fields<Argument>,
}

/// Generic type metadata
#[derive(Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Object(ObjectMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    Interface(InterfaceMeta),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    InputObject(InputObjectMeta),
}

/// Metadata for a field
#[derive(Debug, Clone)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: TypeType,
    #[doc(hidden)]
    pub deprecation_status: DeprecationStatus,
}

/// Metadata for an argument to a field
#[derive(Debug, Clone)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: TypeType,
}

/// Metadata for a single value in an enum
#[derive(Debug, Clone)]
pub struct EnumValue {
    /// The name of the enum value
    ///
    /// This is the string literal representation of the enum in responses.
    pub name: ArcStr,
    /// The optional description of the enum value.
    pub description: Option<ArcStr>,
    /// Whether the field is deprecated or not, with an optional reason.
    pub deprecation_status: DeprecationStatus,
}

impl MetaType {
    /// Access the name of the type
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => name,
        }
    }

    /// Construct a [`TypeKind`] for a given type
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Enum(_) => TypeKind::Enum,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Access a field's meta data given its name
    ///
    /// Only objects and interfaces have fields. This method always returns `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Access the fields of an object or an interface, evaluating them if
    /// needed.
    pub fn fields(&self) -> Option<&[Field]> {
        match self {
            Self::Object(ObjectMeta { fields, .. })
            | Self::Interface(InterfaceMeta { fields, .. }) => Some(fields.get()),
            _ => None,
        }
    }

    /// Returns the interfaces an object or an interface declares conformance
    /// to.
    pub fn interfaces(&self) -> &[Arc<MetaType>] {
        match self {
            Self::Object(ObjectMeta { interfaces, .. })
            | Self::Interface(InterfaceMeta { interfaces, .. }) => interfaces,
            _ => &[],
        }
    }

    /// Returns true if this type declares conformance to the interface with
    /// the given name.
    pub fn implements_interface(&self, interface_name: &str) -> bool {
        self.interfaces()
            .iter()
            .any(|i| i.name().as_str() == interface_name)
    }

    /// Returns true if the type is abstract
    ///
    /// Only interfaces and unions are abstract types.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }
}

impl UnionMeta {
    /// Build a new [`UnionMeta`] type with the specified `name` and member
    /// object types.
    pub fn new(name: impl Into<ArcStr>, of_types: &[Arc<MetaType>]) -> Self {
        Self {
            name: name.into(),
            description: None,
            of_types: of_types.to_vec(),
        }
    }

    /// Sets the `description` of this [`UnionMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the object type with the given name is a member of
    /// this union.
    pub fn is_possible_type(&self, type_name: &str) -> bool {
        self.of_types.iter().any(|t| t.name().as_str() == type_name)
    }

    /// Wraps this [`UnionMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

impl ScalarMeta {
    /// Builds a new [`ScalarMeta`] type with the specified `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the `description` of this [`ScalarMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`ScalarMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

impl ObjectMeta {
    /// Build a new [`ObjectMeta`] type with the specified `name` and `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: Fields<Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
            interfaces: vec![],
        }
    }

    /// Sets the `description` of this [`ObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the `interfaces` this [`ObjectMeta`] type implements.
    ///
    /// Overwrites any previously set list of interfaces.
    #[must_use]
    pub fn interfaces(mut self, interfaces: &[Arc<MetaType>]) -> Self {
        self.interfaces = interfaces.to_vec();
        self
    }

    /// Wraps this [`ObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Object(self)
    }
}

impl EnumMeta {
    /// Build a new [`EnumMeta`] type with the specified `name` and possible
    /// `values`.
    pub fn new(name: impl Into<ArcStr>, values: &[EnumValue]) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: values.to_vec(),
        }
    }

    /// Sets the `description` of this [`EnumMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`EnumMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

impl InterfaceMeta {
    /// Builds a new [`InterfaceMeta`] type with the specified `name` and
    /// `fields`.
    pub fn new(name: impl Into<ArcStr>, fields: Fields<Field>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
            interfaces: Vec::new(),
        }
    }

    /// Sets the `description` of this [`InterfaceMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the `interfaces` this [`InterfaceMeta`] interface implements.
    ///
    /// Overwrites any previously set list of interfaces.
    #[must_use]
    pub fn interfaces(mut self, interfaces: &[Arc<MetaType>]) -> Self {
        self.interfaces = interfaces.to_vec();
        self
    }

    /// Wraps this [`InterfaceMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Interface(self)
    }
}

impl InputObjectMeta {
    /// Builds a new [`InputObjectMeta`] type with the specified `name` and
    /// `input_fields`.
    pub fn new(name: impl Into<ArcStr>, input_fields: Fields<Argument>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields,
        }
    }

    /// Set the `description` of this [`InputObjectMeta`] type.
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this [`InputObjectMeta`] type into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::InputObject(self)
    }
}

impl Field {
    /// Builds a new [`Field`] of the given [`TypeType`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, field_type: impl Into<TypeType>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            field_type: field_type.into(),
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Set the `description` of this [`Field`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an `argument` to this [`Field`].
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets this [`Field`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }
}

impl Argument {
    /// Builds a new [`Argument`] of the given [`TypeType`] with the given `name`.
    pub fn new(name: impl Into<ArcStr>, arg_type: impl Into<TypeType>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type: arg_type.into(),
        }
    }

    /// Sets the `description` of this [`Argument`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl EnumValue {
    /// Constructs a new [`EnumValue`] with the provided `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }

    /// Sets the `description` of this [`EnumValue`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets this [`EnumValue`] as deprecated with an optional `reason`.
    ///
    /// Overwrites any previously set deprecation reason.
    #[must_use]
    pub fn deprecated(mut self, reason: Option<ArcStr>) -> Self {
        self.deprecation_status = DeprecationStatus::Deprecated(reason);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use crate::types::{base::TypeKind, scalars};

    use super::{Field, Fields, InterfaceMeta, ObjectMeta, UnionMeta};

    #[test]
    fn lazy_fields_are_evaluated_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fields = Fields::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![Field::new("id", scalars::id())]
        });

        assert!(!fields.is_evaluated());
        assert_eq!(fields.get().len(), 1);
        assert_eq!(fields.get().len(), 1);
        assert!(fields.is_evaluated());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn object_declares_interfaces() {
        let node = Arc::new(
            InterfaceMeta::new("Node", Fields::new(vec![Field::new("id", scalars::id())]))
                .into_meta(),
        );
        let user = ObjectMeta::new("User", Fields::default())
            .interfaces(&[node.clone()])
            .into_meta();

        assert_eq!(user.type_kind(), TypeKind::Object);
        assert!(user.implements_interface("Node"));
        assert!(!user.implements_interface("Entity"));
        assert!(node.is_abstract());
        assert!(node.field_by_name("id").is_some());
        assert!(user.field_by_name("id").is_none());
    }

    #[test]
    fn union_membership_is_by_name() {
        let a = Arc::new(ObjectMeta::new("A", Fields::default()).into_meta());
        let b = Arc::new(ObjectMeta::new("B", Fields::default()).into_meta());
        let union = UnionMeta::new("AOrB", &[a, b]);

        assert!(union.is_possible_type("A"));
        assert!(union.is_possible_type("B"));
        assert!(!union.is_possible_type("C"));
    }
}
