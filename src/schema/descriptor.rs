//! Serializable snapshot of schema-wide metadata.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use arcstr::ArcStr;
use chrono::{DateTime, Utc};
use derive_more::with_trait::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::schema::meta::{MetaType, ObjectMeta, UnionMeta};

/// Version tag of the [`Descriptor`] format produced by this crate.
pub const DESCRIPTOR_VERSION: &str = "1.0";

/// Precomputed metadata of a schema: names of all its types, and the object
/// types able to satisfy each of its interfaces and unions.
///
/// Building a [`Descriptor`] requires walking the whole type graph. Persist
/// it at build time and provide it to a
/// [`SchemaConfig`](crate::SchemaConfig) to let a running process skip that
/// walk, resolving types lazily instead.
///
/// Names are kept sorted, so the serialized form doesn't depend on the order
/// the types were discovered in.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    version: ArcStr,
    created: DateTime<Utc>,
    type_map: BTreeSet<ArcStr>,
    possible_type_map: BTreeMap<ArcStr, BTreeSet<ArcStr>>,
}

/// Error of a structurally malformed [`Descriptor`].
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum DescriptorError {
    /// The [`Descriptor`] was produced in an unknown format.
    #[display("unsupported descriptor version \"{_0}\"")]
    UnsupportedVersion(#[error(not(source))] ArcStr),

    /// Possible types are listed for a type the [`Descriptor`] doesn't know.
    #[display("possible types are listed for unknown type \"{_0}\"")]
    UnknownAbstractType(#[error(not(source))] ArcStr),

    /// A possible type isn't known by the [`Descriptor`].
    #[display("possible type \"{possible_type}\" of \"{abstract_type}\" is unknown")]
    UnknownPossibleType {
        /// Name of the abstract type listing the possible type.
        abstract_type: ArcStr,
        /// Name of the unknown possible type.
        possible_type: ArcStr,
    },
}

impl Descriptor {
    /// Builds a [`Descriptor`] out of every type of a schema.
    ///
    /// Every object type is recorded as a possible type of each interface it
    /// implements, and every union member as a possible type of its union.
    pub fn from_types<'t>(types: impl IntoIterator<Item = &'t Arc<MetaType>>) -> Self {
        let mut type_map = BTreeSet::new();
        let mut possible_type_map = BTreeMap::<ArcStr, BTreeSet<ArcStr>>::new();

        for t in types {
            match &**t {
                MetaType::Object(ObjectMeta {
                    name, interfaces, ..
                }) => {
                    for interface in interfaces {
                        possible_type_map
                            .entry(interface.name().clone())
                            .or_default()
                            .insert(name.clone());
                    }
                }
                MetaType::Union(UnionMeta { name, of_types, .. }) => {
                    possible_type_map
                        .entry(name.clone())
                        .or_default()
                        .extend(of_types.iter().map(|member| member.name().clone()));
                }
                _ => {}
            }
            type_map.insert(t.name().clone());
        }

        Self {
            version: DESCRIPTOR_VERSION.into(),
            created: Utc::now(),
            type_map,
            possible_type_map,
        }
    }

    /// Version tag of the format this [`Descriptor`] was produced in.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Moment this [`Descriptor`] was built at.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Names of all the types, sorted.
    pub fn type_names(&self) -> std::collections::btree_set::Iter<'_, ArcStr> {
        self.type_map.iter()
    }

    /// Names of the abstract types having at least one possible type,
    /// sorted.
    pub fn abstract_type_names(
        &self,
    ) -> std::collections::btree_map::Keys<'_, ArcStr, BTreeSet<ArcStr>> {
        self.possible_type_map.keys()
    }

    /// Checks whether a type with the given `name` is known.
    pub fn contains(&self, name: &str) -> bool {
        self.type_map.contains(name)
    }

    /// Names of the object types able to satisfy the abstract type with the
    /// given name, sorted. Empty if the type is unknown or has none.
    pub fn possible_types_of(&self, abstract_type: &str) -> impl Iterator<Item = &ArcStr> {
        self.possible_type_map
            .get(abstract_type)
            .into_iter()
            .flatten()
    }

    /// Checks whether `possible_type` is listed as able to satisfy
    /// `abstract_type`.
    pub fn is_possible_type(&self, abstract_type: &str, possible_type: &str) -> bool {
        self.possible_type_map
            .get(abstract_type)
            .is_some_and(|members| members.contains(possible_type))
    }

    /// Checks the structure of this [`Descriptor`]: its version, and that
    /// every name in its possible types index is a known type.
    ///
    /// # Errors
    ///
    /// On the first inconsistency found.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.version.as_str() != DESCRIPTOR_VERSION {
            return Err(DescriptorError::UnsupportedVersion(self.version.clone()));
        }
        for (abstract_type, members) in &self.possible_type_map {
            if !self.type_map.contains(abstract_type) {
                return Err(DescriptorError::UnknownAbstractType(abstract_type.clone()));
            }
            if let Some(unknown) = members.iter().find(|m| !self.type_map.contains(*m)) {
                return Err(DescriptorError::UnknownPossibleType {
                    abstract_type: abstract_type.clone(),
                    possible_type: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::schema::meta::{Fields, InterfaceMeta, MetaType, ObjectMeta, UnionMeta};

    use super::{DESCRIPTOR_VERSION, Descriptor, DescriptorError};

    fn types() -> Vec<Arc<MetaType>> {
        let named = Arc::new(InterfaceMeta::new("Named", Fields::default()).into_meta());
        let dog = Arc::new(
            ObjectMeta::new("Dog", Fields::default())
                .interfaces(&[named.clone()])
                .into_meta(),
        );
        let cat = Arc::new(
            ObjectMeta::new("Cat", Fields::default())
                .interfaces(&[named.clone()])
                .into_meta(),
        );
        let rock = Arc::new(ObjectMeta::new("Rock", Fields::default()).into_meta());
        let pet = Arc::new(UnionMeta::new("Pet", &[dog.clone(), cat.clone()]).into_meta());
        vec![dog, named, pet, rock, cat]
    }

    #[test]
    fn indexes_interfaces_and_unions() {
        let descriptor = Descriptor::from_types(&types());

        assert_eq!(descriptor.version(), DESCRIPTOR_VERSION);
        assert_eq!(
            descriptor.type_names().map(|n| n.as_str()).collect::<Vec<_>>(),
            ["Cat", "Dog", "Named", "Pet", "Rock"],
        );
        assert_eq!(
            descriptor
                .possible_types_of("Named")
                .map(|n| n.as_str())
                .collect::<Vec<_>>(),
            ["Cat", "Dog"],
        );
        assert_eq!(
            descriptor
                .possible_types_of("Pet")
                .map(|n| n.as_str())
                .collect::<Vec<_>>(),
            ["Cat", "Dog"],
        );
        assert_eq!(descriptor.possible_types_of("Rock").count(), 0);
        assert!(descriptor.is_possible_type("Named", "Dog"));
        assert!(!descriptor.is_possible_type("Named", "Rock"));
        assert!(descriptor.contains("Rock"));
        assert!(!descriptor.contains("Tree"));
    }

    #[test]
    fn built_descriptor_is_consistent() {
        let descriptor = Descriptor::from_types(&types());

        assert_eq!(descriptor.validate(), Ok(()));
        for abstract_type in descriptor.abstract_type_names() {
            assert!(descriptor.contains(abstract_type));
            for member in descriptor.possible_types_of(abstract_type) {
                assert!(descriptor.contains(member));
            }
        }
    }

    #[test]
    fn survives_persisting() {
        let descriptor = Descriptor::from_types(&types());

        let json = serde_json::to_string(&descriptor).unwrap();
        let restored: Descriptor = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, descriptor);
        assert!(json.contains("\"possibleTypeMap\""));
    }

    #[test]
    fn rejects_dangling_names() {
        let dangling: Descriptor = serde_json::from_value(serde_json::json!({
            "version": "1.0",
            "created": "2024-01-01T00:00:00Z",
            "typeMap": ["Query", "Node"],
            "possibleTypeMap": {"Node": ["User"]},
        }))
        .unwrap();
        assert_eq!(
            dangling.validate(),
            Err(DescriptorError::UnknownPossibleType {
                abstract_type: "Node".into(),
                possible_type: "User".into(),
            }),
        );

        let unknown_abstract: Descriptor = serde_json::from_value(serde_json::json!({
            "version": "1.0",
            "created": "2024-01-01T00:00:00Z",
            "typeMap": ["Query", "User"],
            "possibleTypeMap": {"Node": ["User"]},
        }))
        .unwrap();
        assert_eq!(
            unknown_abstract.validate(),
            Err(DescriptorError::UnknownAbstractType("Node".into())),
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let descriptor: Descriptor = serde_json::from_value(serde_json::json!({
            "version": "2.0",
            "created": "2024-01-01T00:00:00Z",
            "typeMap": [],
            "possibleTypeMap": {},
        }))
        .unwrap();

        assert_eq!(
            descriptor.validate(),
            Err(DescriptorError::UnsupportedVersion("2.0".into())),
        );
    }
}
