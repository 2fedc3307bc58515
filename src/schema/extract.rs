//! Discovery of every type reachable from a set of root types.

use std::sync::Arc;

use arcstr::ArcStr;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;

use crate::schema::meta::{
    Argument, InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta, UnionMeta,
};

/// Types of a schema keyed by their names, in the order they were
/// discovered.
pub type TypeMap = IndexMap<ArcStr, Arc<MetaType>, FnvBuildHasher>;

/// Capability of discovering the whole type graph of a schema.
///
/// Implementations must terminate and be deterministic for the same seed
/// types, and must return every type transitively reachable from the seeds.
/// They run while the schema holds its state lock, so they must not call
/// back into the [`Schema`](crate::Schema).
pub trait TypeGraphExtractor: Send + Sync {
    /// Returns every type reachable from the `seeds`, keyed by name.
    fn extract(&self, seeds: &[Arc<MetaType>]) -> TypeMap;
}

/// Default [`TypeGraphExtractor`] walking the type graph depth first.
///
/// Follows implemented interfaces, union members, field and argument types,
/// and input fields. The first type met under a name wins: types are
/// identified by their names only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReachableTypes;

impl TypeGraphExtractor for ReachableTypes {
    fn extract(&self, seeds: &[Arc<MetaType>]) -> TypeMap {
        let mut types = TypeMap::default();
        let mut stack = seeds.iter().rev().cloned().collect::<Vec<_>>();

        while let Some(t) = stack.pop() {
            if types.contains_key(t.name()) {
                continue;
            }
            let mut referenced = referenced_types(&t);
            types.insert(t.name().clone(), t);

            referenced.reverse();
            stack.append(&mut referenced);
        }

        types
    }
}

impl<F> TypeGraphExtractor for F
where
    F: Fn(&[Arc<MetaType>]) -> TypeMap + Send + Sync,
{
    fn extract(&self, seeds: &[Arc<MetaType>]) -> TypeMap {
        self(seeds)
    }
}

/// Types the definition of `t` refers to directly, in declaration order.
fn referenced_types(t: &MetaType) -> Vec<Arc<MetaType>> {
    let of_args = |args: &[Argument]| {
        args.iter()
            .map(|a| a.arg_type.innermost_concrete().clone())
            .collect::<Vec<_>>()
    };

    match t {
        MetaType::Object(ObjectMeta {
            interfaces, fields, ..
        })
        | MetaType::Interface(InterfaceMeta {
            interfaces, fields, ..
        }) => {
            let mut referenced = interfaces.clone();
            for field in fields.get() {
                referenced.push(field.field_type.innermost_concrete().clone());
                referenced.extend(of_args(&field.arguments));
            }
            referenced
        }
        MetaType::Union(UnionMeta { of_types, .. }) => of_types.clone(),
        MetaType::InputObject(InputObjectMeta { input_fields, .. }) => of_args(input_fields.get()),
        MetaType::Scalar(_) | MetaType::Enum(_) => Vec::new(),
    }
}
