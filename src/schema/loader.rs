//! On-demand loading of types by name.

use std::sync::Arc;

use crate::schema::{extract::TypeMap, meta::MetaType};

/// Capability of providing a single type of a schema by its name.
///
/// Lets a [`Schema`](crate::Schema) materialize only the types actually
/// requested instead of walking the whole type graph. A returned type must
/// carry the requested name, otherwise resolution fails with
/// [`ResolveError::NameMismatch`](crate::ResolveError::NameMismatch).
pub trait TypeLoader: Send + Sync {
    /// Returns the type with the given `name`, or `None` if there is no such
    /// type.
    fn load(&self, name: &str) -> Option<Arc<MetaType>>;
}

impl<F> TypeLoader for F
where
    F: Fn(&str) -> Option<Arc<MetaType>> + Send + Sync,
{
    fn load(&self, name: &str) -> Option<Arc<MetaType>> {
        self(name)
    }
}

impl TypeLoader for TypeMap {
    fn load(&self, name: &str) -> Option<Arc<MetaType>> {
        self.get(name).cloned()
    }
}
