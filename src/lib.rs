#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod introspection;
pub(crate) mod schema;
mod types;

#[cfg(test)]
mod tests;

pub use crate::{
    schema::{
        config::{ConfigError, SchemaConfig, SchemaConfigBuilder},
        descriptor::{DESCRIPTOR_VERSION, Descriptor, DescriptorError},
        extract::{ReachableTypes, TypeGraphExtractor, TypeMap},
        loader::TypeLoader,
        meta,
        model::{
            DirectiveLocation, DirectiveType, OperationType, ResolveError, Schema, TypeOrName,
            TypeType, default_directives,
        },
    },
    types::{
        base::TypeKind,
        name::{Name, NameParseError},
        scalars,
    },
};
