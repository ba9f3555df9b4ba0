//! Raya Mapping - object-instantiation descriptors
//!
//! This crate provides the metadata a mapping engine needs to construct
//! instances of a mapped type without runtime introspection. A
//! [`ConstructorDescriptor`] answers two questions:
//!
//! - is a given attribute supplied through the constructor, or set after
//!   construction?
//! - given the ordered constructor arguments, what is the new instance?
//!
//! # Example
//!
//! ```ignore
//! use raya_mapping::{ConstructorDescriptor, Value, ValueError};
//!
//! struct Point { x: i64, y: i64 }
//!
//! let descriptor = ConstructorDescriptor::<Point>::builder()
//!     .args(["x", "y"])
//!     .new_instance_function(|args| {
//!         Ok::<_, ValueError>(Point { x: args.get(0)?, y: args.get(1)? })
//!     });
//!
//! assert!(descriptor.is_constructor_parameter("x"));
//! let strategy = descriptor.instantiation_strategy().unwrap();
//! let point = strategy.instantiate(&[Value::int(3), Value::int(4)])?;
//! ```
//!
//! # Thread Safety
//!
//! Descriptors and strategies are immutable once built and are `Send + Sync`.
//! Builders are single-owner and consumed on finalization.

#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod constructor;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod strategy;
pub mod value;

pub use builder::DescriptorBuilder;
pub use config::{ArityPolicy, MappingConfig};
pub use constructor::{
    ConstructorParameter, DeclaredConstructor, NoArgsConstructor, PersistentProperty,
    PreferredConstructor, Property,
};
pub use descriptor::ConstructorDescriptor;
pub use error::{BoxError, ConfigError, InstantiationError, InstantiationResult, ValueError};
pub use registry::DescriptorRegistry;
pub use strategy::{
    FactoryFn, FunctionalInstantiator, InstantiationStrategy, NoArgsInstantiator, SupplierFn,
};
pub use value::{Arguments, Bytes, FromValue, IntoValue, Value};
