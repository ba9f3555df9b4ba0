//! Constructor descriptors
//!
//! A `ConstructorDescriptor` tells the mapping engine which attributes are
//! bound through the constructor and how to produce a new instance once the
//! constructor arguments have been resolved.
//!
//! Membership is a two-tier lookup: the descriptor's own parameter names are
//! checked first, then the base [`PreferredConstructor`] rule.

use std::fmt;
use std::sync::Arc;

use crate::builder::DescriptorBuilder;
use crate::constructor::{NoArgsConstructor, PersistentProperty, PreferredConstructor};
use crate::strategy::InstantiationStrategy;

/// Instantiation metadata for one mapped type.
///
/// Immutable once built. Clones share the same parameter list, strategy and
/// base rule.
pub struct ConstructorDescriptor<T> {
    parameter_names: Arc<[String]>,
    strategy: Option<InstantiationStrategy<T>>,
    base: Arc<dyn PreferredConstructor>,
}

impl<T> ConstructorDescriptor<T> {
    /// Create a descriptor from parameter names and an optional strategy.
    ///
    /// `None` means "no custom strategy": callers fall back to the
    /// framework's default instantiation path. The base rule is
    /// [`NoArgsConstructor`].
    pub fn new(
        parameter_names: impl Into<Arc<[String]>>,
        strategy: Option<InstantiationStrategy<T>>,
    ) -> Self {
        Self {
            parameter_names: parameter_names.into(),
            strategy,
            base: Arc::new(NoArgsConstructor),
        }
    }

    /// Replace the base constructor rule
    pub fn with_base(mut self, base: Arc<dyn PreferredConstructor>) -> Self {
        self.base = base;
        self
    }

    /// Start assembling a descriptor
    pub fn builder() -> DescriptorBuilder<T> {
        DescriptorBuilder::new()
    }

    /// Descriptor whose strategy calls `supplier`.
    ///
    /// Same as `ConstructorDescriptor::builder().no_args(supplier)`.
    pub fn no_args_constructor<F>(supplier: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::builder().no_args(supplier)
    }

    /// Whether `property` is supplied through the constructor.
    ///
    /// True if the name is in this descriptor's parameter list, otherwise the
    /// base rule decides.
    pub fn is_constructor_parameter<P>(&self, property: &P) -> bool
    where
        P: PersistentProperty + ?Sized,
    {
        let name = property.name();
        self.parameter_names.iter().any(|p| p == name) || self.base.is_constructor_parameter(name)
    }

    /// Constructor parameter names, in positional order
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Position of a parameter in the argument array
    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameter_names.iter().position(|p| p == name)
    }

    /// Whether the explicit parameter list is non-empty.
    ///
    /// The base rule's own parameters are not considered.
    pub fn has_parameters(&self) -> bool {
        !self.parameter_names.is_empty()
    }

    /// Associated strategy, if any
    pub fn instantiation_strategy(&self) -> Option<&InstantiationStrategy<T>> {
        self.strategy.as_ref()
    }

    /// The base constructor rule
    pub fn base(&self) -> &dyn PreferredConstructor {
        self.base.as_ref()
    }
}

impl<T> Clone for ConstructorDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            parameter_names: Arc::clone(&self.parameter_names),
            strategy: self.strategy.clone(),
            base: Arc::clone(&self.base),
        }
    }
}

impl<T> fmt::Debug for ConstructorDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("target", &std::any::type_name::<T>())
            .field("parameter_names", &self.parameter_names)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
