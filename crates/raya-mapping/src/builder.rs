//! Fluent descriptor assembly
//!
//! ```ignore
//! let descriptor = ConstructorDescriptor::<Point>::builder()
//!     .args(["x", "y"])
//!     .new_instance_function(|args| {
//!         Ok::<_, ValueError>(Point::new(args.get(0)?, args.get(1)?))
//!     });
//! ```
//!
//! The builder does not check that the accumulated names fit the chosen
//! finalizer: `no_args` with names only logs a warning, and a functional
//! strategy checks arity when it is called.

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::MappingConfig;
use crate::constructor::PreferredConstructor;
use crate::descriptor::ConstructorDescriptor;
use crate::error::BoxError;
use crate::strategy::{FunctionalInstantiator, InstantiationStrategy, NoArgsInstantiator};
use crate::value::Arguments;

/// Accumulates parameter names, then finalizes into a [`ConstructorDescriptor`].
///
/// Not meant to be shared between threads while accumulating; finalizers
/// consume the builder.
#[must_use = "a builder does nothing until finalized with `no_args` or `new_instance_function`"]
pub struct DescriptorBuilder<T> {
    parameter_names: Vec<String>,
    base: Option<Arc<dyn PreferredConstructor>>,
    config: MappingConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DescriptorBuilder<T> {
    /// Create an empty builder with the default configuration
    pub fn new() -> Self {
        Self {
            parameter_names: Vec::new(),
            base: None,
            config: MappingConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Use a specific configuration
    #[must_use]
    pub fn with_config(mut self, config: MappingConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the base constructor rule consulted for unlisted attributes
    #[must_use]
    pub fn base(mut self, base: impl PreferredConstructor + 'static) -> Self {
        self.base = Some(Arc::new(base));
        self
    }

    /// Append one parameter name
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.parameter_names.push(name.into());
        self
    }

    /// Append parameter names in order.
    ///
    /// Duplicates are kept as given.
    #[must_use]
    pub fn args<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Names accumulated so far
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Finalize with an infallible zero-argument supplier
    pub fn no_args<F>(self, supplier: F) -> ConstructorDescriptor<T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.try_no_args(move || Ok::<_, std::convert::Infallible>(supplier()))
    }

    /// Finalize with a fallible zero-argument supplier
    pub fn try_no_args<F, E>(self, supplier: F) -> ConstructorDescriptor<T>
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        if self.config.warn_on_unused_parameters && !self.parameter_names.is_empty() {
            warn!(
                target_type = type_name::<T>(),
                parameters = ?self.parameter_names,
                "no-args descriptor built with constructor parameters"
            );
        }
        let parameter_names: Arc<[String]> = self.parameter_names.into();
        let strategy = InstantiationStrategy::NoArgs(
            NoArgsInstantiator::new(supplier).with_parameter_names(Arc::clone(&parameter_names)),
        );
        Self::finish(parameter_names, strategy, self.base)
    }

    /// Finalize with a factory fed the ordered argument array
    pub fn new_instance_function<F, E>(self, factory: F) -> ConstructorDescriptor<T>
    where
        F: Fn(&Arguments<'_>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let functional = FunctionalInstantiator::new(self.parameter_names, factory)
            .with_arity(self.config.arity);
        let parameter_names = functional.shared_parameter_names();
        Self::finish(
            parameter_names,
            InstantiationStrategy::Functional(functional),
            self.base,
        )
    }

    fn finish(
        parameter_names: Arc<[String]>,
        strategy: InstantiationStrategy<T>,
        base: Option<Arc<dyn PreferredConstructor>>,
    ) -> ConstructorDescriptor<T> {
        debug!(
            target_type = type_name::<T>(),
            parameters = ?parameter_names,
            strategy = strategy.kind(),
            "built constructor descriptor"
        );
        let descriptor = ConstructorDescriptor::new(parameter_names, Some(strategy));
        match base {
            Some(base) => descriptor.with_base(base),
            None => descriptor,
        }
    }
}

impl<T> Default for DescriptorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArityPolicy;
    use crate::constructor::DeclaredConstructor;
    use crate::error::{InstantiationError, ValueError};
    use crate::value::Value;

    #[test]
    fn test_args_append_in_order() {
        let builder = DescriptorBuilder::<()>::new().args(["x", "y"]).args(["z"]);
        assert_eq!(builder.parameter_names(), ["x", "y", "z"]);

        let descriptor = builder.no_args(|| ());
        assert_eq!(descriptor.parameter_names(), ["x", "y", "z"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let descriptor = DescriptorBuilder::<()>::new()
            .arg("a")
            .args(["a", "b"])
            .no_args(|| ());
        assert_eq!(descriptor.parameter_names(), ["a", "a", "b"]);
    }

    #[test]
    fn test_no_args_keeps_accumulated_names() {
        let descriptor = DescriptorBuilder::<i64>::new()
            .with_config(MappingConfig {
                warn_on_unused_parameters: false,
                ..MappingConfig::default()
            })
            .args(["unused"])
            .no_args(|| 3);

        assert!(descriptor.has_parameters());
        let strategy = descriptor.instantiation_strategy().unwrap();
        assert_eq!(strategy.kind(), "no-args");
        assert_eq!(strategy.instantiate(&[]).unwrap(), 3);
    }

    #[test]
    fn test_new_instance_function_shares_names_with_strategy() {
        let descriptor = DescriptorBuilder::<i64>::new()
            .args(["a", "b"])
            .new_instance_function(|args| {
                Ok::<_, ValueError>(args.get::<i64>(0)? + args.get::<i64>(1)?)
            });

        let strategy = descriptor.instantiation_strategy().unwrap();
        assert_eq!(strategy.parameter_names(), descriptor.parameter_names());
        assert_eq!(strategy.instantiate(&[Value::int(1), Value::int(2)]).unwrap(), 3);
    }

    #[test]
    fn test_config_arity_policy_reaches_strategy() {
        let strict = DescriptorBuilder::<usize>::new()
            .args(["a", "b"])
            .new_instance_function(|args| Ok::<_, ValueError>(args.len()));
        assert!(matches!(
            strict.instantiation_strategy().unwrap().instantiate(&[Value::Null]),
            Err(InstantiationError::ArityMismatch { .. })
        ));

        let lenient = DescriptorBuilder::<usize>::new()
            .with_config(MappingConfig {
                arity: ArityPolicy::Lenient,
                ..MappingConfig::default()
            })
            .args(["a", "b"])
            .new_instance_function(|args| Ok::<_, ValueError>(args.len()));
        assert_eq!(
            lenient
                .instantiation_strategy()
                .unwrap()
                .instantiate(&[Value::Null])
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_base_rule_is_installed() {
        let descriptor = DescriptorBuilder::<()>::new()
            .base(DeclaredConstructor::with_names(["id"]))
            .args(["name"])
            .no_args(|| ());

        assert!(descriptor.is_constructor_parameter("name"));
        assert!(descriptor.is_constructor_parameter("id"));
        assert!(!descriptor.is_constructor_parameter("email"));
    }

    #[test]
    fn test_try_no_args_failure() {
        let descriptor =
            DescriptorBuilder::<String>::new().try_no_args(|| Err::<String, _>("no default"));

        let err = descriptor
            .instantiation_strategy()
            .unwrap()
            .instantiate(&[])
            .unwrap_err();
        assert!(matches!(err, InstantiationError::InstantiationFailure { .. }));
        assert!(err.to_string().contains("no default"));
    }

    #[test]
    fn test_try_no_args_failure_carries_accumulated_names() {
        let descriptor = DescriptorBuilder::<String>::new()
            .args(["x", "y"])
            .try_no_args(|| Err::<String, _>("boom"));

        let err = descriptor
            .instantiation_strategy()
            .unwrap()
            .instantiate(&[])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"x\""));
        assert!(message.contains("\"y\""));
        assert!(message.contains("boom"));
    }
}
