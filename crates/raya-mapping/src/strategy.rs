//! Instantiation strategies
//!
//! A strategy turns an ordered argument array into a new instance of `T`.
//! Strategies are pure dispatch wrappers around a factory captured at
//! build time; they are immutable and can be shared across threads.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ArityPolicy;
use crate::error::{BoxError, InstantiationError, InstantiationResult};
use crate::value::{Arguments, Value};

/// Zero-argument factory
pub type SupplierFn<T> = Arc<dyn Fn() -> Result<T, BoxError> + Send + Sync>;

/// Argument-array factory
pub type FactoryFn<T> = Arc<dyn Fn(&Arguments<'_>) -> Result<T, BoxError> + Send + Sync>;

// Pins the higher-ranked signature so the closure coerces to `FactoryFn`
fn erase_factory<T, F>(factory: F) -> FactoryFn<T>
where
    F: Fn(&Arguments<'_>) -> Result<T, BoxError> + Send + Sync + 'static,
{
    Arc::new(factory)
}

// ============================================================================
// NoArgs
// ============================================================================

/// Strategy that ignores its arguments and calls a supplier.
///
/// Parameter names recorded on the owning descriptor are kept for error
/// context only; they never drive an arity check.
pub struct NoArgsInstantiator<T> {
    supplier: SupplierFn<T>,
    parameter_names: Arc<[String]>,
}

impl<T> NoArgsInstantiator<T> {
    /// Wrap a fallible supplier
    pub fn new<F, E>(supplier: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            supplier: Arc::new(move || supplier().map_err(Into::<BoxError>::into)),
            parameter_names: Arc::from(Vec::new()),
        }
    }

    /// Attach the descriptor's parameter names for diagnostics
    pub fn with_parameter_names(mut self, parameter_names: impl Into<Arc<[String]>>) -> Self {
        self.parameter_names = parameter_names.into();
        self
    }

    /// Parameter names recorded for diagnostics
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Call the supplier
    pub fn instantiate(&self) -> InstantiationResult<T> {
        trace!(target_type = type_name::<T>(), "instantiating via supplier");
        (self.supplier)().map_err(|source| {
            debug!(target_type = type_name::<T>(), error = %source, "supplier failed");
            InstantiationError::InstantiationFailure {
                type_name: type_name::<T>(),
                parameters: self.parameter_names.to_vec(),
                source,
            }
        })
    }
}

impl<T> Clone for NoArgsInstantiator<T> {
    fn clone(&self) -> Self {
        Self {
            supplier: Arc::clone(&self.supplier),
            parameter_names: Arc::clone(&self.parameter_names),
        }
    }
}

// ============================================================================
// Functional
// ============================================================================

/// Strategy that feeds an ordered value array to a factory function.
///
/// The parameter names are carried for arity checks and diagnostics; the
/// factory itself is opaque.
pub struct FunctionalInstantiator<T> {
    parameter_names: Arc<[String]>,
    factory: FactoryFn<T>,
    arity: ArityPolicy,
}

impl<T> FunctionalInstantiator<T> {
    /// Wrap a fallible factory with the parameter names it expects
    pub fn new<F, E>(parameter_names: impl Into<Arc<[String]>>, factory: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            parameter_names: parameter_names.into(),
            factory: erase_factory(move |args| {
                factory(args).map_err(Into::<BoxError>::into)
            }),
            arity: ArityPolicy::default(),
        }
    }

    /// Set the arity policy
    pub fn with_arity(mut self, arity: ArityPolicy) -> Self {
        self.arity = arity;
        self
    }

    /// Parameter names, in positional order
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub(crate) fn shared_parameter_names(&self) -> Arc<[String]> {
        Arc::clone(&self.parameter_names)
    }

    /// Arity policy in effect
    pub fn arity(&self) -> ArityPolicy {
        self.arity
    }

    /// Invoke the factory with `args`.
    ///
    /// Under [`ArityPolicy::Strict`] a non-empty parameter list requires
    /// `args.len()` to match it exactly.
    pub fn instantiate(&self, args: &[Value]) -> InstantiationResult<T> {
        let expected = self.parameter_names.len();
        if self.arity == ArityPolicy::Strict && expected > 0 && args.len() != expected {
            debug!(
                target_type = type_name::<T>(),
                expected,
                got = args.len(),
                "argument count mismatch"
            );
            return Err(InstantiationError::ArityMismatch {
                type_name: type_name::<T>(),
                expected,
                got: args.len(),
                parameters: self.parameter_names.to_vec(),
            });
        }

        trace!(
            target_type = type_name::<T>(),
            args = args.len(),
            "instantiating via factory"
        );
        let arguments = Arguments::new(args, &self.parameter_names);
        (self.factory)(&arguments).map_err(|source| {
            debug!(target_type = type_name::<T>(), error = %source, "factory failed");
            InstantiationError::InstantiationFailure {
                type_name: type_name::<T>(),
                parameters: self.parameter_names.to_vec(),
                source,
            }
        })
    }
}

impl<T> Clone for FunctionalInstantiator<T> {
    fn clone(&self) -> Self {
        Self {
            parameter_names: Arc::clone(&self.parameter_names),
            factory: Arc::clone(&self.factory),
            arity: self.arity,
        }
    }
}

// ============================================================================
// InstantiationStrategy
// ============================================================================

/// How a descriptor produces instances of `T`
pub enum InstantiationStrategy<T> {
    /// Zero-argument supplier; supplied arguments are ignored
    NoArgs(NoArgsInstantiator<T>),
    /// Value-array driven factory
    Functional(FunctionalInstantiator<T>),
}

impl<T> InstantiationStrategy<T> {
    /// Strategy from an infallible supplier
    pub fn no_args<F>(supplier: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::NoArgs(NoArgsInstantiator::new(move || {
            Ok::<_, std::convert::Infallible>(supplier())
        }))
    }

    /// Strategy from a factory function
    pub fn functional<F, E>(parameter_names: impl Into<Arc<[String]>>, factory: F) -> Self
    where
        F: Fn(&Arguments<'_>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::Functional(FunctionalInstantiator::new(parameter_names, factory))
    }

    /// Produce a new instance from `args`
    pub fn instantiate(&self, args: &[Value]) -> InstantiationResult<T> {
        match self {
            Self::NoArgs(inner) => inner.instantiate(),
            Self::Functional(inner) => inner.instantiate(args),
        }
    }

    /// Parameter names the strategy expects (empty for `NoArgs`)
    pub fn parameter_names(&self) -> &[String] {
        match self {
            Self::NoArgs(_) => &[],
            Self::Functional(inner) => inner.parameter_names(),
        }
    }

    /// Short variant name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoArgs(_) => "no-args",
            Self::Functional(_) => "functional",
        }
    }
}

impl<T> Clone for InstantiationStrategy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::NoArgs(inner) => Self::NoArgs(inner.clone()),
            Self::Functional(inner) => Self::Functional(inner.clone()),
        }
    }
}

impl<T> fmt::Debug for InstantiationStrategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArgs(_) => f
                .debug_struct("NoArgs")
                .field("target", &type_name::<T>())
                .finish_non_exhaustive(),
            Self::Functional(inner) => f
                .debug_struct("Functional")
                .field("target", &type_name::<T>())
                .field("parameter_names", &inner.parameter_names())
                .field("arity", &inner.arity())
                .finish_non_exhaustive(),
        }
    }
}
