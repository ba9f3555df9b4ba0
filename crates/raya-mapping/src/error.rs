//! Error types for descriptor-driven instantiation

/// Boxed error returned by user-supplied factories
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for instantiation calls
pub type InstantiationResult<T> = Result<T, InstantiationError>;

/// Errors raised while materializing an instance from a descriptor
#[derive(Debug, thiserror::Error)]
pub enum InstantiationError {
    /// Argument array length does not match the recorded parameter names.
    ///
    /// This is an integration bug in the caller, not a data problem.
    #[error("Arity mismatch for {type_name}: expected {expected} argument(s) {parameters:?}, got {got}")]
    ArityMismatch {
        /// Target type name
        type_name: &'static str,
        /// Number of declared parameters
        expected: usize,
        /// Number of supplied arguments
        got: usize,
        /// Declared parameter names
        parameters: Vec<String>,
    },

    /// The wrapped factory failed to produce an instance
    #[error("Failed to instantiate {type_name} with parameters {parameters:?}: {source}")]
    InstantiationFailure {
        /// Target type name
        type_name: &'static str,
        /// Declared parameter names
        parameters: Vec<String>,
        /// Error raised by the factory
        #[source]
        source: BoxError,
    },

    /// No descriptor registered for the requested type
    #[error("No constructor descriptor registered for {type_name}")]
    NotRegistered {
        /// Requested type name
        type_name: &'static str,
    },
}

impl InstantiationError {
    /// Target type name carried by the error
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ArityMismatch { type_name, .. }
            | Self::InstantiationFailure { type_name, .. }
            | Self::NotRegistered { type_name } => *type_name,
        }
    }
}

/// Errors raised when reading typed values out of an argument array
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: &'static str,
        /// Actual type name
        got: &'static str,
    },

    /// Numeric value does not fit the requested type
    #[error("Value {value} out of range for {expected}")]
    OutOfRange {
        /// Requested type name
        expected: &'static str,
        /// Offending value
        value: i64,
    },

    /// Positional argument not present
    #[error("Missing argument at index {index} (have {len})")]
    MissingArgument {
        /// Requested index
        index: usize,
        /// Number of supplied arguments
        len: usize,
    },

    /// Name is not one of the declared constructor parameters
    #[error("Unknown constructor parameter: {0}")]
    UnknownParameter(String),
}

/// Errors raised while loading a mapping configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read mapping config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse mapping config: {0}")]
    Parse(#[from] toml::de::Error),
}
