//! Base constructor rules
//!
//! A descriptor answers "is this attribute a constructor parameter?" from its
//! own parameter list first and falls back to a [`PreferredConstructor`]
//! supplied by the surrounding framework. The fallback is held by
//! composition, not inheritance.

/// Attribute metadata as exposed by the property model.
///
/// Only the attribute name is read by this crate.
pub trait PersistentProperty {
    /// Attribute name
    fn name(&self) -> &str;
}

impl PersistentProperty for str {
    fn name(&self) -> &str {
        self
    }
}

impl PersistentProperty for String {
    fn name(&self) -> &str {
        self
    }
}

/// Minimal property value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
}

impl Property {
    /// Create a property with the given attribute name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PersistentProperty for Property {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Default constructor-parameter rule of the surrounding framework.
///
/// Consulted only when a descriptor's own parameter list does not claim
/// an attribute.
pub trait PreferredConstructor: Send + Sync {
    /// Whether `property_name` binds to one of this constructor's parameters
    fn is_constructor_parameter(&self, property_name: &str) -> bool;

    /// Number of parameters the constructor declares
    fn parameter_count(&self) -> usize;

    /// Whether the constructor declares any parameters
    fn has_parameters(&self) -> bool {
        self.parameter_count() > 0
    }
}

/// Base rule for a type with a zero-argument constructor.
///
/// Never claims an attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArgsConstructor;

impl PreferredConstructor for NoArgsConstructor {
    fn is_constructor_parameter(&self, _property_name: &str) -> bool {
        false
    }

    fn parameter_count(&self) -> usize {
        0
    }
}

/// A single declared constructor parameter.
///
/// The name may be unavailable (e.g. stripped metadata), in which case the
/// parameter never matches an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParameter {
    /// Parameter name, if known
    pub name: Option<String>,
}

impl ConstructorParameter {
    /// A named parameter
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// A parameter whose name is not known
    pub fn unnamed() -> Self {
        Self { name: None }
    }
}

/// Base rule backed by a declared constructor signature
#[derive(Debug, Clone, Default)]
pub struct DeclaredConstructor {
    parameters: Vec<ConstructorParameter>,
}

impl DeclaredConstructor {
    /// Create from parameters in declaration order
    pub fn new(parameters: Vec<ConstructorParameter>) -> Self {
        Self { parameters }
    }

    /// Create from named parameters in declaration order
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(ConstructorParameter::named).collect())
    }

    /// Declared parameters
    pub fn parameters(&self) -> &[ConstructorParameter] {
        &self.parameters
    }
}

impl PreferredConstructor for DeclaredConstructor {
    fn is_constructor_parameter(&self, property_name: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.name.as_deref() == Some(property_name))
    }

    fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_constructor_claims_nothing() {
        let base = NoArgsConstructor;
        assert!(!base.is_constructor_parameter("id"));
        assert!(!base.has_parameters());
    }

    #[test]
    fn test_declared_constructor_matches_named_parameters() {
        let base = DeclaredConstructor::new(vec![
            ConstructorParameter::named("id"),
            ConstructorParameter::unnamed(),
        ]);

        assert!(base.is_constructor_parameter("id"));
        assert!(!base.is_constructor_parameter("name"));
        assert!(!base.is_constructor_parameter(""));
        assert_eq!(base.parameter_count(), 2);
        assert!(base.has_parameters());
    }

    #[test]
    fn test_property_names() {
        assert_eq!(Property::new("x").name(), "x");
        assert_eq!("y".name(), "y");
        assert_eq!(String::from("z").name(), "z");
    }
}
