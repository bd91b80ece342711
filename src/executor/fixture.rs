//! Fixture capability interface
//!
//! A fixture class is registered by name with a [`Fixture`] implementation
//! (construction and teardown) plus any number of named [`Method`]s.

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Opaque object produced by a fixture constructor
pub type Handle = Box<dyn Any>;

/// Outcome of a fixture method. `Ok` text is returned verbatim to the client.
pub type MethodResult = std::result::Result<String, FixtureError>;

/// Callable registered under a method name
pub type Method = Box<dyn Fn(&mut dyn Any, &[String]) -> MethodResult>;

/// Constructor refusal, optionally explaining why
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("constructor failed: {}", .note.as_deref().unwrap_or("no reason given"))]
pub struct ConstructError {
    pub note: Option<String>,
}

impl ConstructError {
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
        }
    }
}

/// Exception raised by fixture code, reported as `<message>.`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct FixtureError(pub String);

impl FixtureError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Construction and teardown for one fixture class
pub trait Fixture {
    /// Build a new instance from the (already substituted) constructor args
    fn construct(&self, args: &[String]) -> Result<Handle, ConstructError>;

    /// Release an instance at session end
    fn teardown(&self, handle: Handle) {
        drop(handle);
    }
}

/// Fixture implied by registering a method on an unknown class.
/// It can never be constructed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFixture;

impl Fixture for NullFixture {
    fn construct(&self, _args: &[String]) -> Result<Handle, ConstructError> {
        Err(ConstructError::default())
    }

    fn teardown(&self, _handle: Handle) {}
}

/// Any `Fn(&[String]) -> Result<Handle, ConstructError>` is a fixture whose
/// teardown simply drops the handle
impl<F> Fixture for F
where
    F: Fn(&[String]) -> Result<Handle, ConstructError>,
{
    fn construct(&self, args: &[String]) -> Result<Handle, ConstructError> {
        self(args)
    }
}

/// Wrap a method written against the concrete instance type `T`
pub fn method<T, F>(f: F) -> Method
where
    T: 'static,
    F: Fn(&mut T, &[String]) -> MethodResult + 'static,
{
    Box::new(move |handle: &mut dyn Any, args: &[String]| match handle.downcast_mut::<T>() {
        Some(instance) => f(instance, args),
        None => Err(FixtureError::new(format!(
            "Instance is not a {}",
            std::any::type_name::<T>()
        ))),
    })
}

/// Registered class: its capabilities and accumulated method table
pub struct FixtureEntry {
    pub(crate) fixture: Box<dyn Fixture>,
    /// Registration order. Never pruned; lookups take the newest match.
    methods: Vec<(String, Method)>,
}

impl FixtureEntry {
    fn new(fixture: Box<dyn Fixture>) -> Self {
        Self {
            fixture,
            methods: Vec::new(),
        }
    }

    /// Most recently registered method with this name
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .rev()
            .find(|(method_name, _)| method_name == name)
            .map(|(_, method)| method)
    }

    /// Distinct method names, oldest registration first
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (name, _) in &self.methods {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}

impl fmt::Debug for FixtureEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureEntry")
            .field("methods", &self.method_names())
            .finish_non_exhaustive()
    }
}

/// Fixture classes by name, in registration order
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    entries: Vec<(String, FixtureEntry)>,
}

impl FixtureRegistry {
    /// Create the class if new, otherwise swap its capabilities.
    /// Methods registered earlier are kept either way.
    pub fn register(&mut self, class_name: &str, fixture: Box<dyn Fixture>) {
        match self.find_mut(class_name) {
            Some(entry) => entry.fixture = fixture,
            None => self
                .entries
                .push((class_name.to_string(), FixtureEntry::new(fixture))),
        }
    }

    /// Add a method, creating a [`NullFixture`] class if needed
    pub fn register_method(&mut self, class_name: &str, method_name: &str, method: Method) {
        if self.find(class_name).is_none() {
            self.register(class_name, Box::new(NullFixture));
        }
        if let Some(entry) = self.find_mut(class_name) {
            entry.methods.push((method_name.to_string(), method));
        }
    }

    pub fn find(&self, class_name: &str) -> Option<&FixtureEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, entry)| entry)
    }

    fn find_mut(&mut self, class_name: &str) -> Option<&mut FixtureEntry> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == class_name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FixtureEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Live object created by `make`
pub struct InstanceEntry {
    pub name: String,
    /// Owning fixture class, looked up again at call and teardown time
    pub class_name: String,
    pub(crate) handle: Handle,
}

impl fmt::Debug for InstanceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceEntry")
            .field("name", &self.name)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Instances in registration order.
///
/// A repeated name shadows the earlier instance instead of replacing it; the
/// shadowed one stays alive until session teardown.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    entries: Vec<InstanceEntry>,
}

impl InstanceRegistry {
    pub fn register(&mut self, name: &str, class_name: &str, handle: Handle) {
        if self.find(name).is_some() {
            tracing::debug!(instance = name, "Instance name shadows an existing instance");
        }
        self.entries.push(InstanceEntry {
            name: name.to_string(),
            class_name: class_name.to_string(),
            handle,
        });
    }

    /// Newest instance with this name
    pub fn find(&self, name: &str) -> Option<&InstanceEntry> {
        self.entries.iter().rev().find(|entry| entry.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut InstanceEntry> {
        self.entries.iter_mut().rev().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every instance, newest first
    pub(crate) fn drain_newest_first(&mut self) -> impl Iterator<Item = InstanceEntry> + '_ {
        self.entries.drain(..).rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(tag: &'static str) -> Method {
        Box::new(move |_: &mut dyn Any, _: &[String]| -> MethodResult { Ok(tag.to_string()) })
    }

    #[test]
    fn test_register_method_creates_null_fixture() {
        let mut registry = FixtureRegistry::default();
        registry.register_method("Implicit", "m", echo("m"));

        let entry = registry.find("Implicit").unwrap();
        assert!(entry.fixture.construct(&[]).is_err());
        assert!(entry.method("m").is_some());
    }

    #[test]
    fn test_newest_method_wins() {
        let mut registry = FixtureRegistry::default();
        registry.register_method("F", "m", echo("first"));
        registry.register_method("F", "m", echo("second"));

        let entry = registry.find("F").unwrap();
        let mut unit = ();
        assert_eq!(entry.method("m").unwrap()(&mut unit, &[]).unwrap(), "second");
        assert_eq!(entry.method_names(), vec!["m"]);
    }

    #[test]
    fn test_reregistering_fixture_keeps_methods() {
        let mut registry = FixtureRegistry::default();
        registry.register_method("F", "m", echo("m"));
        let ctor = |_: &[String]| -> Result<Handle, ConstructError> { Ok(Box::new(1u8)) };
        registry.register("F", Box::new(ctor));

        let entry = registry.find("F").unwrap();
        assert!(entry.fixture.construct(&[]).is_ok());
        assert!(entry.method("m").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_instances_shadow_by_name() {
        let mut instances = InstanceRegistry::default();
        instances.register("x", "A", Box::new(1u32));
        instances.register("x", "B", Box::new(2u32));

        assert_eq!(instances.find("x").unwrap().class_name, "B");
        assert_eq!(instances.len(), 2);

        let order: Vec<String> = instances.drain_newest_first().map(|e| e.class_name).collect();
        assert_eq!(order, vec!["B", "A"]);
        assert!(instances.is_empty());
    }

    #[test]
    fn test_typed_method_rejects_wrong_instance() {
        let m = method(|value: &mut u32, _args: &[String]| Ok(value.to_string()));
        let mut right = 7u32;
        let mut wrong = "nope";
        assert_eq!(m(&mut right, &[]).unwrap(), "7");
        assert!(m(&mut wrong, &[]).is_err());
    }
}
