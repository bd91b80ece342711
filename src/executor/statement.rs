//! Statement executor - one Slim session
//!
//! Owns the fixture classes, the live instances and the symbol table.
//! Every instance is torn down exactly once, when the executor is dropped.
//! A panic in fixture code fails only the statement that triggered it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::common::config::ExecutorConfig;

use super::exception::Exception;
use super::fixture::{
    ConstructError, Fixture, FixtureEntry, FixtureRegistry, InstanceRegistry, Method,
};
use super::symbols::SymbolTable;

/// Session state for executing `make` and `call` statements
#[derive(Debug, Default)]
pub struct StatementExecutor {
    fixtures: FixtureRegistry,
    instances: InstanceRegistry,
    symbols: SymbolTable,
}

impl StatementExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ExecutorConfig) -> Self {
        Self {
            fixtures: FixtureRegistry::default(),
            instances: InstanceRegistry::default(),
            symbols: SymbolTable::new(config.substitution_limit),
        }
    }

    // === Bootstrap ===

    /// Register (or re-register) a fixture class
    pub fn register_fixture(&mut self, class_name: &str, fixture: impl Fixture + 'static) {
        tracing::debug!(class = class_name, "Registering fixture");
        self.fixtures.register(class_name, Box::new(fixture));
    }

    /// Register a method on a class, creating an unconstructable class if unknown
    pub fn register_method(&mut self, class_name: &str, method_name: &str, method: Method) {
        tracing::trace!(class = class_name, method = method_name, "Registering method");
        self.fixtures.register_method(class_name, method_name, method);
    }

    // === Lookups ===

    pub fn find_fixture(&self, class_name: &str) -> Option<&FixtureEntry> {
        self.fixtures.find(class_name)
    }

    /// Handle of the newest instance with this name
    pub fn instance(&self, instance_name: &str) -> Option<&dyn Any> {
        self.instances
            .find(instance_name)
            .map(|entry| &*entry.handle)
    }

    /// Registered classes, in registration order
    pub fn fixtures(&self) -> impl Iterator<Item = (&str, &FixtureEntry)> {
        self.fixtures.iter()
    }

    /// Number of live instances, shadowed ones included
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn set_symbol(&mut self, name: &str, value: &str) {
        self.symbols.bind(name, value);
    }

    // === Statements ===

    /// Construct `class_name` and register the result as `instance_name`
    pub fn make(
        &mut self,
        instance_name: &str,
        class_name: &str,
        args: &mut [String],
    ) -> Result<(), Exception> {
        let entry = self
            .fixtures
            .find(class_name)
            .ok_or_else(|| Exception::NoSuchClass(class_name.to_string()))?;

        self.symbols.substitute_list(args);

        let constructed = panic::catch_unwind(AssertUnwindSafe(|| entry.fixture.construct(args)))
            .unwrap_or_else(|payload| {
                let message = panic_message(&*payload);
                tracing::warn!(class = class_name, panic = %message, "Constructor panicked");
                Err(ConstructError::new(message))
            });

        match constructed {
            Ok(handle) => {
                tracing::debug!(instance = instance_name, class = class_name, "Instance created");
                self.instances.register(instance_name, class_name, handle);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(class = class_name, error = %e, "Constructor failed");
                Err(Exception::constructor_failed(class_name, e.note.as_deref()))
            }
        }
    }

    /// Invoke `method_name` on the newest instance named `instance_name`
    pub fn call(
        &mut self,
        instance_name: &str,
        method_name: &str,
        args: &mut [String],
    ) -> Result<String, Exception> {
        let instance = self
            .instances
            .find_mut(instance_name)
            .ok_or_else(|| Exception::NoSuchInstance(instance_name.to_string()))?;

        // Fixtures are never removed, so the owning class is always present
        let method = self
            .fixtures
            .find(&instance.class_name)
            .and_then(|entry| entry.method(method_name))
            .ok_or_else(|| {
                Exception::no_such_method(method_name, args.len(), &instance.class_name)
            })?;

        self.symbols.substitute_list(args);

        match panic::catch_unwind(AssertUnwindSafe(|| method(&mut *instance.handle, args))) {
            Ok(result) => result.map_err(|e| Exception::Fixture(e.0)),
            Err(payload) => {
                let message = panic_message(&*payload);
                tracing::warn!(
                    instance = instance_name,
                    method = method_name,
                    panic = %message,
                    "Method panicked"
                );
                Err(Exception::Fixture(message))
            }
        }
    }

    /// Tear down every instance, newest first. Also runs on drop.
    pub fn end_session(&mut self) {
        if !self.instances.is_empty() {
            tracing::debug!(count = self.instances.len(), "Tearing down instances");
        }
        for instance in self.instances.drain_newest_first() {
            match self.fixtures.find(&instance.class_name) {
                Some(entry) => entry.fixture.teardown(instance.handle),
                None => drop(instance.handle),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "fixture panicked".to_string()
    }
}

impl Drop for StatementExecutor {
    fn drop(&mut self) {
        self.end_session();
    }
}
