//! module addresses
//!
//! - [ModuleInstance]: a path of `(name, key)` steps identifying one concrete
//!   instance of a (possibly nested) module call
//! - [Module]: the same path with names only, as the module calls appear in
//!   static configuration
//!
//! Both are immutable values. Methods that "extend" an address return a new one.
use crate::error::{identifier, AddressError};
use crate::instance_key::InstanceKey;
use crate::resource::{AbsResource, AbsResourceInstance, ConfigResource, Resource, ResourceMode};
use hcl::Identifier;
use std::fmt::Formatter;

/// The root module instance
///
/// Contains every other address.
pub const ROOT_MODULE_INSTANCE: ModuleInstance = ModuleInstance(Vec::new());

/// One level of a [ModuleInstance] path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleInstanceStep {
    pub name: Identifier,
    pub key: InstanceKey,
}

impl ModuleInstanceStep {
    pub fn new(name: Identifier, key: impl Into<InstanceKey>) -> Self {
        Self {
            name,
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ModuleInstanceStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "module.{}{}", self.name.as_str(), self.key)
    }
}

/// A concrete module instance, keyed at every level
///
/// An empty path is the root module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ModuleInstance(Vec<ModuleInstanceStep>);

impl ModuleInstance {
    pub fn root() -> Self {
        ROOT_MODULE_INSTANCE
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[ModuleInstanceStep] {
        &self.0
    }

    /// Address of a module call instance nested in this one
    pub fn child(&self, name: Identifier, key: impl Into<InstanceKey>) -> Self {
        let mut steps = self.0.clone();
        steps.push(ModuleInstanceStep::new(name, key));
        Self(steps)
    }

    /// Address of the calling module instance, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let (_last, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    /// Drops all instance keys
    pub fn module(&self) -> Module {
        Module(self.0.iter().map(|step| step.name.clone()).collect())
    }

    /// All instances of a resource declared in this module instance
    pub fn resource(&self, mode: ResourceMode, type_: Identifier, name: Identifier) -> AbsResource {
        Resource::new(mode, type_, name).absolute(self.clone())
    }

    pub fn resource_instance(
        &self,
        mode: ResourceMode,
        type_: Identifier,
        name: Identifier,
        key: impl Into<InstanceKey>,
    ) -> AbsResourceInstance {
        self.resource(mode, type_, name).instance(key)
    }
}

impl From<Vec<ModuleInstanceStep>> for ModuleInstance {
    fn from(steps: Vec<ModuleInstanceStep>) -> Self {
        Self(steps)
    }
}

impl std::fmt::Display for ModuleInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, step) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A module call path as declared in configuration, names only
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Module(Vec<Identifier>);

impl Module {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a module path from unvalidated names
    pub fn try_from_names<I, S>(names: I) -> Result<Self, AddressError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| identifier(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[Identifier] {
        &self.0
    }

    pub fn child(&self, name: Identifier) -> Self {
        let mut names = self.0.clone();
        names.push(name);
        Self(names)
    }

    pub fn resource(
        &self,
        mode: ResourceMode,
        type_: Identifier,
        name: Identifier,
    ) -> ConfigResource {
        Resource::new(mode, type_, name).in_module(self.clone())
    }
}

impl From<Vec<Identifier>> for Module {
    fn from(names: Vec<Identifier>) -> Self {
        Self(names)
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "module.{}", name.as_str())?;
        }
        Ok(())
    }
}
