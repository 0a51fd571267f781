//! resource addresses
//!
//! | type                    | module part        | resource key |
//! |-------------------------|--------------------|--------------|
//! | [Resource]              | -                  | -            |
//! | [ResourceInstance]      | -                  | yes          |
//! | [AbsResource]           | [ModuleInstance]   | -            |
//! | [AbsResourceInstance]   | [ModuleInstance]   | yes          |
//! | [ConfigResource]        | [Module]           | -            |
//!
//! An address without a resource key stands for all instances of the resource.
use crate::error::{identifier, AddressError};
use crate::instance_key::InstanceKey;
use crate::module::{Module, ModuleInstance};
use hcl::Identifier;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceMode {
    /// `resource` blocks
    Managed,
    /// `data` blocks
    Data,
}

impl std::fmt::Display for ResourceMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceMode::Managed => f.write_str("managed"),
            ResourceMode::Data => f.write_str("data"),
        }
    }
}

/// A resource block within a module
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    pub mode: ResourceMode,
    pub type_: Identifier,
    pub name: Identifier,
}

impl Resource {
    pub fn try_new(mode: ResourceMode, type_: &str, name: &str) -> Result<Self, AddressError> {
        Ok(Self::new(mode, identifier(type_)?, identifier(name)?))
    }

    pub fn instance(self, key: impl Into<InstanceKey>) -> ResourceInstance {
        ResourceInstance::new(self, key.into())
    }

    pub fn absolute(self, module: ModuleInstance) -> AbsResource {
        AbsResource::new(module, self)
    }

    pub fn in_module(self, module: Module) -> ConfigResource {
        ConfigResource::new(module, self)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.mode == ResourceMode::Data {
            f.write_str("data.")?;
        }
        write!(f, "{}.{}", self.type_.as_str(), self.name.as_str())
    }
}

/// One instance of a resource within a module
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceInstance {
    pub resource: Resource,
    pub key: InstanceKey,
}

impl ResourceInstance {
    pub fn containing_resource(&self) -> &Resource {
        &self.resource
    }

    pub fn absolute(self, module: ModuleInstance) -> AbsResourceInstance {
        AbsResourceInstance::new(module, self)
    }
}

impl std::fmt::Display for ResourceInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.resource, self.key)
    }
}

/// All instances of a resource within one module instance
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsResource {
    pub module: ModuleInstance,
    pub resource: Resource,
}

impl AbsResource {
    pub fn instance(self, key: impl Into<InstanceKey>) -> AbsResourceInstance {
        AbsResourceInstance::new(self.module, self.resource.instance(key))
    }

    /// Static configuration address of this resource
    pub fn config(&self) -> ConfigResource {
        ConfigResource::new(self.module.module(), self.resource.clone())
    }
}

impl std::fmt::Display for AbsResource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_module_prefix(f, &self.module)?;
        write!(f, "{}", self.resource)
    }
}

/// One concrete resource instance within one module instance
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsResourceInstance {
    pub module: ModuleInstance,
    pub resource: ResourceInstance,
}

impl AbsResourceInstance {
    pub fn containing_resource(&self) -> AbsResource {
        AbsResource::new(self.module.clone(), self.resource.resource.clone())
    }

    pub fn config_resource(&self) -> ConfigResource {
        self.containing_resource().config()
    }
}

impl std::fmt::Display for AbsResourceInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_module_prefix(f, &self.module)?;
        write!(f, "{}", self.resource)
    }
}

/// A resource as declared in configuration, independent of every instance key
///
/// Only built by configuration loaders, parsing a target never returns one.
/// The rendered form looks like an [AbsResource] with unkeyed module calls.
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigResource {
    pub module: Module,
    pub resource: Resource,
}

impl std::fmt::Display for ConfigResource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !self.module.is_root() {
            write!(f, "{}.", self.module)?;
        }
        write!(f, "{}", self.resource)
    }
}

fn write_module_prefix(f: &mut Formatter<'_>, module: &ModuleInstance) -> std::fmt::Result {
    if module.is_root() {
        return Ok(());
    }
    write!(f, "{module}.")
}
