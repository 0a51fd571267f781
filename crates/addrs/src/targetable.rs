//! targetable addresses and the containment relation
//!
//! [Targetable::target_contains] answers "is `other` nested inside `self`".
//! Both operands are first reduced to a [Normalized] view:
//!
//! - module path: `(name, key)` steps, or names only for [ConfigResource]
//! - resource part: absent for module addresses, otherwise the [Resource] and
//!   its key (`None` meaning "every instance")
//!
//! The rules are asymmetric:
//! - a module address contains everything at or below it, but its keys must
//!   match exactly (`module.foo` does not contain `module.foo[0]`)
//! - a resource address pins its module depth, and without a key it contains
//!   every instance of the resource
//! - a [ConfigResource] compares module names only
use crate::instance_key::InstanceKey;
use crate::module::{ModuleInstance, ModuleInstanceStep};
use crate::resource::{AbsResource, AbsResourceInstance, ConfigResource, Resource};
use hcl::Identifier;
use serde::ser::SerializeMap;
use std::fmt::Formatter;

/// Address kinds that can be used to select parts of a deployment graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Targetable {
    ModuleInstance(ModuleInstance),
    AbsResource(AbsResource),
    AbsResourceInstance(AbsResourceInstance),
    ConfigResource(ConfigResource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetableAddrType {
    ModuleInstance,
    AbsResource,
    AbsResourceInstance,
    ConfigResource,
}

impl std::fmt::Display for TargetableAddrType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetableAddrType::ModuleInstance => f.write_str("module_instance"),
            TargetableAddrType::AbsResource => f.write_str("abs_resource"),
            TargetableAddrType::AbsResourceInstance => f.write_str("abs_resource_instance"),
            TargetableAddrType::ConfigResource => f.write_str("config_resource"),
        }
    }
}

impl Targetable {
    pub fn addr_type(&self) -> TargetableAddrType {
        match self {
            Targetable::ModuleInstance(_) => TargetableAddrType::ModuleInstance,
            Targetable::AbsResource(_) => TargetableAddrType::AbsResource,
            Targetable::AbsResourceInstance(_) => TargetableAddrType::AbsResourceInstance,
            Targetable::ConfigResource(_) => TargetableAddrType::ConfigResource,
        }
    }

    /// Returns true if `other` is `self` or nested inside it
    ///
    /// Both addresses must come from the same configuration, this is not
    /// checked.
    #[tracing::instrument(level = "trace", skip_all, fields(addr = %self, other = %other))]
    pub fn target_contains(&self, other: &Targetable) -> bool {
        let contains = self.normalized().contains(&other.normalized());
        tracing::trace!(contains);
        contains
    }

    fn normalized(&self) -> Normalized<'_> {
        match self {
            Targetable::ModuleInstance(module) => Normalized {
                module: ModulePath::Instance(module.steps()),
                resource: None,
            },
            Targetable::AbsResource(addr) => Normalized {
                module: ModulePath::Instance(addr.module.steps()),
                resource: Some(ResourcePart {
                    resource: &addr.resource,
                    key: None,
                }),
            },
            Targetable::AbsResourceInstance(addr) => Normalized {
                module: ModulePath::Instance(addr.module.steps()),
                resource: Some(ResourcePart {
                    resource: &addr.resource.resource,
                    key: Some(&addr.resource.key),
                }),
            },
            Targetable::ConfigResource(addr) => Normalized {
                module: ModulePath::Config(addr.module.names()),
                resource: Some(ResourcePart {
                    resource: &addr.resource,
                    key: None,
                }),
            },
        }
    }
}

enum ModulePath<'a> {
    Instance(&'a [ModuleInstanceStep]),
    /// structural path, no keys
    Config(&'a [Identifier]),
}

impl<'a> ModulePath<'a> {
    fn len(&self) -> usize {
        match self {
            ModulePath::Instance(steps) => steps.len(),
            ModulePath::Config(names) => names.len(),
        }
    }

    fn name(&self, index: usize) -> &'a Identifier {
        match self {
            ModulePath::Instance(steps) => &steps[index].name,
            ModulePath::Config(names) => &names[index],
        }
    }

    fn key(&self, index: usize) -> Option<&'a InstanceKey> {
        match self {
            ModulePath::Instance(steps) => Some(&steps[index].key),
            ModulePath::Config(_) => None,
        }
    }

    /// Checks if `self` is a prefix of `other`
    ///
    /// A structural path compares names only. An instance path also compares
    /// keys, and never matches a structural step since that has no key.
    fn is_prefix_of(&self, other: &ModulePath) -> bool {
        let len = self.len();
        if len > other.len() {
            return false;
        }

        (0..len).all(|index| {
            if self.name(index) != other.name(index) {
                return false;
            }

            match self.key(index) {
                None => true,
                Some(key) => other.key(index) == Some(key),
            }
        })
    }
}

struct ResourcePart<'a> {
    resource: &'a Resource,
    /// `None` stands for all instances
    key: Option<&'a InstanceKey>,
}

struct Normalized<'a> {
    module: ModulePath<'a>,
    resource: Option<ResourcePart<'a>>,
}

impl Normalized<'_> {
    fn contains(&self, other: &Normalized) -> bool {
        if !self.module.is_prefix_of(&other.module) {
            return false;
        }

        let Some(resource) = &self.resource else {
            // module addresses contain everything below them
            return true;
        };

        if other.module.len() != self.module.len() {
            return false;
        }

        let Some(other_resource) = &other.resource else {
            return false;
        };

        if resource.resource != other_resource.resource {
            return false;
        }

        match resource.key {
            None => true,
            Some(key) => other_resource.key == Some(key),
        }
    }
}

impl std::fmt::Display for Targetable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Targetable::ModuleInstance(addr) => write!(f, "{addr}"),
            Targetable::AbsResource(addr) => write!(f, "{addr}"),
            Targetable::AbsResourceInstance(addr) => write!(f, "{addr}"),
            Targetable::ConfigResource(addr) => write!(f, "{addr}"),
        }
    }
}

impl From<ModuleInstance> for Targetable {
    fn from(value: ModuleInstance) -> Self {
        Targetable::ModuleInstance(value)
    }
}

impl From<AbsResource> for Targetable {
    fn from(value: AbsResource) -> Self {
        Targetable::AbsResource(value)
    }
}

impl From<AbsResourceInstance> for Targetable {
    fn from(value: AbsResourceInstance) -> Self {
        Targetable::AbsResourceInstance(value)
    }
}

impl From<ConfigResource> for Targetable {
    fn from(value: ConfigResource) -> Self {
        Targetable::ConfigResource(value)
    }
}

/// Serialized as a flat map: `type`, `address`, `module` and, for resource
/// addresses, `resource` plus `key` for single instances
impl serde::ser::Serialize for Targetable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut ser = serializer.serialize_map(None)?;
        ser.serialize_entry("type", &self.addr_type().to_string())?;
        ser.serialize_entry("address", &self.to_string())?;

        match self {
            Targetable::ModuleInstance(addr) => {
                ser.serialize_entry("module", &addr.to_string())?;
            }
            Targetable::AbsResource(addr) => {
                ser.serialize_entry("module", &addr.module.to_string())?;
                ser.serialize_entry("resource", &addr.resource.to_string())?;
            }
            Targetable::AbsResourceInstance(addr) => {
                ser.serialize_entry("module", &addr.module.to_string())?;
                ser.serialize_entry("resource", &addr.resource.resource.to_string())?;
                ser.serialize_entry("key", &addr.resource.key.to_string())?;
            }
            Targetable::ConfigResource(addr) => {
                ser.serialize_entry("module", &addr.module.to_string())?;
                ser.serialize_entry("resource", &addr.resource.to_string())?;
            }
        }

        ser.end()
    }
}
