//! # addrs - addressing and targeting
//!
//! Every addressable unit of configuration or deployed state has an address:
//! a module instance, a resource, a single resource instance, or a resource
//! as declared in static configuration. This crate represents those
//! addresses, renders them to text, parses them from text and decides whether
//! one address is nested inside another. The last part is what operator
//! selections like `-target=...` and `-exclude=...` are built on.
//!
//! ## Introduction for developers
//!
//! ### Address kinds
//!
//! | **text**                             | **type**                                   |
//! |--------------------------------------|--------------------------------------------|
//! | (empty)                              | [ModuleInstance] (the root)                |
//! | `module.foo[0]`                      | [ModuleInstance]                           |
//! | `test_resource.foo`                  | [AbsResource]                              |
//! | `module.bar.test_resource.foo["x"]`  | [AbsResourceInstance]                      |
//! | - (built by config loaders only)     | [ConfigResource]                           |
//!
//! [Targetable] wraps the four kinds that can be used as a target.
//!
//! Instance keys ([InstanceKey]) are either absent, an integer or a string.
//! They never compare equal across kinds.
//!
//! ### Parsing
//!
//! see [parse::parse_target_str]
//!
//! The text is parsed as an HCL traversal with [hcl_edit], flattened into
//! steps and then walked: first all `module.<name>[<key>]` pairs, then an
//! optional `[data.]<type>.<name>[<key>]` resource part. Anything else is
//! reported as [diagnostics::Diagnostics] with a source range.
//!
//! ### Containment
//!
//! see [Targetable::target_contains]
//!
//! ```
//! use addrs::parse::parse_target_str;
//!
//! let resource = parse_target_str("test_resource.foo").unwrap().subject;
//! let instance = parse_target_str(r#"test_resource.foo["bar"]"#).unwrap().subject;
//!
//! // a resource without key contains all of its instances
//! assert!(resource.target_contains(&instance));
//!
//! let module = parse_target_str("module.foo").unwrap().subject;
//! let keyed = parse_target_str("module.foo[0]").unwrap().subject;
//!
//! // a module without key is one specific instance
//! assert!(!module.target_contains(&keyed));
//! ```
//!
//! All values are immutable and `Send + Sync`. Parsing and containment checks
//! can run on as many threads as needed.
pub mod diagnostics;
pub mod error;
pub mod instance_key;
pub mod module;
pub mod parse;
pub mod resource;
pub mod targetable;
mod util;

pub use hcl::Identifier;
pub use instance_key::InstanceKey;
pub use module::{Module, ModuleInstance, ModuleInstanceStep, ROOT_MODULE_INSTANCE};
pub use resource::{
    AbsResource, AbsResourceInstance, ConfigResource, Resource, ResourceInstance, ResourceMode,
};
pub use targetable::{Targetable, TargetableAddrType};
