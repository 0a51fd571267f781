//! Containment tests
//!
//! Targets are parsed from text the same way operator selections are.

use addrs::parse::parse_target_str;
use addrs::{ConfigResource, Identifier, Module, ModuleInstance, Resource, ResourceMode, Targetable};

fn target(text: &str) -> Targetable {
    match parse_target_str(text) {
        Ok(target) => target.subject,
        Err(diags) => panic!("{text}: {:?}", diags.err_with_warnings()),
    }
}

fn config_resource(module: &[&str]) -> Targetable {
    let resource = Resource::try_new(ResourceMode::Managed, "test_resource", "foo").unwrap();
    ConfigResource::new(Module::try_from_names(module).unwrap(), resource).into()
}

#[test]
fn target_contains() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ADDRS_LOG"))
        .with_writer(std::io::stderr)
        .try_init();

    let root: Targetable = ModuleInstance::root().into();

    let cases = [
        (target("module.foo"), target("module.bar"), false),
        (target("module.foo"), target("module.foo"), true),
        // an unkeyed module is one specific instance
        (target("module.foo"), target("module.foo[0]"), false),
        (target("module.foo[0]"), target("module.foo"), false),
        (target("module.foo[0]"), target("module.foo[0]"), true),
        (root.clone(), target("module.foo"), true),
        (target("module.foo"), root.clone(), false),
        (
            target("module.foo"),
            target("module.foo.module.bar[0]"),
            true,
        ),
        (
            target("module.foo[2]"),
            target("module.foo[2].module.bar[0]"),
            true,
        ),
        (
            target("module.foo[2]"),
            target("module.foo[1].module.bar[0]"),
            false,
        ),
        (
            target("module.foo"),
            target("module.foo.test_resource.bar"),
            true,
        ),
        (
            target("module.foo"),
            target("module.foo.test_resource.bar[0]"),
            true,
        ),
        // resources
        (
            target("test_resource.foo"),
            target(r#"test_resource.foo["bar"]"#),
            true,
        ),
        (
            target(r#"test_resource.foo["bar"]"#),
            target(r#"test_resource.foo["bar"]"#),
            true,
        ),
        (
            target(r#"test_resource.foo["bar"]"#),
            target(r#"test_resource.foo["baz"]"#),
            false,
        ),
        (
            target(r#"test_resource.foo["bar"]"#),
            target("test_resource.foo"),
            false,
        ),
        (
            target("test_resource.foo[0]"),
            target(r#"test_resource.foo["0"]"#),
            false,
        ),
        (
            target("test_resource.foo"),
            target("test_resource.foo[2]"),
            true,
        ),
        (
            target("test_resource.foo"),
            target("data.test_resource.foo"),
            false,
        ),
        (
            target("test_resource.foo"),
            target("test_resource.bar"),
            false,
        ),
        (
            target("test_resource.foo"),
            target("other_resource.foo"),
            false,
        ),
        (
            target("test_resource.foo"),
            target("module.bar.test_resource.foo[2]"),
            false,
        ),
        (
            target("module.bar.test_resource.foo"),
            target("module.bar.test_resource.foo[2]"),
            true,
        ),
        (
            target("module.bar.test_resource.foo"),
            target("module.bar[0].test_resource.foo[2]"),
            false,
        ),
        (
            target("module.bar.test_resource.foo"),
            target("module.bar"),
            false,
        ),
        // config resources, never returned from parsing
        (
            config_resource(&["bar"]),
            target("module.bar.test_resource.foo[2]"),
            true,
        ),
        (
            config_resource(&[]),
            target("module.bar.test_resource.foo[2]"),
            false,
        ),
        (
            config_resource(&["bar"]),
            target("module.bar[0].test_resource.foo"),
            true,
        ),
        (
            config_resource(&["bar"]),
            target(r#"module.bar["x"].test_resource.foo["y"]"#),
            true,
        ),
        (
            config_resource(&["bar"]),
            target("module.baz.test_resource.foo"),
            false,
        ),
        (
            config_resource(&["bar"]),
            target("module.bar.module.baz.test_resource.foo"),
            false,
        ),
        (
            config_resource(&["bar"]),
            target("module.bar.data.test_resource.foo"),
            false,
        ),
        (config_resource(&["bar"]), target("module.bar"), false),
        (config_resource(&[]), target("test_resource.foo[1]"), true),
    ];

    for (addr, other, expect) in cases {
        assert_eq!(
            addr.target_contains(&other),
            expect,
            "expected {addr:?}.target_contains({other:?}) == {expect}"
        );
    }
}

#[test]
fn reflexive() {
    for text in [
        "",
        "module.foo",
        "module.foo[0]",
        r#"module.foo["a"].module.bar"#,
        "test_resource.foo",
        "data.test_resource.foo[3]",
        r#"module.foo[1].test_resource.bar["x"]"#,
    ] {
        let addr = target(text);
        assert!(addr.target_contains(&addr), "{text} must contain itself");
    }

    let config = config_resource(&["a", "b"]);
    assert!(config.target_contains(&config));
}

#[test]
fn root_contains_everything() {
    let root = target("");

    for text in [
        "module.foo",
        "module.foo[0].module.bar",
        "test_resource.foo",
        "module.foo.test_resource.foo[1]",
    ] {
        let addr = target(text);
        assert!(root.target_contains(&addr), "root must contain {text}");
        assert!(!addr.target_contains(&root), "{text} must not contain root");
    }

    assert!(root.target_contains(&config_resource(&["bar"])));
}

#[test]
fn parallel_checks() {
    let addrs: Vec<Targetable> = [
        "module.foo",
        "module.foo[0]",
        "test_resource.foo",
        "module.foo.test_resource.foo[1]",
    ]
    .into_iter()
    .map(target)
    .collect();

    let expected: Vec<bool> = addrs
        .iter()
        .flat_map(|addr| addrs.iter().map(move |other| addr.target_contains(other)))
        .collect();

    let results: Vec<Vec<bool>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    addrs
                        .iter()
                        .flat_map(|addr| addrs.iter().map(move |other| addr.target_contains(other)))
                        .collect::<Vec<bool>>()
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn identifiers_are_reexported() {
    let module = ModuleInstance::root().child(Identifier::unchecked("foo"), 1);
    assert_eq!(Targetable::from(module), target("module.foo[1]"));
}
