//! Rendering then parsing an address must give back the same address

use addrs::parse::parse_target_str;
use addrs::{Identifier, InstanceKey, ModuleInstance, Resource, ResourceMode, Targetable};
use pretty_assertions::assert_eq;

fn ident(name: &str) -> Identifier {
    Identifier::unchecked(name)
}

fn modules() -> Vec<ModuleInstance> {
    let root = ModuleInstance::root();
    vec![
        root.clone(),
        root.child(ident("foo"), InstanceKey::NoKey),
        root.child(ident("foo"), 0),
        root.child(ident("foo"), "a b").child(ident("bar"), InstanceKey::NoKey),
        root.child(ident("foo_2"), 10).child(ident("bar"), r#"quote " and \ slash"#),
    ]
}

fn addresses() -> Vec<Targetable> {
    let mut addresses = vec![];

    for module in modules() {
        addresses.push(module.clone().into());

        for mode in [ResourceMode::Managed, ResourceMode::Data] {
            let resource =
                Resource::new(mode, ident("test_resource"), ident("foo")).absolute(module.clone());
            addresses.push(resource.clone().into());
            addresses.push(resource.clone().instance(7).into());
            addresses.push(resource.instance("key\twith\nescapes").into());
        }
    }

    addresses
}

#[test]
fn round_trip() {
    for addr in addresses() {
        let text = addr.to_string();
        let parsed = parse_target_str(&text)
            .unwrap_or_else(|diags| panic!("{text}: {:?}", diags.err_with_warnings()))
            .subject;

        assert_eq!(parsed, addr, "{text}");
    }
}

#[test]
fn rendering() {
    let rendered: Vec<String> = [
        "module.foo",
        "module.foo[0]",
        "test_resource.foo",
        r#"test_resource.foo["bar"]"#,
        "module.bar.test_resource.foo[2]",
        "module.bar[0].data.test_resource.foo",
    ]
    .into_iter()
    .map(|text| parse_target_str(text).unwrap().subject.to_string())
    .collect();

    assert_eq!(
        rendered,
        vec![
            "module.foo",
            "module.foo[0]",
            "test_resource.foo",
            r#"test_resource.foo["bar"]"#,
            "module.bar.test_resource.foo[2]",
            "module.bar[0].data.test_resource.foo",
        ]
    );
}
