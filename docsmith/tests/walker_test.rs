//! Tests for ExportWalker

use std::path::{Path, PathBuf};

use rstest::rstest;

use docsmith::domain::{ApiManifest, DomainError, ExportKind, ExportWalker};
use docsmith::util::testing;

const API_DIR: &str = "/project/docs/docs/api";

fn manifest(toml: &str) -> ApiManifest {
    testing::init_test_setup();
    ApiManifest::parse(toml).expect("valid manifest")
}

fn walker(manifest: &ApiManifest) -> ExportWalker<'_> {
    ExportWalker::new(manifest, API_DIR)
}

fn page(file: &str) -> PathBuf {
    Path::new(API_DIR).join(file)
}

const FOO_BAR: &str = r#"
[modules.pkg]
exports = ["foo", "Bar"]

[modules.pkg.members.foo]
kind = "function"
doc = "does foo"

[modules.pkg.members.Bar]
kind = "class"
"#;

const NESTED: &str = r#"
[modules.pkg]
exports = ["sub"]

[modules.pkg.members.sub]
module = "pkg.sub"

[modules."pkg.sub"]
doc = "Sub module"
exports = ["baz"]

[modules."pkg.sub".members.baz]
kind = "function"
doc = "does baz"
"#;

#[test]
fn given_empty_export_list_when_building_then_returns_empty() {
    let m = manifest(
        r#"
[modules.pkg]
exports = []
"#,
    );

    let nodes = walker(&m).build_tree("pkg", 3).unwrap();

    assert!(nodes.is_empty());
}

#[test]
fn given_function_and_class_when_building_then_returns_two_leaves() {
    let m = manifest(FOO_BAR);

    let nodes = walker(&m).build_tree("pkg", 3).unwrap();

    assert_eq!(nodes.len(), 2);

    assert_eq!(nodes[0].name, "foo");
    assert_eq!(nodes[0].kind, ExportKind::Function);
    assert_eq!(nodes[0].docstring, "does foo");
    assert_eq!(nodes[0].heading_level, 3);
    assert_eq!(nodes[0].output_path, page("function_foo.md"));
    assert!(nodes[0].is_leaf());

    assert_eq!(nodes[1].name, "Bar");
    assert_eq!(nodes[1].kind, ExportKind::Class);
    assert_eq!(nodes[1].docstring, "");
    assert_eq!(nodes[1].heading_level, 3);
    assert_eq!(nodes[1].output_path, page("class_Bar.md"));
    assert!(nodes[1].is_leaf());
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn given_n_leaf_exports_when_building_then_n_nodes_at_input_level(#[case] n: usize) {
    let mut toml = String::from("[modules.pkg]\nexports = [");
    toml.push_str(
        &(0..n)
            .map(|i| format!("\"f{i}\""))
            .collect::<Vec<_>>()
            .join(", "),
    );
    toml.push_str("]\n");
    for i in 0..n {
        toml.push_str(&format!("[modules.pkg.members.f{i}]\nkind = \"function\"\n"));
    }
    let m = manifest(&toml);

    let nodes = walker(&m).build_tree("pkg", 2).unwrap();

    assert_eq!(nodes.len(), n);
    assert!(nodes.iter().all(|node| node.heading_level == 2 && node.is_leaf()));
}

#[test]
fn given_nested_module_when_building_then_child_is_one_level_deeper() {
    let m = manifest(NESTED);

    let nodes = walker(&m).build_tree("pkg", 3).unwrap();

    assert_eq!(nodes.len(), 1);
    let sub = &nodes[0];
    assert_eq!(sub.name, "pkg.sub");
    assert_eq!(sub.kind, ExportKind::Module);
    assert_eq!(sub.docstring, "Sub module");
    assert_eq!(sub.heading_level, 3);
    assert_eq!(sub.output_path, page("module_sub.md"));

    assert_eq!(sub.children.len(), 1);
    let baz = &sub.children[0];
    assert_eq!(baz.name, "baz");
    assert_eq!(baz.heading_level, 4);
    assert_eq!(baz.docstring, "does baz");
}

#[test]
fn given_camel_case_module_export_when_building_then_file_name_is_snake_case() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["HttpClient"]

[modules.pkg.members.HttpClient]
kind = "module"

[modules."pkg.HttpClient"]
exports = []
"#,
    );

    let nodes = walker(&m).build_tree("pkg", 1).unwrap();

    assert_eq!(nodes[0].name, "pkg.HttpClient");
    assert_eq!(nodes[0].output_path, page("module_http_client.md"));
}

#[test]
fn given_three_levels_when_building_then_heading_increases_by_one_per_level() {
    let m = manifest(
        r#"
[modules.a]
exports = ["b"]
[modules.a.members.b]
module = "a.b"

[modules."a.b"]
exports = ["c"]
[modules."a.b".members.c]
module = "a.b.c"

[modules."a.b.c"]
exports = ["leaf"]
[modules."a.b.c".members.leaf]
kind = "class"
"#,
    );

    let nodes = walker(&m).build_tree("a", 2).unwrap();

    let b = &nodes[0];
    let c = &b.children[0];
    let leaf = &c.children[0];
    assert_eq!(
        (b.heading_level, c.heading_level, leaf.heading_level),
        (2, 3, 4)
    );
    assert_eq!(b.node_count(), 3);
}

#[test]
fn given_unrecognized_kind_when_building_then_category_is_empty() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["VERSION"]

[modules.pkg.members.VERSION]
kind = "constant"
doc = "Package version"
"#,
    );

    let nodes = walker(&m).build_tree("pkg", 3).unwrap();

    assert_eq!(nodes[0].kind, ExportKind::Unknown);
    assert_eq!(nodes[0].output_path, page("_VERSION.md"));
    assert_eq!(nodes[0].docstring, "Package version");
}

#[test]
fn given_aliased_member_when_building_then_uses_entity_name() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["run"]

[modules.pkg.members.run]
kind = "function"
name = "_run_impl"
"#,
    );

    let nodes = walker(&m).build_tree("pkg", 3).unwrap();

    assert_eq!(nodes[0].name, "_run_impl");
    assert_eq!(nodes[0].output_path, page("function__run_impl.md"));
}

#[test]
fn given_same_manifest_when_building_twice_then_trees_are_identical() {
    let m = manifest(NESTED);
    let w = walker(&m);

    let first = w.build_tree("pkg", 3).unwrap();
    let second = w.build_tree("pkg", 3).unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_export_without_member_when_building_then_unresolved_error() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["foo", "ghost"]

[modules.pkg.members.foo]
kind = "function"
"#,
    );

    let err = walker(&m).build_tree("pkg", 3).unwrap_err();

    assert_eq!(
        err,
        DomainError::UnresolvedExport {
            container: "pkg".into(),
            name: "ghost".into(),
        }
    );
}

#[test]
fn given_undeclared_module_when_building_then_unknown_module_error() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["sub"]

[modules.pkg.members.sub]
module = "pkg.missing"
"#,
    );

    let err = walker(&m).build_tree("pkg", 3).unwrap_err();

    assert_eq!(err, DomainError::UnknownModule("pkg.missing".into()));
}

#[test]
fn given_cyclic_exports_when_building_then_cycle_error_names_chain() {
    let m = manifest(
        r#"
[modules.a]
exports = ["b"]
[modules.a.members.b]
module = "b"

[modules.b]
exports = ["a"]
[modules.b.members.a]
module = "a"
"#,
    );

    let err = walker(&m).build_tree("a", 1).unwrap_err();

    assert_eq!(
        err,
        DomainError::CycleDetected {
            chain: vec!["a".into(), "b".into(), "a".into()],
        }
    );
    assert_eq!(err.to_string(), "cycle detected in export graph: a -> b -> a");
}

#[test]
fn given_shared_submodule_when_building_then_not_a_cycle() {
    let m = manifest(
        r#"
[modules.pkg]
exports = ["left", "right"]
[modules.pkg.members.left]
module = "pkg.common"
[modules.pkg.members.right]
module = "pkg.common"

[modules."pkg.common"]
exports = []
"#,
    );

    let nodes = walker(&m).build_tree("pkg", 1).unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "pkg.common");
    assert_eq!(nodes[1].name, "pkg.common");
    assert_eq!(nodes[0].output_path, page("module_left.md"));
    assert_eq!(nodes[1].output_path, page("module_right.md"));
}

#[test]
fn given_nesting_beyond_max_depth_when_building_then_depth_error() {
    let m = manifest(NESTED);

    let err = walker(&m).with_max_depth(1).build_tree("pkg", 1).unwrap_err();

    assert_eq!(
        err,
        DomainError::DepthExceeded {
            module: "pkg.sub".into(),
            max_depth: 1,
        }
    );
}

#[test]
fn given_zero_heading_level_when_building_then_rejected() {
    let m = manifest(FOO_BAR);

    let err = walker(&m).build_tree("pkg", 0).unwrap_err();

    assert_eq!(err, DomainError::InvalidHeadingLevel(0));
}
