//! Sling-Initial-Content conversion through the public API

mod common;

use std::fs;

use common::{list_all_files, EVENTS_JSON, EVENTS_XML};
use lookout::domain::services::{convert_tree, descriptor_path_for, serialize, SerializeError};
use tempfile::tempdir;

#[test]
fn boolean_and_string_properties() {
    assert_eq!(serialize(EVENTS_JSON).unwrap(), EVENTS_XML);
}

#[test]
fn five_properties_keep_source_order() {
    let xml = serialize(
        r#"{
            "jcr:primaryType": "sling:Folder",
            "jcr:title": "Site",
            "hidden": true,
            "sling:resourceType": "site/components/page",
            "tags": ["news", "events"]
        }"#,
    )
    .unwrap();

    insta::assert_snapshot!(xml, @r#"<jcr:root xmlns:cq="http://www.day.com/jcr/cq/1.0" xmlns:sling="http://sling.apache.org/jcr/sling/1.0" xmlns:jcr="http://www.jcp.org/jcr/1.0" xmlns:vlt="http://www.day.com/jcr/vault/1.0" xmlns:nt="http://www.jcp.org/jcr/nt/1.0" jcr:primaryType="sling:Folder" jcr:title="Site" hidden="{Boolean}true" sling:resourceType="site/components/page" tags="[news,events]"></jcr:root>"#);
}

#[test]
fn nested_objects_become_child_elements() {
    let xml = serialize(
        r#"{
            "jcr:primaryType": "cq:Page",
            "jcr:content": {
                "jcr:title": "Home",
                "par": {"sling:resourceType": "foundation/components/parsys"}
            }
        }"#,
    )
    .unwrap();

    insta::assert_snapshot!(xml, @r#"<jcr:root xmlns:cq="http://www.day.com/jcr/cq/1.0" xmlns:sling="http://sling.apache.org/jcr/sling/1.0" xmlns:jcr="http://www.jcp.org/jcr/1.0" xmlns:vlt="http://www.day.com/jcr/vault/1.0" xmlns:nt="http://www.jcp.org/jcr/nt/1.0" jcr:primaryType="cq:Page"><jcr:content jcr:title="Home"><par sling:resourceType="foundation/components/parsys"></par></jcr:content></jcr:root>"#);
}

#[test]
fn namespace_collision_keeps_one_attribute() {
    let xml = serialize(r#"{"xmlns:cq": "urn:override"}"#).unwrap();
    assert_eq!(xml.matches("xmlns:cq=").count(), 1);
    assert!(xml.contains(r#"xmlns:cq="urn:override""#));
}

#[test]
fn descriptor_path_requires_json() {
    assert_eq!(
        descriptor_path_for("/foo/my_node.json".as_ref()).unwrap(),
        std::path::PathBuf::from("/foo/my_node/.content.xml")
    );
    assert!(matches!(
        descriptor_path_for("/foo/my_node.txt".as_ref()),
        Err(SerializeError::InvalidInput { .. })
    ));
}

#[test]
fn convert_tree_replaces_json_sources() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("foo.json"),
        r#"{"foo": "hello", "bar": "world", "baz": "ur nice"}"#,
    )
    .unwrap();

    let written = convert_tree(dir.path()).unwrap();

    assert_eq!(written, vec![dir.path().join("foo/.content.xml")]);
    assert_eq!(list_all_files(dir.path()), vec!["foo/.content.xml"]);
    let xml = fs::read_to_string(&written[0]).unwrap();
    assert!(xml.contains(r#"foo="hello" bar="world" baz="ur nice""#));
}

#[test]
fn convert_tree_stops_at_first_bad_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"ok": true}"#).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"count": 1}"#).unwrap();

    let err = convert_tree(dir.path()).unwrap_err();

    assert!(matches!(err, SerializeError::File { .. }));
    assert!(err.to_string().contains("b.json"));
    assert!(dir.path().join("a/.content.xml").exists());
    assert!(dir.path().join("b.json").exists());
}
