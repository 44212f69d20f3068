//! `lookout sync` end to end, with a stand-in importer

#![cfg(unix)]

mod common;

use common::*;

#[test]
fn syncs_a_file_into_every_instance() {
    let env = TestEnv::new();
    env.write("lookout.json", TWO_HOST_CONFIG);
    env.write("ui/jcr_root/apps/site/page.html", "<p>hi</p>");
    let vlt = env.fake_vlt(0);

    let result = env.run_with_env(
        &["sync", "ui/jcr_root/apps/site/page.html"],
        &[("LOOKOUT_VLT", vlt.to_str().unwrap())],
    );

    assert_success!(result);
    let log = env.read("vlt.log");
    assert!(log.contains("--credentials admin:admin -v import http://localhost:4502/crx/-/jcr:root"));
    assert!(log.contains("--credentials admin:secret -v import http://localhost:4503/crx/-/jcr:root"));
    assert_eq!(
        log.matches(r#"<filter root="/apps/site/page.html" mode="replace"/>"#)
            .count(),
        2
    );
    assert!(log.contains("jcr_root/apps/site/page.html"));
    assert_output_contains!(result, "Elapsed time:");
}

#[test]
fn failing_instance_fails_the_sync() {
    let env = TestEnv::new();
    env.write("lookout.json", SINGLE_HOST_CONFIG);
    env.write("ui/jcr_root/apps/site/page.html", "<p>hi</p>");
    let vlt = env.fake_vlt(3);

    let result = env.run_with_env(
        &["sync", "ui/jcr_root/apps/site/page.html"],
        &[("LOOKOUT_VLT", vlt.to_str().unwrap())],
    );

    assert!(!result.success);
    assert_output_contains!(result, "sync failed on 1 host(s): http://localhost:4502/crx/-/jcr:root");
}

#[test]
fn sling_json_is_converted_before_import() {
    let env = TestEnv::new();
    env.write("lookout.json", SINGLE_HOST_CONFIG);
    env.write("bundle/components/events.json", EVENTS_JSON);
    let vlt = env.fake_vlt(0);

    let result = env.run_with_env(
        &[
            "--json",
            "sync",
            "bundle/components/events.json",
            "--jcr",
            "/apps/site/components/events.json",
            "--sling",
        ],
        &[("LOOKOUT_VLT", vlt.to_str().unwrap())],
    );

    assert_success!(result);
    let log = env.read("vlt.log");
    assert!(log.contains(r#"<filter root="/apps/site/components/events" mode="replace"/>"#));
    assert!(log.contains("jcr_root/apps/site/components/events/.content.xml"));
    assert!(!log.contains("events.json"));
    assert!(env.path("bundle/components/events.json").exists(), "sources stay untouched");

    let summary: serde_json::Value = serde_json::from_str(result.stdout.trim()).unwrap();
    assert_eq!(summary["event"], "sync_complete");
    assert_eq!(summary["repository_path"], "/apps/site/components/events.json");
    assert_eq!(summary["succeeded"][0], "http://localhost:4502/crx/-/jcr:root");
    assert_eq!(summary["failed"].as_array().unwrap().len(), 0);
}

#[test]
fn path_outside_jcr_root_needs_explicit_repository_path() {
    let env = TestEnv::new();
    env.write("lookout.json", SINGLE_HOST_CONFIG);
    env.write("docs/readme.md", "hi");

    let result = env.run(&["sync", "docs/readme.md"]);

    assert!(!result.success);
    assert_output_contains!(result, "has no jcr_root ancestor");
}

#[test]
fn instances_come_from_the_environment() {
    let env = TestEnv::new();
    env.write("lookout.json", r#"{"jcrRootPaths": ["ui/jcr_root"]}"#);
    env.write("ui/jcr_root/apps/a.txt", "a");
    let vlt = env.fake_vlt(0);

    let result = env.run_with_env(
        &["sync", "ui/jcr_root/apps/a.txt"],
        &[
            ("LOOKOUT_VLT", vlt.to_str().unwrap()),
            ("LOOKOUT_INSTANCES", "http://dev:pw@localhost:4502"),
        ],
    );

    assert_success!(result);
    assert!(env.read("vlt.log").contains("--credentials dev:pw"));
}

#[test]
fn no_config_is_an_error() {
    let env = TestEnv::new();

    let result = env.run(&["sync", "anything"]);

    assert!(!result.success);
    assert_output_contains!(result, "no lookout.json or lookout.toml");
}
