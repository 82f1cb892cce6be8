mod common;

use common::*;

#[test]
fn deploy_json_emits_ndjson_event_stream() {
    let env = TestEnv::builder()
        .with_site_file("a.html", "a")
        .with_site_file("b.css", "b")
        .build();

    let result = env.run(&["deploy", "--json"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let events = result.json_events();
    let kinds: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();
    assert_eq!(kinds.first(), Some(&"start"));
    assert_eq!(kinds.last(), Some(&"complete"));
    assert!(kinds.contains(&"revision_checked"));
    assert!(kinds.contains(&"lock_acquired"));
    assert_eq!(
        kinds.iter().filter(|k| **k == "item_copied").count(),
        2,
        "{:?}",
        kinds
    );
    let complete = events.last().unwrap();
    assert_eq!(complete["status"], "success");
    assert_eq!(complete["old"], serde_json::Value::Null);
}

#[test]
fn deploy_json_up_to_date() {
    let env = TestEnv::builder().with_site_file("a.html", "a").build();
    assert!(env.run(&["deploy"]).is_success());

    let events = env.run(&["deploy", "--json"]).json_events();

    let kinds: Vec<&str> = events.iter().filter_map(|e| e["event"].as_str()).collect();
    assert_eq!(kinds, vec!["start", "revision_checked", "up_to_date"]);
}

#[test]
fn deploy_json_reports_errors_as_events() {
    let env = TestEnv::builder().with_config("").build();

    let result = env.run(&["deploy", "--json"]);

    assert_eq!(result.exit_code, 1);
    let events = result.json_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "error");
    assert!(events[0]["message"]
        .as_str()
        .unwrap()
        .contains("no build configured"));
}
