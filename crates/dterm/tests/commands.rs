//! Command-line behavior end to end through the public console.

mod common;

use common::{empty, run, seeded};

#[test]
fn remove_by_title_then_list() {
    let mut c = seeded();
    assert_eq!(run(&mut c, "remove clock"), "Removed plugin Clock (ID: 1)");
    assert_eq!(run(&mut c, "list"), "ID: 0, Type: todo, Title: Tasks");
    assert_eq!(run(&mut c, "clock-format-1"), "Unknown command: clock-format-1");
}

#[test]
fn grid_size_range_is_enforced() {
    let mut c = seeded();
    assert_eq!(run(&mut c, "settings set gridsize 999"), "Invalid gridSize (10-500)");
    assert_eq!(run(&mut c, "settings get gridsize"), "gridSize 50");
    assert_eq!(run(&mut c, "settings set gridsize 100"), "gridSize set to 100");
    assert_eq!(run(&mut c, "settings get gridsize"), "gridSize 100");
    assert_eq!(c.dashboard().layout().grid_size(), 100);
}

#[test]
fn suffix_and_base_forms_agree() {
    let mut c = empty();
    assert_eq!(run(&mut c, "add clock Lobby"), "Added clock plugin: Lobby");
    let suffix = run(&mut c, "clock-format-0 12");
    assert_eq!(suffix, "Clock Lobby set to 12-hour format");
    assert_eq!(run(&mut c, "clock-format lobby 12"), suffix);
    assert_eq!(run(&mut c, "clock-format 0 24"), "Clock Lobby set to 24-hour format");
    assert_eq!(c.dashboard().get(0).unwrap().state()["is24h"], true);
}

#[test]
fn base_form_errors() {
    let mut c = seeded();
    assert_eq!(run(&mut c, "clock-format nobody 24"), "Plugin nobody not found");
    assert_eq!(run(&mut c, "clock-format tasks 24"), "Command clock-format not supported for todo");
    assert_eq!(run(&mut c, "clock-format 1 13"), "Invalid format. Use 12 or 24");
    assert_eq!(run(&mut c, "frobnicate"), "Unknown command: frobnicate");
}

#[test]
fn compact_twice_restores_settings() {
    let mut c = seeded();
    let before = run(&mut c, "settings list");
    assert_eq!(run(&mut c, "compact"), "Compact mode: ON");
    assert_eq!(run(&mut c, "compact"), "Compact mode: OFF");
    assert_eq!(run(&mut c, "settings list"), before);
}

#[test]
fn todo_commands_through_both_forms() {
    let mut c = seeded();
    assert_eq!(run(&mut c, "add-todo tasks buy milk"), "Added task to Tasks: buy milk");
    assert_eq!(run(&mut c, "add-todo-0 call mom"), "Added task to Tasks: call mom");
    assert_eq!(run(&mut c, "toggle-todo 0 1"), "Toggled task 1 in Tasks");
    assert_eq!(run(&mut c, "list-todos tasks"), "0: buy milk [ ]\n1: call mom [x]");
    assert_eq!(run(&mut c, "remove-todo-0 7"), "Task 7 not found in Tasks");
}

#[test]
fn update_is_all_or_nothing() {
    let mut c = seeded();
    assert_eq!(run(&mut c, "update 0 {\"todos\": ["), "Failed to parse JSON payload");
    assert_eq!(
        run(&mut c, r#"update tasks {"todos": [{"text": "a", "completed": true}]}"#),
        "Updated plugin Tasks (ID: 0)"
    );
    assert_eq!(run(&mut c, "list-todos 0"), "0: a [x]");
    assert_eq!(run(&mut c, r#"update clock {"is24h": false}"#), "Updated plugin Clock (ID: 1)");
    assert_eq!(run(&mut c, "clock-format clock"), "Clock Clock uses 12-hour format");
}

#[test]
fn ids_stay_unique_across_add_and_remove() {
    let mut c = seeded();
    run(&mut c, "remove 0");
    assert_eq!(run(&mut c, "add todo Spare"), "Added todo plugin: Spare");
    let ids: Vec<_> = c.dashboard().widgets().iter().map(|w| w.id()).collect();
    assert_eq!(ids, [1, 2]);
}

#[test]
fn save_prints_the_snapshot() {
    let mut c = seeded();
    let text = run(&mut c, "save");
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["layout"]["gridSize"], 50);
    assert_eq!(value["plugins"][1]["type"], "clock");
    assert_eq!(value["plugins"][0]["width"], 200);
}

#[test]
fn every_line_enters_history() {
    let mut c = seeded();
    c.execute("nonsense");
    c.execute("");
    c.execute("list");
    assert_eq!(c.terminal().input().history(), ["nonsense", "", "list"]);
}
