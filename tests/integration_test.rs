use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn leaflet_cmd(db: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_leaflet"));
    cmd.arg("--db").arg(db);
    cmd
}

fn test_db(tmp: &TempDir) -> PathBuf {
    tmp.path().join("notes.db")
}

#[test]
fn test_add_creates_note() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "Grocery List", "--content", "milk, eggs"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created note"));
    assert!(stdout.contains("Grocery List"));
    assert!(db.exists());
}

#[test]
fn test_add_empty_title_fails() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "   "])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Title must not be empty"));
}

#[test]
fn test_list_empty() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db).args(["list"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No notes found"));
}

#[test]
fn test_list_orders_most_recent_first() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db).args(["add", "First"]).output().unwrap();
    leaflet_cmd(&db).args(["add", "Second"]).output().unwrap();

    let output = leaflet_cmd(&db).args(["list"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let first_pos = stdout.find("First").unwrap();
    let second_pos = stdout.find("Second").unwrap();
    assert!(second_pos < first_pos, "most recent note should lead");
}

#[test]
fn test_list_json_output() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db)
        .args(["add", "Tagged", "--tag", "alpha", "--tag", "beta"])
        .output()
        .unwrap();

    let output = leaflet_cmd(&db).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["title"], "Tagged");
    assert_eq!(parsed[0]["tags"], serde_json::json!(["alpha", "beta"]));
    assert_eq!(parsed[0]["is_important"], false);
}

#[test]
fn test_add_dedupes_tags() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db)
        .args(["add", "Dup", "--tag", "x", "--tag", "x", "--tag", "y"])
        .output()
        .unwrap();

    let output = leaflet_cmd(&db).args(["list", "--json"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["tags"], serde_json::json!(["x", "y"]));
}

#[test]
fn test_show_by_id_prefix() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "Detail note", "--content", "the body", "--json"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = parsed["id"].as_str().unwrap();

    let output = leaflet_cmd(&db)
        .args(["show", &id[..8]])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Detail note"));
    assert!(stdout.contains("the body"));
}

#[test]
fn test_show_missing_fails() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["show", "deadbeef"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found"));
}

#[test]
fn test_edit_note() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "Original", "--tag", "old", "--json"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let added: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = added["id"].as_str().unwrap().to_string();

    let output = leaflet_cmd(&db)
        .args([
            "edit",
            &id,
            "--title",
            "Renamed",
            "--tag",
            "new",
            "--remove-tag",
            "old",
            "--important",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let edited: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(edited["id"], id.as_str());
    assert_eq!(edited["title"], "Renamed");
    assert_eq!(edited["tags"], serde_json::json!(["new"]));
    assert_eq!(edited["is_important"], true);
    assert_eq!(edited["created_at"], added["created_at"]);

    let before =
        chrono::DateTime::parse_from_rfc3339(added["updated_at"].as_str().unwrap()).unwrap();
    let after =
        chrono::DateTime::parse_from_rfc3339(edited["updated_at"].as_str().unwrap()).unwrap();
    assert!(after > before, "edit must advance updated_at");
}

#[test]
fn test_archive_hides_from_default_list() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "Shelved", "--json"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = parsed["id"].as_str().unwrap().to_string();

    leaflet_cmd(&db)
        .args(["edit", &id, "--archive"])
        .output()
        .unwrap();

    let output = leaflet_cmd(&db).args(["list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Shelved"));

    let output = leaflet_cmd(&db).args(["list", "--archived"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shelved"));
    assert!(stdout.contains("[archived]"));
}

#[test]
fn test_delete_with_force() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db).args(["add", "To Be Deleted"]).output().unwrap();

    let output = leaflet_cmd(&db)
        .args(["list", "--json"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = parsed[0]["id"].as_str().unwrap().to_string();

    let output = leaflet_cmd(&db)
        .args(["delete", &id, "--force"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted"));

    let output = leaflet_cmd(&db).args(["list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No notes found"));
}

#[test]
fn test_delete_nonexistent_fails() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["delete", "deadbeef", "--force"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found"));
}

#[test]
fn test_delete_without_force_non_interactive_fails() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    let output = leaflet_cmd(&db)
        .args(["add", "Kept", "--json"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = parsed["id"].as_str().unwrap().to_string();

    let output = leaflet_cmd(&db).args(["delete", &id]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--force"));

    // Still there.
    let output = leaflet_cmd(&db).args(["list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kept"));
}

#[test]
fn test_search_case_insensitive_substring() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db)
        .args(["add", "Grocery List", "--content", "milk"])
        .output()
        .unwrap();
    leaflet_cmd(&db)
        .args(["add", "Meeting notes", "--content", "standup"])
        .output()
        .unwrap();

    for query in ["grocery", "LIST", "ery li"] {
        let output = leaflet_cmd(&db).args(["search", query]).output().unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Grocery List"), "query {:?}", query);
        assert!(!stdout.contains("Meeting notes"), "query {:?}", query);
    }
}

#[test]
fn test_search_by_tag() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db)
        .args(["add", "Dinner ideas", "--tag", "Recipes"])
        .output()
        .unwrap();

    let output = leaflet_cmd(&db).args(["search", "recipe"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dinner ideas"));
}

#[test]
fn test_search_no_results() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db).args(["add", "Something"]).output().unwrap();

    let output = leaflet_cmd(&db)
        .args(["search", "nonexistent"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No results found"));
}

#[test]
fn test_search_blank_query_lists_everything() {
    let tmp = TempDir::new().unwrap();
    let db = test_db(&tmp);

    leaflet_cmd(&db).args(["add", "One"]).output().unwrap();
    leaflet_cmd(&db).args(["add", "Two"]).output().unwrap();

    let output = leaflet_cmd(&db)
        .args(["search", "", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}
