use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn sample_project() -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "classes/controller/main.json",
        r#"{ "Main": { "actions": ["index"] } }"#,
    );
    write(
        root,
        "classes/model/shop/item.json",
        r#"{ "Shop_Item": { "table": "shop_items" } }"#,
    );
    write(
        root,
        "classes/model/widget.json",
        r#"{ "Gizmo": { "table": "gizmos" } }"#,
    );
    write(
        root,
        "classes/view/home/index.json",
        r#"{ "Home_Index": { "title": "Home" } }"#,
    );
    write(root, "templates/home/index.template", "Welcome to {{ title }}, {{ who }}");
    write(root, "classes/view/empty.json", r#"{ "Empty": false }"#);
    temp_dir
}

fn autoloader(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("autoloader").unwrap();
    cmd.arg("--root").arg(root).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_resolve_controller() {
    let project = sample_project();
    autoloader(project.path())
        .args(["resolve", "controller", "Main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main"))
        .stdout(predicate::str::contains("index"));
}

#[test]
fn test_resolve_nested_model() {
    let project = sample_project();
    autoloader(project.path())
        .args(["resolve", "model", "Shop_Item"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop_items"))
        .stdout(predicate::str::contains("classes/model/shop/item.json"));
}

#[test]
fn test_missing_controller_is_generic() {
    let project = sample_project();
    autoloader(project.path())
        .args(["resolve", "controller", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("nope.json").not());
}

#[test]
fn test_model_definition_missing_names_file() {
    let project = sample_project();
    autoloader(project.path())
        .args(["resolve", "model", "Widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Widget not found!"))
        .stderr(predicate::str::contains("classes/model/widget.json"));
}

#[test]
fn test_vacuous_view_names_identifier() {
    let project = sample_project();
    autoloader(project.path())
        .args(["resolve", "view", "Empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"Empty\" not found!"));
}

#[test]
fn test_path_for_view() {
    let project = sample_project();
    autoloader(project.path())
        .args(["path", "view", "Home_Index"])
        .assert()
        .success()
        .stdout(predicate::str::contains("classes/view/home/index.json"))
        .stdout(predicate::str::contains("templates/home/index.template"));
}

#[test]
fn test_render_view_with_context() {
    let project = sample_project();
    autoloader(project.path())
        .args(["render", "Home_Index", "--context", r#"{ "who": "Ada" }"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Home, Ada"));
}

#[test]
fn test_render_rejects_non_object_context() {
    let project = sample_project();
    autoloader(project.path())
        .args(["render", "Home_Index", "--context", "[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_config_init_then_custom_root() {
    let project = sample_project();
    autoloader(project.path())
        .args(["config", "--init"])
        .assert()
        .success();
    assert!(project.path().join("autoloader.json").exists());

    write(
        project.path(),
        "autoloader.json",
        r#"{ "controller": { "search_root": "app/controllers" } }"#,
    );
    write(
        project.path(),
        "app/controllers/admin/users.json",
        r#"{ "Admin_Users": { "actions": ["list"] } }"#,
    );

    autoloader(project.path())
        .args(["resolve", "controller", "Admin_Users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"));

    autoloader(project.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("app/controllers/*.json"));
}
