use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
site:
  name: "Waju - Strong opinions, weakly held"
  description: "Personal blog"
  url: "https://olanrewaju.com.ng"
  title_template: "%s | Waju"
sources:
  - path: "content/posts/**/*.md"
    type_name: "Post"
    route: "/:slug"
feed:
  content_type: "Post"
  title: "Waju"
  feed_url: "https://olanrewaju.com.ng/feed.xml"
  site_url: "https://olanrewaju.com.ng"
css:
  pipeline: ["postcss-import", "postcss-nested", "tailwindcss"]
  purge:
    content: ["src/**/*.vue", "src/**/*.js"]
    extractors:
      - extractor: tailwind
        extensions: ["css", "vue", "js"]
    whitelist_patterns: ["shiki"]
"#;

fn write_project(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(root.join("src"))?;
    fs::create_dir_all(root.join("dist"))?;
    fs::write(root.join("waju.yml"), CONFIG)?;
    fs::write(
        root.join("src/App.vue"),
        r#"<template><main class="flex md:flex-row"></main></template>"#,
    )?;
    fs::write(
        root.join("dist/site.css"),
        r#".flex{display:flex}@media (min-width:768px){.md\:flex-row{flex-direction:row}}.shiki{color:#fff}.card{padding:1rem}"#,
    )?;
    Ok(())
}

#[allow(deprecated)]
fn waju() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("waju")?;
    cmd.env_remove("WAJU_BUILD_MODE");
    Ok(cmd)
}

#[test]
fn purge_production_json_reports_eliminated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    let assert = waju()?
        .current_dir(dir.path())
        .args([
            "purge",
            "--stylesheet",
            "dist/site.css",
            "--mode",
            "production",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["mode"], "production");
    assert_eq!(value["enabled"], true);
    assert_eq!(value["files_scanned"], 1);
    assert_eq!(value["eliminated"], serde_json::json!(["card"]));
    assert_eq!(value["whitelisted"], serde_json::json!(["shiki"]));
    assert_eq!(
        value["retained"],
        serde_json::json!(["flex", "md:flex-row", "shiki"])
    );

    Ok(())
}

#[test]
fn purge_mode_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    waju()?
        .current_dir(dir.path())
        .env("WAJU_BUILD_MODE", "production")
        .args(["purge", "--stylesheet", "dist/site.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed: card"));

    Ok(())
}

#[test]
fn purge_mode_accepts_short_names() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    waju()?
        .current_dir(dir.path())
        .env("WAJU_BUILD_MODE", "prod")
        .args(["purge", "--stylesheet", "dist/site.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed: card"));

    waju()?
        .current_dir(dir.path())
        .args(["purge", "--stylesheet", "dist/site.css", "--mode", "DEV"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Purge disabled in development mode"));

    waju()?
        .current_dir(dir.path())
        .args(["purge", "--stylesheet", "dist/site.css", "--mode", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown build mode 'staging'"));

    Ok(())
}

#[test]
fn purge_development_keeps_everything() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    waju()?
        .current_dir(dir.path())
        .args(["purge", "--stylesheet", "dist/site.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Purge disabled in development mode: keeping all 4 classes",
        ));

    Ok(())
}

#[test]
fn extract_json_lists_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("button.css"), ".btn:hover { color: #fff; }")?;

    let assert = waju()?
        .current_dir(dir.path())
        .args(["extract", "button.css", "--json"])
        .assert()
        .success();

    let value: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value[0]["category"], "stylesheet");
    assert_eq!(
        value[0]["tokens"],
        serde_json::json!(["btn:hover", "color:", "fff"])
    );

    Ok(())
}

#[test]
fn extract_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    waju()?
        .current_dir(dir.path())
        .args(["extract", "missing.vue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));

    Ok(())
}

#[test]
fn check_and_config_get() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;

    waju()?
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration OK: Waju - Strong opinions, weakly held",
        ));

    waju()?
        .current_dir(dir.path())
        .args(["config", "site.title_template"])
        .assert()
        .success()
        .stdout("%s | Waju\n");

    waju()?
        .current_dir(dir.path())
        .args(["config", "analytics.id"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn check_rejects_invalid_whitelist() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_project(dir.path())?;
    let broken = CONFIG.replace(r#"["shiki"]"#, r#"["(shiki"]"#);
    fs::write(dir.path().join("waju.yml"), broken)?;

    waju()?
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    Ok(())
}
