//! End-to-end purge planning from a config file on disk.

use std::fs;
use tempfile::tempdir;
use waju_core::{BuildMode, Config, Purger};

const CONFIG: &str = r#"
site:
  name: "Waju"
  description: "Desc"
  url: "https://example.com"
  title_template: "%s | Waju"
css:
  pipeline: ["postcss-import", "postcss-nested", "tailwindcss"]
  purge:
    content: ["src/assets/**/*.css", "src/**/*.vue", "src/**/*.js"]
    extractors:
      - extractor: tailwind
        extensions: ["css", "vue", "js"]
    whitelist_patterns: ["shiki"]
"#;

const STYLESHEET: &str = r#"
.flex { display: flex }
@media (min-width: 768px) { .md\:flex-row { flex-direction: row } }
.hidden { display: none }
.w-1\/2 { width: 50% }
.shiki { background: #24292e }
.unused-card { padding: 1rem }
"#;

fn project() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src/components")).unwrap();
    fs::create_dir_all(root.join("src/assets")).unwrap();
    fs::write(root.join("waju.yml"), CONFIG).unwrap();
    fs::write(
        root.join("src/components/Layout.vue"),
        "<template><div class=\"flex md:flex-row\"><aside class=\"w-1/2\"/></div></template>",
    )
    .unwrap();
    fs::write(root.join("src/main.js"), "document.body.classList.toggle('hidden')").unwrap();
    fs::write(root.join("src/assets/site.css"), STYLESHEET).unwrap();
    dir
}

#[test]
fn production_eliminates_unused_classes() {
    let dir = project();
    let config = Config::from_file(dir.path().join("waju.yml")).unwrap();
    config.validate().unwrap();

    let purger = Purger::from_config(&config).unwrap();
    let report = purger
        .run_file(BuildMode::Production, std::path::Path::new("src/assets/site.css"))
        .unwrap();

    assert!(report.enabled);
    assert_eq!(report.files_scanned, 3);
    assert_eq!(report.defined, 6);
    assert!(report.retained.contains("md:flex-row"));
    assert!(report.retained.contains("w-1/2"));
    assert!(report.retained.contains("hidden"));
    // src/assets/site.css is part of the content globs, so every class it
    // defines is also a candidate
    assert!(report.retained.contains("unused-card"));
    assert!(report.whitelisted.is_empty());
    assert!(report.eliminated.is_empty());
}

#[test]
fn production_without_stylesheet_in_content() {
    let dir = project();
    let mut config = Config::from_file(dir.path().join("waju.yml")).unwrap();
    config.css.purge.content = vec!["src/**/*.vue".into(), "src/**/*.js".into()];

    let purger = Purger::from_config(&config).unwrap();
    let css = fs::read_to_string(dir.path().join("src/assets/site.css")).unwrap();
    let report = purger.run(BuildMode::Production, &css);

    assert_eq!(report.files_scanned, 2);
    assert_eq!(
        report.eliminated.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["unused-card"]
    );
    assert_eq!(report.retained.len(), 5);
}

#[test]
fn development_skips_scanning() {
    let dir = project();
    let config = Config::from_file(dir.path().join("waju.yml")).unwrap();
    let purger = Purger::from_config(&config).unwrap();

    let report = purger.run(BuildMode::Development, STYLESHEET);

    assert!(!report.enabled);
    assert_eq!(report.files_scanned, 0);
    assert_eq!(report.retained.len(), 6);
    assert!(report.eliminated.is_empty());
}

#[test]
fn missing_stylesheet_is_an_error() {
    let dir = project();
    let config = Config::from_file(dir.path().join("waju.yml")).unwrap();
    let purger = Purger::from_config(&config).unwrap();

    let err = purger
        .run_file(BuildMode::Production, std::path::Path::new("nope.css"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read stylesheet"));
}

#[test]
fn shipped_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../waju.yml");
    let config = Config::from_file(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.page_title("Hello"), "Hello | Waju");
    assert_eq!(config.sources[0].refs.len(), 2);
    assert_eq!(config.css.purge.whitelist_patterns, vec!["shiki"]);
    assert_eq!(
        config.feed.as_ref().unwrap().item_url("vue-tips"),
        "https://olanrewaju.com.ng/vue-tips"
    );
    assert_eq!(config.get("analytics.id").as_deref(), Some("UA-145243170-1"));
}
