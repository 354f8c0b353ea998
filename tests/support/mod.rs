use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

use roibot_core::config::ENV_KEYS;

/// Logging overrides read by `init_tracing`
const LOG_ENV_KEYS: &[&str] = &["RUST_LOG", "ROIBOT_LOG"];

/// Get a Command for roibot with none of the developer's roibot environment
pub fn roibot() -> Command {
    let mut cmd = cargo_bin_cmd!("roibot");
    for key in ENV_KEYS.iter().chain(LOG_ENV_KEYS) {
        cmd.env_remove(key);
    }
    cmd
}

/// Write a small KB directory with one problem, lever and story
#[allow(dead_code)]
pub fn write_small_kb(dir: &Path) {
    fs::write(
        dir.join("problemToUseCases.json"),
        r#"{ "Slow checkout": ["Streamline Checkout"] }"#,
    )
    .unwrap();
    fs::write(
        dir.join("problemSynonyms.json"),
        r#"{ "Slow checkout": ["cart abandonment"] }"#,
    )
    .unwrap();
    fs::write(
        dir.join("leverCatalog.json"),
        r#"{ "checkout": { "label": "Checkout Guides", "modules": ["Guides"], "useCases": ["Streamline Checkout"] } }"#,
    )
    .unwrap();
    fs::write(
        dir.join("customerStories.json"),
        r#"[ { "story": "Acme fixed checkout", "customer": "Acme", "industry": "Retail",
              "useCase": "Streamline Checkout", "results": "", "modules": ["Guides"],
              "url": "https://example.com/acme" } ]"#,
    )
    .unwrap();
}
