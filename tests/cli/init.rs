use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert_eq!(stdout(&output), "✓ Created .tkmrc.json\n");

    let content = test.read_file(".tkmrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["input"], "src");
    assert_eq!(parsed["output"], "src/assets/i18n");
    assert_eq!(parsed["langs"], "en");
    assert!(parsed["keepFlat"].is_array());
    assert!(content.contains("\n  \"input\""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".tkmrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: .tkmrc.json already exists"));
    assert_eq!(test.read_file(".tkmrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_picked_up_by_extract() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/app.component.html",
        "<p>{{ 'app.name' | transloco }}</p>",
    )?;

    assert!(test.command().arg("init").output()?.status.success());
    assert!(test.extract_command().output()?.status.success());

    let en = test.read_json("src/assets/i18n/en.json")?;
    assert_eq!(en["app.name"], "Missing value for 'app.name'");

    Ok(())
}
