use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

const HOME_COMPONENT: &str = r#"
import { Component } from '@angular/core';
import { TranslocoService } from '@ngneat/transloco';

@Component({ selector: 'app-home', templateUrl: './home.component.html' })
export class HomeComponent {
  constructor(private translate: TranslocoService) {}

  ngOnInit() {
    this.title = this.translate.translate('home.title');
  }
}
"#;

const HOME_TEMPLATE: &str = r#"<h1>{{ title }}</h1>
<h2>{{ 'home.subtitle' | transloco }}</h2>
"#;

fn home_project() -> Result<CliTest> {
    let test = CliTest::with_file("src/app/home/home.component.ts", HOME_COMPONENT)?;
    test.write_file("src/app/home/home.component.html", HOME_TEMPLATE)?;
    Ok(test)
}

#[test]
fn test_extract_creates_translation_files() -> Result<()> {
    let test = home_project()?;

    let output = test
        .extract_command()
        .args(["--langs", "en,fr", "--output", "i18n"])
        .output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Extracting translation keys for 2 languages\n\
         ✓ Extracted 2 keys from 2 files\n\
         ✓ Created 2 translation files\n\
         Done\n"
    );

    insta::assert_snapshot!(test.read_file("i18n/en.json")?, @r#"
    {
      "home.title": "Missing value for 'home.title'",
      "home.subtitle": "Missing value for 'home.subtitle'"
    }
    "#);
    assert_eq!(test.read_file("i18n/fr.json")?, test.read_file("i18n/en.json")?);

    Ok(())
}

#[test]
fn test_extract_keeps_existing_translations() -> Result<()> {
    let test = home_project()?;
    test.write_file("i18n/en.json", r#"{ "home.title": "Welcome" }"#)?;

    let output = test
        .extract_command()
        .args(["--langs", "en,fr", "--output", "i18n/"])
        .output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("✓ Merged 1 existing translation file\n"));
    assert_eq!(
        test.read_json("i18n/en.json")?,
        json!({
            "home.title": "Welcome",
            "home.subtitle": "Missing value for 'home.subtitle'"
        })
    );
    assert_eq!(
        test.read_json("i18n/fr.json")?["home.title"],
        "Missing value for 'home.title'"
    );

    Ok(())
}

#[test]
fn test_extract_replace_overwrites_existing_values() -> Result<()> {
    let test = home_project()?;
    test.write_file("i18n/en.json", r#"{ "home.title": "Welcome" }"#)?;

    let output = test
        .extract_command()
        .args(["--output", "i18n", "--default-value", "", "--replace"])
        .output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        test.read_json("i18n/en.json")?,
        json!({ "home.title": "", "home.subtitle": "" })
    );

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = home_project()?;

    test.extract_command().args(["--langs", "en,fr"]).output()?;
    let first = test.read_file("src/assets/i18n/fr.json")?;
    let output = test.extract_command().args(["--langs", "en,fr"]).output()?;
    let second = test.read_file("src/assets/i18n/fr.json")?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Merged 2 existing translation files\n"));
    assert!(!stdout(&output).contains("Created"));
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_extract_with_scope_mapping() -> Result<()> {
    let test = CliTest::with_file(
        "transloco.config.js",
        r#"module.exports = {
  rootTranslationsPath: 'i18n/',
  scopeMapping: {
    'todos-page': 'todos-page',
    'modules/admin': 'admin'
  }
};
"#,
    )?;
    test.write_file(
        "src/app/todos/todos.component.html",
        r#"<ng-container *transloco="let t; read: 'todosPage'">
  <h1>{{ t.title }}</h1>
  <p>{{ t('list.empty') }}</p>
</ng-container>
<ng-template transloco let-tr translocoRead="admin">
  <span>{{ tr.users }}</span>
</ng-template>
<footer>{{ 'footer.copyright' | transloco }}</footer>
"#,
    )?;
    test.write_file(
        ".tkmrc.json",
        r#"{ "output": "i18n", "translocoConfig": "transloco.config.js" }"#,
    )?;

    let output = test.extract_command().arg("-v").output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        test.read_json("i18n/en.json")?,
        json!({ "footer.copyright": "Missing value for 'footer.copyright'" })
    );
    assert_eq!(
        test.read_json("i18n/todos-page/en.json")?,
        json!({
            "title": "Missing value for 'todosPage.title'",
            "list.empty": "Missing value for 'todosPage.list.empty'"
        })
    );
    assert_eq!(
        test.read_json("i18n/admin/en.json")?,
        json!({ "users": "Missing value for 'admin.users'" })
    );
    assert!(stdout(&output).contains("  + todos-page/en.json\n"));

    Ok(())
}

#[test]
fn test_extract_keep_flat() -> Result<()> {
    let test = CliTest::with_file(
        "src/app/errors.component.html",
        r#"<p>{{ 'errors.http.notFound' | transloco }}</p>
<p>{{ 'home.title' | transloco }}</p>
"#,
    )?;

    let output = test
        .extract_command()
        .args(["--output", "i18n", "--keep-flat", "errors"])
        .output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        test.read_json("i18n/en.json")?,
        json!({
            "errors.http.notFound": "",
            "home.title": "Missing value for 'home.title'"
        })
    );
    assert!(!test.root().join("i18n/errors").exists());

    Ok(())
}

#[test]
fn test_extract_explicit_files() -> Result<()> {
    let test = home_project()?;

    let output = test
        .extract_command()
        .args(["--output", "i18n", "src/app/home/home.component.ts"])
        .output()?;

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        test.read_json("i18n/en.json")?,
        json!({ "home.title": "Missing value for 'home.title'" })
    );

    Ok(())
}

#[test]
fn test_extract_malformed_scope_mapping_fails() -> Result<()> {
    let test = home_project()?;
    test.write_file("transloco.config.ts", "export default { scopeMapping: { todos: todosPage } };")?;

    let output = test
        .extract_command()
        .args(["--transloco-config", "transloco.config.ts", "--output", "i18n"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: "));
    assert!(stderr(&output).contains("Invalid scopeMapping declaration"));
    assert!(!test.root().join("i18n").exists());

    Ok(())
}

#[test]
fn test_extract_malformed_existing_file_fails() -> Result<()> {
    let test = home_project()?;
    test.write_file("i18n/en.json", "{ \"home.title\": ")?;

    let output = test.extract_command().args(["--output", "i18n"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse JSON"));
    assert_eq!(test.read_file("i18n/en.json")?, "{ \"home.title\": ");

    Ok(())
}

#[test]
fn test_extract_invalid_config_fails() -> Result<()> {
    let test = home_project()?;
    test.write_file(".tkmrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));

    Ok(())
}
