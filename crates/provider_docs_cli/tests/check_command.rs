use std::fs;
use std::path::Path;

use provider_docs_check::CheckKind;
use provider_docs_cli::cli::{check_tree, run_check, CheckArgs};
use provider_docs_cli::error::CliErrorCategory;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

const SCHEMA: &str = r#"{
  "format_version": "1.0",
  "provider_schemas": {
    "registry.terraform.io/acme/acme": {
      "resource_schemas": { "acme_widget": {}, "acme_gadget": {} },
      "data_source_schemas": { "acme_widget": {} }
    }
  }
}"#;

fn provider_checkout(root: &Path) -> std::path::PathBuf {
    let provider = root.join("terraform-provider-acme");
    write(&provider, "schema.json", SCHEMA);
    write(&provider, "docs/index.md", "---\npage_title: Acme Provider\n---\n");
    write(
        &provider,
        "docs/resources/widget.md",
        "---\nsubcategory: Widgets\n---\n\n```terraform\nresource \"acme_widget\" \"w\" {}\n```\n",
    );
    write(&provider, "docs/data-sources/widget.md", "---\nsubcategory: Widgets\n---\n");
    write(&provider, "docs/guides/start.md", "---\npage_title: Start\nsubcategory: Intro\n---\n");
    provider
}

#[test]
fn walks_loads_schema_and_reports_missing_docs() {
    let root = tempfile::tempdir().expect("tempdir");
    let provider = provider_checkout(root.path());
    let args = CheckArgs {
        path: provider.clone(),
        providers_schema_json: Some(provider.join("schema.json")),
        allowed_guide_subcategories: vec!["Getting Started".into()],
        ..CheckArgs::default()
    };

    let resolved = args.resolve().expect("resolve");
    assert_eq!(resolved.options.provider_name, "acme");
    let report = check_tree(resolved).expect("check");

    let found: Vec<(&str, CheckKind)> = report
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), v.check))
        .collect();
    assert_eq!(
        found,
        vec![
            ("docs/guides/start.md", CheckKind::DisallowedSubcategory),
            ("docs/resources/gadget.md", CheckKind::MissingDocumentation),
        ]
    );
    assert_eq!(report.files_checked(), 4);
}

#[test]
fn failing_run_writes_report_and_returns_validation_error() {
    let root = tempfile::tempdir().expect("tempdir");
    let provider = provider_checkout(root.path());
    let report_path = root.path().join("reports").join("docs.json");
    let args = CheckArgs {
        path: provider.clone(),
        providers_schema_json: Some(provider.join("schema.json")),
        report: Some(report_path.clone()),
        ..CheckArgs::default()
    };

    let err = run_check(&args).expect_err("gadget is undocumented");
    assert_eq!(err.category, CliErrorCategory::Validation);

    let body = fs::read_to_string(&report_path).expect("report written");
    let value: serde_json::Value = serde_json::from_str(&body).expect("json");
    assert_eq!(value["counts_by_check"]["missing-documentation"], 1);
}

#[test]
fn mixed_layouts_abort_the_run() {
    let root = tempfile::tempdir().expect("tempdir");
    write(root.path(), "docs/resources/a.md", "");
    write(root.path(), "website/docs/r/a.html.markdown", "");
    let args = CheckArgs {
        path: root.path().to_path_buf(),
        provider_name: Some("acme".into()),
        ..CheckArgs::default()
    };

    let err = check_tree(args.resolve().expect("resolve")).expect_err("mixed");
    assert_eq!(err.category, CliErrorCategory::Structure);
    assert!(err.message.contains("mixed"));
}
