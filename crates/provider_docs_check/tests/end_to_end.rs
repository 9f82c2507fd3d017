use std::fs;
use std::path::Path;

use provider_docs_check::{
    Check, CheckKind, CheckOptions, DirectoryMapping, ExamplePolicy, FsSource,
    ProviderIdentifiers, ResourceKind, Severity,
};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write doc");
}

fn mapping(entries: &[(&str, &[&str])]) -> DirectoryMapping {
    entries
        .iter()
        .map(|(directory, files)| {
            (
                directory.to_string(),
                files.iter().map(|file| file.to_string()).collect(),
            )
        })
        .collect()
}

const INSTANCE: &str = r#"---
page_title: "aws_instance Resource"
subcategory: "EC2"
---

# Resource: aws_instance

## Example Usage

```terraform
resource "aws_instance" "web" {
  ami = "ami-123"
}
```
"#;

const BUCKET: &str = r#"---
page_title: "aws_s3_bucket Resource"
subcategory: "S3"
layout: "aws"
---

```hcl
resource "google_storage_bucket" "b" {}
```
"#;

#[test]
fn registry_tree_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "docs/index.md", "---\npage_title: AWS Provider\n---\n");
    write(root, "docs/resources/instance.md", INSTANCE);
    write(root, "docs/resources/s3_bucket.md", BUCKET);
    write(root, "docs/resources/.DS_Store", "");
    write(root, "docs/functions/arn_parse.md", "---\npage_title: arn_parse\n---\n");

    let mut options = CheckOptions {
        provider_name: "aws".into(),
        ..CheckOptions::default()
    };
    options.resource.contents.example_policy = ExamplePolicy::AtLeastOne;
    let identifiers = ProviderIdentifiers::new()
        .with(ResourceKind::Resource, ["aws_instance", "aws_s3_bucket", "aws_vpc"])
        .with(ResourceKind::Function, ["arn_parse"]);

    let check = Check::new(options, identifiers, FsSource::new(root));
    let report = check
        .run(&mapping(&[
            ("docs", &["index.md"]),
            ("docs/functions", &["arn_parse.md"]),
            ("docs/resources", &[".DS_Store", "instance.md", "s3_bucket.md"]),
        ]))
        .expect("valid structure");

    let found: Vec<(&str, CheckKind)> = report
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), v.check))
        .collect();
    assert_eq!(
        found,
        vec![
            ("docs/resources/s3_bucket.md", CheckKind::ForbiddenFieldPresent),
            ("docs/resources/s3_bucket.md", CheckKind::InvalidCodeBlockLanguage),
            ("docs/resources/s3_bucket.md", CheckKind::MissingExample),
            ("docs/resources/vpc.md", CheckKind::MissingDocumentation),
        ]
    );
    assert_eq!(report.files_checked(), 4);
    assert_eq!(report.error_count(), 4);
}

#[test]
fn naming_deviation_is_a_warning_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(
        root,
        "docs/resources/instance.md",
        "---\npage_title: x\n---\n\n```terraform\nresource \"random_id\" \"x\" {}\n```\n",
    );

    let options = CheckOptions {
        provider_name: "aws".into(),
        ..CheckOptions::default()
    };
    let check = Check::new(options, ProviderIdentifiers::new(), FsSource::new(root));
    let report = check
        .run(&mapping(&[("docs/resources", &["instance.md"])]))
        .expect("valid structure");

    assert!(report.is_success());
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].check, CheckKind::NamingConventionMismatch);
    assert_eq!(warnings[0].severity, Severity::Warning);
}

#[test]
fn file_removed_after_listing_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    write(root, "website/docs/r/instance.html.markdown", "description: d\nlayout: aws\npage_title: p\n");

    let check = Check::new(
        CheckOptions::default(),
        ProviderIdentifiers::new(),
        FsSource::new(root),
    );
    let report = check
        .run(&mapping(&[(
            "website/docs/r",
            &["instance.html.markdown", "gone.html.markdown"],
        )]))
        .expect("valid structure");

    let found: Vec<(&str, CheckKind)> = report
        .violations()
        .iter()
        .map(|v| (v.path.as_str(), v.check))
        .collect();
    assert_eq!(found, vec![("website/docs/r/gone.html.markdown", CheckKind::FileRead)]);
}
