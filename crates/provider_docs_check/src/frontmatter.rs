//! Front matter extraction and field policy.
//!
//! A document may open with a YAML block delimited by `---` lines. Without a delimiter the text
//! up to the first `---` line is read as YAML, which is how bare metadata files are accepted.
//! When undelimited text parses but is not a mapping (ordinary Markdown prose), the document is
//! treated as having no front matter.

use serde_yaml::{Mapping, Value};

use crate::options::{FieldPolicy, FrontMatterField, FrontMatterOptions};
use crate::violation::{CheckKind, Violation};

const FRONTMATTER_DELIM: &str = "---";

/// Known front matter fields. Unknown keys are accepted and ignored.
///
/// A field is present when its key exists. Scalar values of any type are kept as text, so
/// `page_title: 2024` reads as `"2024"` and a key with no value reads as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub description: Option<String>,
    pub layout: Option<String>,
    pub page_title: Option<String>,
    pub sidebar_current: Option<String>,
    pub subcategory: Option<String>,
}

impl FrontMatter {
    /// Pick the known fields out of a parsed YAML mapping.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let text = |field: FrontMatterField| mapping.get(field.key()).map(value_text);
        Self {
            description: text(FrontMatterField::Description),
            layout: text(FrontMatterField::Layout),
            page_title: text(FrontMatterField::PageTitle),
            sidebar_current: text(FrontMatterField::SidebarCurrent),
            subcategory: text(FrontMatterField::Subcategory),
        }
    }

    /// Value of `field`, when its key is present.
    pub fn field(&self, field: FrontMatterField) -> Option<&str> {
        let value = match field {
            FrontMatterField::Description => &self.description,
            FrontMatterField::Layout => &self.layout,
            FrontMatterField::PageTitle => &self.page_title,
            FrontMatterField::SidebarCurrent => &self.sidebar_current,
            FrontMatterField::Subcategory => &self.subcategory,
        };
        value.as_deref()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Tagged(tagged) => value_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Outcome of a front matter check that got past parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrontMatterOutcome {
    /// `subcategory` value, empty when absent.
    pub subcategory: String,
    pub violations: Vec<Violation>,
}

struct RawBlock<'a> {
    text: &'a str,
    delimited: bool,
}

fn extract_block(content: &str) -> RawBlock<'_> {
    let mut offset = 0usize;
    let mut opened_at: Option<usize> = None;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        let line_end = offset + line.len();
        match opened_at {
            None if trimmed.is_empty() => {}
            None if trimmed == FRONTMATTER_DELIM => opened_at = Some(line_end),
            None => break,
            Some(start) if trimmed == FRONTMATTER_DELIM => {
                return RawBlock {
                    text: &content[start..offset],
                    delimited: true,
                };
            }
            Some(_) => {}
        }
        offset = line_end;
    }

    if let Some(start) = opened_at {
        return RawBlock {
            text: &content[start..],
            delimited: true,
        };
    }

    // No opening delimiter: everything before the first `---` line.
    let mut end = 0usize;
    for line in content.split_inclusive('\n') {
        if line.trim() == FRONTMATTER_DELIM {
            break;
        }
        end += line.len();
    }
    RawBlock {
        text: &content[..end],
        delimited: false,
    }
}

fn is_blank_yaml(text: &str) -> bool {
    text.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    })
}

/// Parse the leading metadata block. An absent block yields empty metadata.
pub fn parse_front_matter(content: &str) -> Result<FrontMatter, String> {
    let block = extract_block(content);
    if is_blank_yaml(block.text) {
        return Ok(FrontMatter::default());
    }
    let value: Value = serde_yaml::from_str(block.text)
        .map_err(|err| format!("error parsing YAML frontmatter: {err}"))?;
    match value {
        Value::Null => Ok(FrontMatter::default()),
        Value::Mapping(mapping) => Ok(FrontMatter::from_mapping(&mapping)),
        _ if !block.delimited => Ok(FrontMatter::default()),
        _ => Err("error parsing YAML frontmatter: expected a mapping of fields".to_string()),
    }
}

/// Check raw file bytes against a front matter policy.
///
/// `Err` means the metadata could not be parsed; callers skip checks that depend on it.
pub fn check_front_matter(
    path: &str,
    content: &[u8],
    options: &FrontMatterOptions,
) -> Result<FrontMatterOutcome, Violation> {
    let text = std::str::from_utf8(content).map_err(|err| {
        Violation::new(
            path,
            CheckKind::MalformedMetadata,
            format!("file is not valid UTF-8: {err}"),
        )
    })?;
    let front_matter = parse_front_matter(text)
        .map_err(|message| Violation::new(path, CheckKind::MalformedMetadata, message))?;

    let mut violations = Vec::new();
    for field in FrontMatterField::ALL {
        let present = front_matter.field(field).is_some();
        match (options.policy(field), present) {
            (FieldPolicy::Required, false) => violations.push(Violation::new(
                path,
                CheckKind::MissingRequiredField,
                format!("YAML frontmatter missing required {}", field.key()),
            )),
            (FieldPolicy::Forbidden, true) => violations.push(Violation::new(
                path,
                CheckKind::ForbiddenFieldPresent,
                format!("YAML frontmatter should not contain {}", field.key()),
            )),
            _ => {}
        }
    }

    let subcategory = front_matter.subcategory.unwrap_or_default();
    if !options.allowed_subcategories.is_empty()
        && !subcategory.is_empty()
        && !options.allowed_subcategories.contains(&subcategory)
    {
        violations.push(Violation::new(
            path,
            CheckKind::DisallowedSubcategory,
            format!(
                "YAML frontmatter subcategory ({subcategory}) does not match allowed subcategories: {:?}",
                options.allowed_subcategories
            ),
        ));
    }

    Ok(FrontMatterOutcome {
        subcategory,
        violations,
    })
}
