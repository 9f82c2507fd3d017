//! Fenced code block checks for resource-like documents.

use crate::options::{ContentOptions, ExamplePolicy};
use crate::violation::{CheckKind, Violation};

/// Tags that mark a block as provider configuration, whichever spelling is used.
pub const CONFIG_LANGUAGE_TAGS: &[&str] = &["terraform", "hcl", "tf"];

const DECLARATION_KEYWORDS: &[&str] = &["resource", "data", "ephemeral"];

/// A fenced code block. `line` is the 1-based line of the opening fence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub line: usize,
    pub language: String,
    pub body: String,
}

struct Fence {
    marker: char,
    width: usize,
    info: String,
}

fn parse_fence(line: &str) -> Option<Fence> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let width = rest.chars().take_while(|c| *c == marker).count();
    if width < 3 {
        return None;
    }
    let info = rest[width..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(Fence {
        marker,
        width,
        info: info.to_string(),
    })
}

/// Extract fenced code blocks. The second value is the opening line of an unclosed fence.
pub fn extract_code_blocks(content: &str) -> (Vec<CodeBlock>, Option<usize>) {
    let mut blocks = Vec::new();
    let mut open: Option<(Fence, usize)> = None;
    let mut buffer: Vec<&str> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let fence = parse_fence(line);
        let Some((opening, start)) = open.as_ref() else {
            if let Some(fence) = fence {
                open = Some((fence, line_no));
                buffer.clear();
            }
            continue;
        };
        let closes = fence.is_some_and(|fence| {
            fence.marker == opening.marker && fence.width >= opening.width && fence.info.is_empty()
        });
        if !closes {
            buffer.push(line);
            continue;
        }
        let language = opening
            .info
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        blocks.push(CodeBlock {
            line: *start,
            language,
            body: buffer.join("\n"),
        });
        open = None;
        buffer.clear();
    }

    (blocks, open.map(|(_, start)| start))
}

/// Content policy for one document kind.
pub struct ContentCheck<'a> {
    options: &'a ContentOptions,
    provider_name: &'a str,
}

impl<'a> ContentCheck<'a> {
    /// Create a check for one kind's content options.
    pub fn new(options: &'a ContentOptions, provider_name: &'a str) -> Self {
        Self {
            options,
            provider_name,
        }
    }

    /// Check `content` for code block language, example count, and example naming.
    pub fn run(
        &self,
        path: &str,
        content: &str,
        example_language: &str,
        subcategory: &str,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        let (blocks, unclosed) = extract_code_blocks(content);
        if let Some(line) = unclosed {
            violations.push(Violation::new(
                path,
                CheckKind::InvalidCodeBlockLanguage,
                format!("unclosed code fence starting at line {line}"),
            ));
        }

        let expected = example_language.to_ascii_lowercase();
        let accepted: Vec<String> = std::iter::once(expected.clone())
            .chain(
                self.options
                    .language_aliases
                    .iter()
                    .map(|alias| alias.to_ascii_lowercase()),
            )
            .collect();

        let mut examples = 0usize;
        for block in &blocks {
            let language = block.language.to_ascii_lowercase();
            if language.is_empty() {
                if self.options.require_code_block_language {
                    violations.push(Violation::new(
                        path,
                        CheckKind::InvalidCodeBlockLanguage,
                        format!(
                            "code block starting at line {} has no language, expected `{expected}` for configuration examples",
                            block.line
                        ),
                    ));
                }
                continue;
            }
            if accepted.contains(&language) {
                examples += 1;
                violations.extend(self.naming_violations(path, block));
                continue;
            }
            if CONFIG_LANGUAGE_TAGS.contains(&language.as_str()) {
                violations.push(Violation::new(
                    path,
                    CheckKind::InvalidCodeBlockLanguage,
                    format!(
                        "code block starting at line {} uses language `{}`, expected `{expected}`",
                        block.line, block.language
                    ),
                ));
            }
        }

        if self
            .options
            .example_exempt_subcategories
            .iter()
            .any(|exempt| exempt == subcategory)
        {
            tracing::debug!(path, subcategory, "skipping example policy");
        } else {
            violations.extend(self.example_violation(path, &expected, examples));
        }

        violations
    }

    fn example_violation(&self, path: &str, expected: &str, found: usize) -> Option<Violation> {
        let wanted = match self.options.example_policy {
            ExamplePolicy::None => return None,
            ExamplePolicy::AtLeastOne if found > 0 => return None,
            ExamplePolicy::AtLeastOne => {
                return Some(Violation::new(
                    path,
                    CheckKind::MissingExample,
                    format!("no `{expected}` code block examples found, expected at least one"),
                ));
            }
            ExamplePolicy::Exactly(wanted) => wanted,
        };
        if found == wanted {
            return None;
        }
        if found == 0 {
            return Some(Violation::new(
                path,
                CheckKind::MissingExample,
                format!("no `{expected}` code block examples found, expected {wanted}"),
            ));
        }
        Some(Violation::new(
            path,
            CheckKind::ExampleCountMismatch,
            format!("found {found} `{expected}` code block examples, expected {wanted}"),
        ))
    }

    fn naming_violations(&self, path: &str, block: &CodeBlock) -> Vec<Violation> {
        if self.provider_name.is_empty() {
            return Vec::new();
        }
        let prefix = format!("{}_", self.provider_name);
        let mut violations = Vec::new();

        for (offset, line) in block.body.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };
            if !DECLARATION_KEYWORDS.contains(&keyword) {
                continue;
            }
            let Some(type_token) = tokens.next().filter(|t| t.starts_with('"')) else {
                continue;
            };
            let type_name = type_token.trim_matches('"');
            if type_name.starts_with(&prefix) {
                continue;
            }
            let violation = Violation::new(
                path,
                CheckKind::NamingConventionMismatch,
                format!(
                    "example at line {} declares {keyword} \"{type_name}\", expected a `{prefix}` prefixed type",
                    block.line + offset + 1
                ),
            )
            .with_severity(self.options.naming_severity);
            tracing::warn!(%violation, "naming convention mismatch");
            violations.push(violation);
        }

        violations
    }
}
