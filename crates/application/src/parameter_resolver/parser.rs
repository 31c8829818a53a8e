//! Placeholder parser for `${NAME}` / `${NAME=DEFAULT}` syntax
//!
//! Parses strings to extract placeholder references with their positions.

use std::ops::Range;

/// Represents a parsed placeholder in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The variable name (without `${ }`).
    pub name: String,

    /// The inline default, if the token has `=`.
    pub default: Option<String>,

    /// Byte range in the original string where this token appears.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, default: Option<String>, span: Range<usize>) -> Self {
        Self {
            name: name.into(),
            default,
            span,
        }
    }

    /// Returns true if resolution fails when the variable is undefined.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Returns true if this placeholder is the entire `input`.
    #[must_use]
    pub const fn covers(&self, input: &str) -> bool {
        self.span.start == 0 && self.span.end == input.len()
    }
}

/// A token that starts with `${` but does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedToken {
    /// The raw token text.
    pub token: String,

    /// Byte range in the original string.
    pub span: Range<usize>,
}

/// Scans a string and returns every token in order, well-formed or not.
///
/// An unclosed `${` consumes the rest of the input and ends the scan.
///
/// # Examples
///
/// ```
/// use keel_application::parameter_resolver::parser::scan_placeholders;
///
/// let tokens = scan_placeholders("${GOOD} ${1BAD} ${ALSO_GOOD=x}");
/// assert_eq!(tokens.len(), 3);
/// assert!(tokens[0].is_ok());
/// assert!(tokens[1].is_err());
/// assert!(tokens[2].is_ok());
/// ```
#[must_use]
pub fn scan_placeholders(input: &str) -> Vec<Result<Placeholder, MalformedToken>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find("${") {
        let start = cursor + offset;
        let body_start = start + 2;

        let Some(close) = input[body_start..].find('}') else {
            tokens.push(Err(MalformedToken {
                token: input[start..].to_string(),
                span: start..input.len(),
            }));
            break;
        };

        let end = body_start + close + 1;
        let body = &input[body_start..end - 1];
        let (name, default) = match body.split_once('=') {
            Some((name, default)) => (name, Some(default.to_string())),
            None => (body, None),
        };

        if is_valid_name(name) {
            tokens.push(Ok(Placeholder::new(name, default, start..end)));
        } else {
            tokens.push(Err(MalformedToken {
                token: input[start..end].to_string(),
                span: start..end,
            }));
        }

        cursor = end;
    }

    tokens
}

/// Parses a string and extracts all placeholders.
///
/// Supports:
/// - `${NAME}` - required value
/// - `${NAME=DEFAULT}` - value with inline fallback (`DEFAULT` may be empty)
///
/// # Errors
///
/// Returns the first token that starts with `${` but is not a valid placeholder.
///
/// # Examples
///
/// ```
/// use keel_application::parameter_resolver::parser::parse_placeholders;
///
/// let refs = parse_placeholders("${AZURE_ENV_NAME}-${SUFFIX=app}").unwrap();
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].name, "AZURE_ENV_NAME");
/// assert_eq!(refs[1].default.as_deref(), Some("app"));
/// ```
pub fn parse_placeholders(input: &str) -> Result<Vec<Placeholder>, MalformedToken> {
    scan_placeholders(input).into_iter().collect()
}

/// Validates a variable name: `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns true if the input string may contain placeholders.
#[must_use]
pub fn has_placeholders(input: &str) -> bool {
    input.contains("${")
}

/// Extracts the names of all well-formed placeholders.
#[must_use]
pub fn referenced_names(input: &str) -> Vec<String> {
    scan_placeholders(input)
        .into_iter()
        .filter_map(Result::ok)
        .map(|p| p.name)
        .collect()
}
