//! Bicep `param` declaration scanner.

use std::sync::LazyLock;

use keel_domain::{ParameterType, ParameterTypes};
use regex::Regex;
use tracing::warn;

#[allow(clippy::expect_used)]
static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*param\s+([A-Za-z_][A-Za-z0-9_]*)\s+([A-Za-z_][A-Za-z0-9_.]*)(\[\])?")
        .expect("valid param regex")
});

#[allow(clippy::expect_used)]
static SECURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@(?:sys\.)?secure\(\s*\)").expect("valid secure regex"));

/// Scans Bicep source for top-level `param <name> <type>` declarations.
///
/// A `@secure()` decorator on the lines above a declaration upgrades `string`
/// to `securestring` and `object` to `secureObject`. Declarations whose type
/// is not a built-in (user-defined types, resource types) are skipped.
#[must_use]
pub fn scan_parameter_types(source: &str) -> ParameterTypes {
    let mut types = ParameterTypes::new();
    let mut secure = false;
    let mut depth = 0_usize;

    for (index, line) in source.lines().enumerate() {
        // Lines inside an open `(`, `[` or `{` continue the previous statement.
        let continued = depth > 0;
        depth = depth.saturating_add_signed(bracket_delta(line));
        if continued {
            continue;
        }

        if SECURE_RE.is_match(line) {
            secure = true;
            continue;
        }

        let Some(captures) = PARAM_RE.captures(line) else {
            let trimmed = line.trim_start();
            if !(trimmed.is_empty() || trimmed.starts_with('@') || trimmed.starts_with("//")) {
                secure = false;
            }
            continue;
        };

        let name = &captures[1];
        let declared = if captures.get(3).is_some() {
            Ok(ParameterType::Array)
        } else {
            captures[2].parse::<ParameterType>()
        };

        match declared {
            Ok(ty) if secure => types.insert(name, ty.to_secure()),
            Ok(ty) => types.insert(name, ty),
            Err(_) => warn!(
                line = index + 1,
                parameter = name,
                declared = &captures[2],
                "skipping parameter with unsupported type"
            ),
        }
        secure = false;
    }

    types
}

/// Net count of opening minus closing brackets, ignoring string literals and
/// line comments.
fn bracket_delta(line: &str) -> isize {
    let mut delta = 0;
    let mut in_string = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_string => {
                chars.next();
            }
            '\'' => in_string = !in_string,
            '/' if !in_string && chars.peek() == Some(&'/') => break,
            '(' | '[' | '{' if !in_string => delta += 1,
            ')' | ']' | '}' if !in_string => delta -= 1,
            _ => {}
        }
    }
    delta
}
