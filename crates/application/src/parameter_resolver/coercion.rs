//! Declared-type coercion for substituted values

use keel_domain::{DomainError, DomainResult, ParameterType};
use serde_json::Value;

/// Converts a substituted string to the parameter's declared type.
///
/// `bool` accepts `true`/`false` in any case, `int` accepts a signed 64-bit
/// integer, `object`/`array` accept JSON text of that shape. Surrounding
/// whitespace is ignored for every non-string type.
///
/// # Errors
///
/// Returns [`DomainError::TypeMismatch`] when the text does not fit the type.
/// The offending value is omitted for secure types.
pub fn coerce(parameter: &str, ty: ParameterType, raw: String) -> DomainResult<Value> {
    let coerced = match ty {
        ParameterType::String | ParameterType::SecureString => return Ok(Value::String(raw)),
        ParameterType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        ParameterType::Int => raw.trim().parse::<i64>().ok().map(Value::from),
        ParameterType::Object | ParameterType::SecureObject => {
            serde_json::from_str::<Value>(raw.trim())
                .ok()
                .filter(Value::is_object)
        }
        ParameterType::Array => serde_json::from_str::<Value>(raw.trim())
            .ok()
            .filter(Value::is_array),
    };

    coerced.ok_or_else(|| DomainError::TypeMismatch {
        parameter: parameter.to_string(),
        expected: ty,
        value: if ty.is_secure() { String::new() } else { raw },
    })
}
