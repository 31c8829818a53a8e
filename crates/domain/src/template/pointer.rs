//! JSON pointer helpers (RFC 6901)

/// Appends an escaped reference token to a JSON pointer.
#[must_use]
pub fn push_segment(pointer: &str, segment: &str) -> String {
    let mut out = String::with_capacity(pointer.len() + segment.len() + 1);
    out.push_str(pointer);
    out.push('/');
    out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    out
}

/// Splits a JSON pointer into unescaped reference tokens.
#[must_use]
pub fn split(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Joins unescaped reference tokens into a JSON pointer.
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .fold(String::new(), |acc, s| push_segment(&acc, s.as_ref()))
}
