/// Normalize a name for comparison: lowercase it and drop every character
/// outside `[a-z0-9_]`.
///
/// Dropped characters collapse to nothing, so `"Foo Bar!"` and `"foobar"`
/// normalize to the same string. Normalizing twice is a no-op.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Trim the `_` joints left over when a candidate was built from an empty
/// attribute, e.g. `"_Minimize"` or `"Button_"`.
pub fn clean_separators(s: &str) -> &str {
    s.trim_matches('_')
}
