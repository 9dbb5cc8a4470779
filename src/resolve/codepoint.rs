use std::fmt;

/// Canonical diagram identifier for one Unicode scalar value: five lowercase hex digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct LookupKey(String);

impl LookupKey {
    /// Key for a single scalar value.
    pub fn from_char(c: char) -> Self {
        Self(format!("{:05x}", u32::from(c)))
    }

    /// The hex key, e.g. `"0304d"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Repository file name, `{key}.svg`.
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.0)
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decompose `text` into one key per Unicode scalar value, in order.
///
/// Iterates `char`s, never UTF-16 units or grapheme clusters, so a compound such as `きゃ`
/// yields two keys and characters outside the BMP keep their full value.
pub fn resolve_keys(text: &str) -> Vec<LookupKey> {
    text.chars().map(LookupKey::from_char).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/codepoint.rs"]
mod tests;
