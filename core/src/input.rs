//! The CEP text field.

/// Contents of the CEP input field.
///
/// Holds at most [`CepInput::MAX_LEN`] characters. Digits are expected but
/// not enforced: whatever the user types is sent upstream as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CepInput {
    text: String,
}

impl CepInput {
    /// Maximum number of characters the field accepts.
    pub const MAX_LEN: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    /// Replace the whole text, keeping only the first `MAX_LEN` characters.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(Self::MAX_LEN).collect();
    }

    /// Append one character. Returns `false` (and changes nothing) when the
    /// field is already full.
    pub fn push(&mut self, c: char) -> bool {
        if self.len() >= Self::MAX_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for CepInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
