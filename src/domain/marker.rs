//! The custom-model block managed inside the application config file.
//!
//! Presence is decided by a single marker line (`custom_model_id = "..."`).
//! When it is missing the whole block is appended after a blank separator
//! line, so a second run finds the marker and leaves the file alone. A file
//! that already assigns `custom_model_id` some other value is also left
//! alone, since a second assignment would make the TOML invalid.

/// Comment line opening the block.
pub const BLOCK_HEADER: &str = "########## Custom Models (Local Hugging Face Models)";

/// Comment line describing the block.
pub const BLOCK_DESCRIPTION: &str = "# Use local Hugging Face models without API limitations";

/// Key whose assignment marks the block.
pub const MODEL_ID_KEY: &str = "custom_model_id";

pub const DEFAULT_MODEL_ID: &str = "microsoft/DialoGPT-medium";
pub const DEFAULT_DEVICE: &str = "auto";

/// Custom-model settings block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    model_id: String,
    device: String,
}

impl MarkerBlock {
    pub fn new(model_id: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            device: device.into(),
        }
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// The line whose presence means the block was already added.
    #[must_use]
    pub fn marker_line(&self) -> String {
        format!("{MODEL_ID_KEY} = {}", quote(&self.model_id))
    }

    /// All block lines in file order, marker line included.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            BLOCK_HEADER.to_string(),
            BLOCK_DESCRIPTION.to_string(),
            self.marker_line(),
            format!("custom_model_device = {}", quote(&self.device)),
        ]
    }

    /// Whether `content` already carries the marker line.
    ///
    /// Lines are compared exactly, ignoring trailing whitespace and a
    /// trailing carriage return.
    #[must_use]
    pub fn is_present_in(&self, content: &str) -> bool {
        let marker = self.marker_line();
        content
            .lines()
            .any(|line| line.trim_end() == marker.as_str())
    }

    /// The first line of `content` assigning `custom_model_id`, whatever its
    /// value. Commented-out lines do not count.
    #[must_use]
    pub fn existing_assignment<'a>(&self, content: &'a str) -> Option<&'a str> {
        content.lines().map(str::trim).find(|line| {
            line.strip_prefix(MODEL_ID_KEY)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        })
    }

    /// Text to append to `existing` so the block ends the file.
    ///
    /// A missing final newline is restored first so the blank separator line
    /// really is blank.
    #[must_use]
    pub fn append_text(&self, existing: &str) -> String {
        let mut text = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            text.push('\n');
        }
        text.push('\n');
        for line in self.lines() {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

impl Default for MarkerBlock {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_ID, DEFAULT_DEVICE)
    }
}

/// Render `value` as a TOML basic string.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
