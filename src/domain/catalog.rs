//! Model catalog read by the inference server (`models/model_configs.json`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generation defaults and metadata for one Hugging Face model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub description: String,
    pub max_length: u32,
    pub temperature: f64,
    pub do_sample: bool,
    pub pad_token_id: Option<u32>,
    pub use_case: String,
    pub size: String,
}

impl ModelSpec {
    fn conversational(name: &str, description: &str, size: &str) -> Self {
        Self::new(name, description, "conversational", size)
    }

    fn text_generation(name: &str, description: &str, size: &str) -> Self {
        Self::new(name, description, "text_generation", size)
    }

    fn new(name: &str, description: &str, use_case: &str, size: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            max_length: 1000,
            temperature: 0.7,
            do_sample: true,
            pad_token_id: None,
            use_case: use_case.to_string(),
            size: size.to_string(),
        }
    }
}

/// Catalog keyed by model id. Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    models: BTreeMap<String, ModelSpec>,
}

impl Catalog {
    /// Model recommended for first runs.
    pub const RECOMMENDED: &'static str = "microsoft/DialoGPT-medium";

    #[must_use]
    pub fn get(&self, model_id: &str) -> Option<&ModelSpec> {
        self.models.get(model_id)
    }

    #[must_use]
    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelSpec)> {
        self.models.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let entries = [
            (
                "microsoft/DialoGPT-small",
                ModelSpec::conversational(
                    "DialoGPT Small",
                    "Lightweight conversational AI model (117M parameters)",
                    "~500MB",
                ),
            ),
            (
                "microsoft/DialoGPT-medium",
                ModelSpec::conversational(
                    "DialoGPT Medium",
                    "Medium conversational AI model (345M parameters)",
                    "~1.4GB",
                ),
            ),
            (
                "microsoft/DialoGPT-large",
                ModelSpec::conversational(
                    "DialoGPT Large",
                    "Large conversational AI model (774M parameters)",
                    "~3.1GB",
                ),
            ),
            (
                "facebook/blenderbot-400M-distill",
                ModelSpec::conversational(
                    "BlenderBot 400M",
                    "Facebook's conversational AI model (400M parameters)",
                    "~1.6GB",
                ),
            ),
            (
                "EleutherAI/gpt-neo-125M",
                ModelSpec::text_generation(
                    "GPT-Neo 125M",
                    "Small GPT-Neo model for text generation (125M parameters)",
                    "~500MB",
                ),
            ),
            (
                "EleutherAI/gpt-neo-1.3B",
                ModelSpec::text_generation(
                    "GPT-Neo 1.3B",
                    "Medium-sized GPT-Neo model (1.3B parameters)",
                    "~5.2GB",
                ),
            ),
        ];

        Self {
            models: entries
                .into_iter()
                .map(|(id, spec)| (id.to_string(), spec))
                .collect(),
        }
    }
}
