//! Operator guidance printed after a bootstrap.
//!
//! Pure data: the CLI decides how to render it.

use crate::domain::{Layout, MarkerBlock};

/// Base path of the inference API exposed by the running deployment.
pub const API_PREFIX: &str = "/custom-models";

/// One HTTP endpoint of the inference API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: String,
    pub summary: &'static str,
}

impl Endpoint {
    fn new(method: &'static str, suffix: &str, summary: &'static str) -> Self {
        Self {
            method,
            path: format!("{API_PREFIX}{suffix}"),
            summary,
        }
    }
}

/// Next steps and API reference for a bootstrapped deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub next_steps: Vec<String>,
    pub endpoints: Vec<Endpoint>,
    pub tips: Vec<&'static str>,
}

impl Guidance {
    pub fn for_deployment(layout: &Layout, marker: &MarkerBlock) -> Self {
        let manifest = layout.manifest_relative().display();
        let next_steps = vec![
            format!("Start the stack: docker compose -f {manifest} up -d"),
            "Set llm_provider = \"custom\" in the [app] section of the config".to_string(),
            format!(
                "Adjust custom_model_id (currently {}) and custom_model_device (currently {})",
                marker.model_id(),
                marker.device()
            ),
            format!("Follow the logs: docker compose -f {manifest} logs -f"),
        ];

        Self {
            next_steps,
            endpoints: endpoints(),
            tips: vec![
                "Start with microsoft/DialoGPT-small when testing",
                "Set custom_model_device = \"cuda\" when a GPU is available",
                "Models are cached under models/ after the first download",
                "Open /docs on the running service for the full API reference",
            ],
        }
    }
}

/// Endpoints served under [`API_PREFIX`].
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("GET", "/models", "List available models"),
        Endpoint::new("GET", "/models/{model_id}", "Show one model"),
        Endpoint::new("POST", "/models/{model_id}/load", "Load a model into memory"),
        Endpoint::new("DELETE", "/models/{model_id}/unload", "Unload a model"),
        Endpoint::new("POST", "/scripts", "Generate a video script"),
        Endpoint::new("POST", "/terms", "Generate video search terms"),
        Endpoint::new("POST", "/models/{model_id}/generate", "Generate free text"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_live_under_prefix() {
        let all = endpoints();
        assert!(all.iter().all(|e| e.path.starts_with("/custom-models/")));
        assert!(all
            .iter()
            .any(|e| e.method == "POST" && e.path == "/custom-models/models/{model_id}/load"));
    }

    #[test]
    fn steps_mention_manifest_and_model() {
        let guidance = Guidance::for_deployment(&Layout::new("."), &MarkerBlock::new("gpt2", "cpu"));
        assert!(guidance.next_steps[0].contains("docker-compose.custom-models.yml"));
        assert!(guidance.next_steps.iter().any(|s| s.contains("gpt2")));
    }
}
