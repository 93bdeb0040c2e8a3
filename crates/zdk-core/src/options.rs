//! Provider-agnostic generation options and their provider-specific forms

use crate::providers::gemini::GeminiOptions;
use crate::providers::openai::OpenAIOptions;
use serde::{Deserialize, Serialize};

/// Provider-agnostic request tuning parameters
///
/// Every field is optional; `None` means "use the provider default".
///
/// # Example
/// ```
/// use zdk_core::LlmOptions;
///
/// let options = LlmOptions::new().with_temperature(0.7).with_max_tokens(256);
/// assert_eq!(options.top_p, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
}

impl LlmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Names of the fields that are set, using their serialized names
    pub fn set_fields(&self) -> Vec<&'static str> {
        [
            ("temperature", self.temperature.is_some()),
            ("top_p", self.top_p.is_some()),
            ("top_k", self.top_k.is_some()),
            ("max_tokens", self.max_tokens.is_some()),
            ("presence_penalty", self.presence_penalty.is_some()),
            ("frequency_penalty", self.frequency_penalty.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

/// Provider-specific tuning payload, produced by an [`OptionsConverter`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderOptions {
    OpenAI(OpenAIOptions),
    Gemini(GeminiOptions),
    /// Payload for providers outside this crate
    Custom(serde_json::Map<String, serde_json::Value>),
}

impl ProviderOptions {
    pub fn as_openai(&self) -> Option<&OpenAIOptions> {
        match self {
            ProviderOptions::OpenAI(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_gemini(&self) -> Option<&GeminiOptions> {
        match self {
            ProviderOptions::Gemini(options) => Some(options),
            _ => None,
        }
    }
}

/// Converts provider-agnostic options into one provider's payload
///
/// Implementations are pure and total: set fields the provider supports are
/// copied verbatim, unset fields stay unset, and fields the provider has no
/// equivalent for are dropped without failing the request.
pub trait OptionsConverter: Send + Sync {
    fn convert(&self, options: &LlmOptions) -> ProviderOptions;

    /// `LlmOptions` field names this converter carries over
    fn supported_fields(&self) -> &'static [&'static str];

    /// Set fields in `options` that [`convert`](Self::convert) will drop
    fn unsupported_fields(&self, options: &LlmOptions) -> Vec<&'static str> {
        let supported = self.supported_fields();
        options
            .set_fields()
            .into_iter()
            .filter(|field| !supported.contains(field))
            .collect()
    }
}

/// Options for embedding requests: the model identifier only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingOptions {
    pub model: String,
}

impl EmbeddingOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// Controls whether document metadata is folded into embedded text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataMode {
    All,
    Embed,
    Inference,
    None,
}

/// Text plus string metadata, as handed to an embedding model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    #[serde(default)]
    pub metadata: Vec<(String, String)>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Text to send to a model under `mode`
    ///
    /// `All` and `Embed` prefix the content with `key: value` lines; the other
    /// modes return the content alone.
    pub fn formatted_content(&self, mode: MetadataMode) -> String {
        match mode {
            MetadataMode::All | MetadataMode::Embed if !self.metadata.is_empty() => {
                let header: Vec<String> = self
                    .metadata
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                format!("{}\n\n{}", header.join("\n"), self.content)
            }
            _ => self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyTemperature;

    impl OptionsConverter for OnlyTemperature {
        fn convert(&self, options: &LlmOptions) -> ProviderOptions {
            let mut map = serde_json::Map::new();
            if let Some(t) = options.temperature {
                map.insert("temperature".into(), serde_json::json!(t));
            }
            ProviderOptions::Custom(map)
        }

        fn supported_fields(&self) -> &'static [&'static str] {
            &["temperature"]
        }
    }

    #[test]
    fn test_default_options_are_empty() {
        let options = LlmOptions::default();
        assert!(options.set_fields().is_empty());
        assert_eq!(serde_json::to_string(&options).unwrap(), "{}");
    }

    #[test]
    fn test_builder_sets_fields() {
        let options = LlmOptions::new()
            .with_temperature(0.2)
            .with_top_k(40)
            .with_frequency_penalty(0.5);

        assert_eq!(
            options.set_fields(),
            vec!["temperature", "top_k", "frequency_penalty"]
        );
    }

    #[test]
    fn test_unsupported_fields_default_method() {
        let options = LlmOptions::new().with_temperature(0.1).with_max_tokens(10);
        assert_eq!(OnlyTemperature.unsupported_fields(&options), vec!["max_tokens"]);
        assert!(
            OnlyTemperature
                .unsupported_fields(&LlmOptions::new().with_temperature(1.0))
                .is_empty()
        );
    }

    #[test]
    fn test_custom_payload_serializes_flat() {
        let converted = OnlyTemperature.convert(&LlmOptions::new().with_temperature(0.5));
        assert_eq!(
            serde_json::to_value(&converted).unwrap(),
            serde_json::json!({"temperature": 0.5})
        );
        assert!(converted.as_openai().is_none());
    }

    #[test]
    fn test_document_metadata_modes() {
        let doc = Document::new("body text").with_metadata("title", "Intro");

        assert_eq!(
            doc.formatted_content(MetadataMode::Embed),
            "title: Intro\n\nbody text"
        );
        assert_eq!(doc.formatted_content(MetadataMode::None), "body text");
        assert_eq!(doc.formatted_content(MetadataMode::Inference), "body text");
        assert_eq!(
            Document::new("plain").formatted_content(MetadataMode::All),
            "plain"
        );
    }
}
