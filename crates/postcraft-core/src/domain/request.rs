use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PostOutline;

/// Length category selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl PostLength {
    /// Target word count for the category.
    pub fn word_target(self) -> usize {
        match self {
            PostLength::Short => 120,
            PostLength::Medium => 200,
            PostLength::Long => 300,
        }
    }
}

impl FromStr for PostLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(PostLength::Short),
            "medium" => Ok(PostLength::Medium),
            "long" => Ok(PostLength::Long),
            other => Err(format!(
                "length must be one of short, medium, long (got '{}')",
                other
            )),
        }
    }
}

/// Text-completion backend selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!(
                "llmProvider must be one of gemini, openai (got '{}')",
                other
            )),
        }
    }
}

/// Validated input to one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub topic: String,
    pub tone: String,
    pub audience: String,
    pub length: PostLength,
    pub post_count: usize,
    /// Free-text hashtag preferences.
    pub hashtags: String,
    /// Sample posts whose style the drafts should follow.
    pub examples: String,
    pub language: String,
    pub provider: ProviderKind,
    /// Hard cap applied to each final post.
    pub word_count: Option<usize>,
    /// Outline of the post being regenerated.
    pub outline: Option<PostOutline>,
    /// Persona of the post being regenerated.
    pub persona: Option<String>,
}

impl GenerationRequest {
    /// Request with the form's default settings for `topic`.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            tone: String::new(),
            audience: String::new(),
            length: PostLength::default(),
            post_count: 3,
            hashtags: String::new(),
            examples: String::new(),
            language: "English".to_string(),
            provider: ProviderKind::default(),
            word_count: None,
            outline: None,
            persona: None,
        }
    }

    pub fn with_post_count(mut self, post_count: usize) -> Self {
        self.post_count = post_count;
        self
    }

    pub fn with_word_count(mut self, word_count: usize) -> Self {
        self.word_count = Some(word_count);
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_hashtags(mut self, hashtags: impl Into<String>) -> Self {
        self.hashtags = hashtags.into();
        self
    }

    pub fn with_examples(mut self, examples: impl Into<String>) -> Self {
        self.examples = examples.into();
        self
    }

    /// Attach the outline and persona of an existing post for regeneration.
    pub fn regenerating(mut self, outline: PostOutline, persona: impl Into<String>) -> Self {
        self.outline = Some(outline);
        self.persona = Some(persona.into());
        self
    }

    /// Requested persona, ignoring blank values.
    pub fn requested_persona(&self) -> Option<&str> {
        self.persona
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_word_targets() {
        assert_eq!(PostLength::Short.word_target(), 120);
        assert_eq!(PostLength::Medium.word_target(), 200);
        assert_eq!(PostLength::Long.word_target(), 300);
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("openai".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert!("claude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_serde_names() {
        let json = serde_json::to_string(&ProviderKind::OpenAi).unwrap();
        assert_eq!(json, "\"openai\"");
    }

    #[test]
    fn test_blank_persona_is_ignored() {
        let mut request = GenerationRequest::new("Rust");
        request.persona = Some("   ".to_string());
        assert_eq!(request.requested_persona(), None);

        let request = request.regenerating(PostOutline::fallback("Rust"), "Mentor");
        assert_eq!(request.requested_persona(), Some("Mentor"));
    }
}
