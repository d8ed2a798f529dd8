//! Data Transfer Objects - request bodies and stream frames for the API.

use serde::{Deserialize, Serialize};

use postcraft_core::domain::{
    GeneratedPost, GenerationRequest, PostLength, PostOutline, ProviderKind,
};
use postcraft_core::generation::GenerationStage;
use postcraft_core::profile::ProfileTone;

/// Largest batch a single request may ask for.
pub const MAX_POST_COUNT: usize = 6;

/// Body of `POST /api/generate`.
///
/// Every field is optional on the wire so validation can report all problems
/// at once instead of failing on the first missing key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    pub topic: Option<String>,
    pub tone: Option<String>,
    pub audience: Option<String>,
    pub length: Option<String>,
    pub post_count: Option<i64>,
    pub hashtags: Option<String>,
    pub examples: Option<String>,
    pub language: Option<String>,
    pub llm_provider: Option<String>,
    pub word_count: Option<i64>,
    pub outline: Option<PostOutline>,
    pub persona: Option<String>,
}

impl GenerateRequestDto {
    /// Validate the body and build the pipeline input.
    ///
    /// The word target is the explicit `wordCount` when given, otherwise the
    /// length category's count.
    ///
    /// Returns every validation message when the body is rejected.
    pub fn into_request(self) -> Result<GenerationRequest, Vec<String>> {
        let mut errors = Vec::new();

        let topic = self.topic.unwrap_or_default().trim().to_string();
        if topic.is_empty() {
            errors.push("topic is required".to_string());
        }

        let length = match self.length.as_deref() {
            None => PostLength::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                errors.push(e);
                PostLength::default()
            }),
        };

        let provider = match self.llm_provider.as_deref() {
            None => ProviderKind::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                errors.push(e);
                ProviderKind::default()
            }),
        };

        let post_count = match self.post_count {
            None => 3,
            Some(n) if (1..=MAX_POST_COUNT as i64).contains(&n) => n as usize,
            Some(n) => {
                errors.push(format!(
                    "postCount must be between 1 and {} (got {})",
                    MAX_POST_COUNT, n
                ));
                3
            }
        };

        let word_count = match self.word_count {
            None => None,
            Some(n) if n >= 1 => Some(n as usize),
            Some(n) => {
                errors.push(format!("wordCount must be at least 1 (got {})", n));
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let language = self
            .language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "English".to_string());

        Ok(GenerationRequest {
            topic,
            tone: self.tone.unwrap_or_default(),
            audience: self.audience.unwrap_or_default(),
            length,
            post_count,
            hashtags: self.hashtags.unwrap_or_default(),
            examples: self.examples.unwrap_or_default(),
            language,
            provider,
            word_count: Some(word_count.unwrap_or_else(|| length.word_target())),
            outline: self.outline,
            persona: self.persona,
        })
    }
}

/// Body of `POST /api/profile/tone`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileToneRequest {
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressPayload {
    pub step: String,
    pub description: String,
    pub completed: bool,
}

impl From<GenerationStage> for ProgressPayload {
    fn from(stage: GenerationStage) -> Self {
        Self {
            step: stage.name().to_string(),
            description: stage.description().to_string(),
            completed: false,
        }
    }
}

/// One server-sent event frame, tagged by `type`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Progress { progress: ProgressPayload },
    Result { results: Vec<GeneratedPost> },
    Error { error: String },
    ExtractedPosts { posts: Vec<String> },
    Profile { profile: ProfileTone },
}

impl StreamEvent {
    pub fn progress(stage: GenerationStage) -> Self {
        StreamEvent::Progress {
            progress: stage.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error {
            error: message.into(),
        }
    }

    /// Encode as an SSE `data:` frame.
    pub fn to_sse_frame(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","error":"failed to encode event: {}"}}"#, e)
        });
        format!("data: {}\n\n", json)
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> GenerateRequestDto {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_minimal_body_gets_defaults() {
        let request = parse(json!({"topic": "Remote work"})).into_request().unwrap();

        assert_eq!(request.topic, "Remote work");
        assert_eq!(request.length, PostLength::Medium);
        assert_eq!(request.post_count, 3);
        assert_eq!(request.language, "English");
        assert_eq!(request.provider, ProviderKind::Gemini);
        assert_eq!(request.word_count, Some(200));
    }

    #[test]
    fn test_length_sets_word_target_unless_explicit() {
        let short = parse(json!({"topic": "t", "length": "short"}))
            .into_request()
            .unwrap();
        assert_eq!(short.word_count, Some(120));

        let explicit = parse(json!({"topic": "t", "length": "short", "wordCount": 40}))
            .into_request()
            .unwrap();
        assert_eq!(explicit.word_count, Some(40));
    }

    #[test]
    fn test_full_body_is_mapped() {
        let request = parse(json!({
            "topic": "Hiring",
            "tone": "Casual",
            "audience": "Founders",
            "length": "long",
            "postCount": 1,
            "llmProvider": "openai",
            "wordCount": 50,
            "outline": {"hook": "Old", "bullets": ["b"]},
            "persona": "Mentor"
        }))
        .into_request()
        .unwrap();

        assert_eq!(request.length, PostLength::Long);
        assert_eq!(request.provider, ProviderKind::OpenAi);
        assert_eq!(request.word_count, Some(50));
        assert_eq!(request.outline.as_ref().unwrap().hook, "Old");
        assert_eq!(request.requested_persona(), Some("Mentor"));
    }

    #[test]
    fn test_all_errors_are_reported() {
        let errors = parse(json!({
            "topic": "  ",
            "postCount": 9,
            "length": "epic",
            "llmProvider": "claude",
            "wordCount": 0
        }))
        .into_request()
        .unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(errors[0], "topic is required");
    }

    #[test]
    fn test_progress_frame_shape() {
        let frame = StreamEvent::progress(GenerationStage::Planning).to_sse_frame();
        assert!(frame.starts_with("data: "));
        assert!(frame.ends_with("\n\n"));

        let value: serde_json::Value =
            serde_json::from_str(frame.trim_start_matches("data: ").trim()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "progress",
                "progress": {
                    "step": "Planning",
                    "description": "Generating outlines...",
                    "completed": false
                }
            })
        );
    }

    #[test]
    fn test_extracted_posts_tag() {
        let event = StreamEvent::ExtractedPosts {
            posts: vec!["one".to_string()],
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value, json!({"type": "extracted_posts", "posts": ["one"]}));
    }
}
