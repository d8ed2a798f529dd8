use serde::{Deserialize, Serialize};

/// Cosmetic author labels, assigned to posts in rotation.
pub const PERSONAS: [&str; 6] = [
    "Founder",
    "Mentor",
    "Industry Expert",
    "Thought Leader",
    "Practitioner",
    "Innovator",
];

/// Planning skeleton for a single post: an opening hook and its talking points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOutline {
    pub hook: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl PostOutline {
    pub fn new(hook: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            hook: hook.into(),
            bullets,
        }
    }

    /// Deterministic outline used when the model's outline output is unusable.
    pub fn fallback(topic: &str) -> Self {
        Self {
            hook: format!("Here's what I learned about {}...", topic),
            bullets: vec![
                format!("Key insight about {}", topic),
                "Practical application".to_string(),
                "Why this matters now".to_string(),
            ],
        }
    }
}

/// One finished post draft, as delivered to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    /// `post-<n>`, 1-based within the run.
    pub id: String,
    pub persona: String,
    pub planning_outline: PostOutline,
    pub final_text: String,
    pub suggested_hashtags: Vec<String>,
    /// Even share of the run's estimated token usage.
    pub tokens_used: u64,
    /// End-to-end pipeline duration in milliseconds, same for every post of a run.
    pub latency: u64,
}

impl GeneratedPost {
    /// Persona for the post at `index` when no explicit persona was requested.
    pub fn rotating_persona(index: usize) -> &'static str {
        PERSONAS[index % PERSONAS.len()]
    }
}
