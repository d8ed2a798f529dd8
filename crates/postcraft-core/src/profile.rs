//! Demo profile tone extraction.
//!
//! Stands in for reading a real profile: it "extracts" three canned posts
//! with a delay between each and picks a tone from keywords in the URL.

use std::time::Duration;

use serde::Serialize;

/// Delay between extracted posts.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(800);

const SAMPLE_POSTS: [&str; 3] = [
    "🚀 Just launched our new product feature! After months of development, we're excited to see how it transforms user workflows. The team's dedication has been incredible - from late-night debugging sessions to creative problem-solving. What's your experience with product launches? #ProductLaunch #Innovation #TeamWork",
    "Reflecting on my journey from junior developer to tech lead... The biggest lesson? Technical skills are just the foundation. Communication, empathy, and mentorship are what truly drive impact. I've learned more from my failures than my successes. What's one lesson that changed your career trajectory? #Leadership #TechCareer #Growth",
    "Remote work isn't just about flexibility - it's about intentional collaboration. Our team has developed rituals that keep us connected: virtual coffee chats, async standups, and dedicated focus blocks. The key is being deliberate about when to be together and when to work independently. How does your team handle remote collaboration? #RemoteWork #Productivity #TeamCulture",
];

/// Writing style inferred for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneClass {
    Professional,
    Inspirational,
    Casual,
}

impl ToneClass {
    /// Keyword heuristic over the profile URL.
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("ceo") || url.contains("founder") {
            ToneClass::Professional
        } else if url.contains("coach") || url.contains("mentor") {
            ToneClass::Inspirational
        } else {
            ToneClass::Casual
        }
    }

    fn tone(self) -> &'static str {
        match self {
            ToneClass::Professional => "Professional and authoritative",
            ToneClass::Inspirational => "Motivational and uplifting",
            ToneClass::Casual => "Conversational and approachable",
        }
    }

    fn style(self) -> &'static str {
        match self {
            ToneClass::Professional => {
                "Uses data-driven insights, industry terminology, structured arguments"
            }
            ToneClass::Inspirational => {
                "Storytelling format, quotes, lessons learned, calls to action"
            }
            ToneClass::Casual => {
                "Personal anecdotes, questions to audience, emojis, shorter paragraphs"
            }
        }
    }

    fn topics(self) -> [&'static str; 3] {
        match self {
            ToneClass::Professional => ["leadership", "business strategy", "industry trends"],
            ToneClass::Inspirational => ["success stories", "overcoming challenges", "motivation"],
            ToneClass::Casual => ["personal growth", "team culture", "work-life balance"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTone {
    pub tone: String,
    pub style: String,
    pub common_topics: Vec<String>,
    pub extracted_posts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileToneExtractor {
    step_delay: Duration,
}

impl Default for ProfileToneExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl ProfileToneExtractor {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    /// Extract posts one by one, reporting the list so far after each.
    pub async fn extract<F>(&self, profile_url: &str, on_posts: F) -> ProfileTone
    where
        F: Fn(&[String]),
    {
        let mut posts = Vec::with_capacity(SAMPLE_POSTS.len());
        for sample in SAMPLE_POSTS {
            tokio::time::sleep(self.step_delay).await;
            posts.push(sample.to_string());
            on_posts(&posts);
        }

        let class = ToneClass::from_url(profile_url);
        tracing::debug!(profile_url, ?class, "Profile tone classified");

        ProfileTone {
            tone: class.tone().to_string(),
            style: class.style().to_string(),
            common_topics: class.topics().iter().map(|t| t.to_string()).collect(),
            extracted_posts: posts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_tone_from_url() {
        assert_eq!(
            ToneClass::from_url("https://linkedin.com/in/jane-CEO"),
            ToneClass::Professional
        );
        assert_eq!(
            ToneClass::from_url("https://linkedin.com/in/career-coach"),
            ToneClass::Inspirational
        );
        assert_eq!(
            ToneClass::from_url("https://linkedin.com/in/someone"),
            ToneClass::Casual
        );
    }

    #[test]
    fn test_inspirational_topics() {
        assert_eq!(
            ToneClass::Inspirational.topics(),
            ["success stories", "overcoming challenges", "motivation"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_reports_growing_post_list() {
        let extractor = ProfileToneExtractor::default();
        let sizes = Mutex::new(Vec::new());

        let profile = extractor
            .extract("https://linkedin.com/in/startup-founder", |posts| {
                sizes.lock().unwrap().push(posts.len())
            })
            .await;

        assert_eq!(sizes.into_inner().unwrap(), vec![1, 2, 3]);
        assert_eq!(profile.tone, "Professional and authoritative");
        assert_eq!(profile.extracted_posts.len(), 3);
        assert_eq!(profile.common_topics[0], "leadership");
    }
}
