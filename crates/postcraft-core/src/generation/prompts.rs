//! Prompt templates for the three model stages.
//!
//! Optional request fields only contribute a line when they carry text.

use crate::domain::{GenerationRequest, PostOutline};

use super::text::truncate_chars;

/// Characters of each post shown to the hashtag stage.
pub const HASHTAG_PREVIEW_CHARS: usize = 100;

fn optional_line(lines: &mut Vec<String>, label: &str, value: &str) {
    if !value.trim().is_empty() {
        lines.push(format!("{}: {}", label, value));
    }
}

pub fn outline_prompt(request: &GenerationRequest) -> String {
    let mut lines = vec![
        format!(
            "Create {} LinkedIn post outlines about \"{}\".",
            request.post_count, request.topic
        ),
        format!("Audience: {}", request.audience),
        format!("Tone: {}", request.tone),
    ];
    if let Some(words) = request.word_count {
        lines.push(format!(
            "Limit each outline to a post of about {} words.",
            words
        ));
    }
    lines.push(format!("Language: {}", request.language));
    optional_line(&mut lines, "Examples", &request.examples);
    if let Some(outline) = &request.outline {
        lines.push(format!(
            "Build on this earlier outline:\nHook: {}\nBullets: {}",
            outline.hook,
            outline.bullets.join(", ")
        ));
    }
    if let Some(persona) = request.requested_persona() {
        lines.push(format!("Write in the voice of a {}.", persona));
    }
    lines.push(
        r#"Return as JSON array: [{"hook":"...","bullets":["...","...","..."]}]"#.to_string(),
    );
    lines.join("\n")
}

/// `Outline i:` blocks separated by blank lines.
pub fn format_outlines(outlines: &[PostOutline]) -> String {
    outlines
        .iter()
        .enumerate()
        .map(|(i, o)| {
            format!(
                "Outline {}:\nHook: {}\nBullets: {}",
                i + 1,
                o.hook,
                o.bullets.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn expansion_prompt(outlines: &[PostOutline], request: &GenerationRequest) -> String {
    let mut lines =
        vec!["Expand each of the following LinkedIn post outlines into a full post.".to_string()];
    if let Some(words) = request.word_count {
        lines.push(format!("Each post must be no more than {} words.", words));
    }
    lines.push(format!("Language: {}", request.language));
    lines.push(format!("Tone: {}", request.tone));
    lines.push(format!("Audience: {}", request.audience));
    optional_line(&mut lines, "Examples", &request.examples);
    if let Some(persona) = request.requested_persona() {
        lines.push(format!("Write in the voice of a {}.", persona));
    }
    lines.push(r#"Return as JSON array: ["post1", "post2", ...]"#.to_string());
    lines.push("Outlines:".to_string());
    lines.push(format_outlines(outlines));
    lines.join("\n")
}

pub fn hashtag_prompt(posts: &[String], request: &GenerationRequest) -> String {
    let previews = posts
        .iter()
        .enumerate()
        .map(|(i, p)| format!("Post {}: {}", i + 1, truncate_chars(p, HASHTAG_PREVIEW_CHARS)))
        .collect::<Vec<_>>()
        .join("\n");

    let mut lines =
        vec!["For each LinkedIn post below, generate 3-8 relevant hashtags as a JSON array.".to_string()];
    optional_line(&mut lines, "Preferred hashtags", &request.hashtags);
    lines.push("Posts:".to_string());
    lines.push(previews);
    lines.push(r##"Return as JSON array of arrays: [["#tag1",...], ["#tag2",...], ...]"##.to_string());
    lines.join("\n")
}
