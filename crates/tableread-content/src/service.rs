//! The content service trait and prompt construction

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{StoryboardImage, SuggestionKind, TranscriptCue};

/// Boundary to the studio's generative collaborators.
///
/// Implementations are expected to be stateless request/response clients;
/// the caller owns nothing beyond the returned value.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Break raw dialogue text into timestamped transcript segments.
    async fn transcribe(&self, audio_text: &str) -> Result<Vec<TranscriptCue>>;

    /// Produce a creative suggestion for the given script.
    async fn suggest(&self, script: &str, kind: SuggestionKind) -> Result<String>;

    /// Generate a storyboard panel for a scene description.
    async fn storyboard(&self, scene: &str) -> Result<StoryboardImage>;
}

/// Prompt asking for a JSON array of `{timestamp, text}` segments.
pub fn transcription_prompt(audio_text: &str) -> String {
    format!(
        "Analyze the following block of text, which represents a script or dialogue.\n\
         Your task is to break it down into logical segments and assign a plausible, \
         sequential timestamp (in MM:SS format) to each segment.\n\
         The response must be a JSON array of objects, where each object has a \
         \"timestamp\" and a \"text\" key.\n\n\
         Text to process:\n\"{audio_text}\""
    )
}

/// Prompt combining the role header for `kind` with the script body.
pub fn suggestion_prompt(script: &str, kind: SuggestionKind) -> String {
    format!(
        "{}\n\n**Script:**\n---\n{script}\n---\n\n**Your Suggestion:**",
        kind.prompt_header()
    )
}

/// Prompt describing a single cinematic storyboard panel.
pub fn storyboard_prompt(scene: &str) -> String {
    format!(
        "A cinematic, high-quality storyboard panel illustration.\n\
         Style: digital painting, clear lines, atmospheric lighting, focused on \
         storytelling, 16:9 aspect ratio.\n\
         Scene: {scene}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_prompt_embeds_script_and_header() {
        let prompt = suggestion_prompt("JANE\nHello.", SuggestionKind::Dialogue);
        assert!(prompt.starts_with("You are a professional screenwriter."));
        assert!(prompt.contains("JANE\nHello."));
        assert!(prompt.ends_with("**Your Suggestion:**"));
    }

    #[test]
    fn test_transcription_prompt_names_the_schema() {
        let prompt = transcription_prompt("And... action!");
        assert!(prompt.contains("\"timestamp\""));
        assert!(prompt.contains("\"text\""));
        assert!(prompt.contains("And... action!"));
    }
}
