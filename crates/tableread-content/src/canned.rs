//! Deterministic offline content backend
//!
//! Stands in for the hosted generative models during development and in
//! tests: same request/response shapes, canned output, no network.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::{ContentError, Result};
use crate::service::ContentService;
use crate::types::{StoryboardImage, SuggestionKind, TranscriptCue};

/// Minimal JPEG (SOI + EOI markers) used as the storyboard placeholder.
const PLACEHOLDER_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

/// Seconds of screen time attributed to each transcript segment.
const SECONDS_PER_SEGMENT: u64 = 3;

/// Offline [`ContentService`] with deterministic output.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedContentService;

#[async_trait]
impl ContentService for CannedContentService {
    async fn transcribe(&self, audio_text: &str) -> Result<Vec<TranscriptCue>> {
        if audio_text.trim().is_empty() {
            return Err(ContentError::Transcription);
        }

        let mut cues = Vec::new();
        let mut clock = 1u64;
        for segment in split_segments(audio_text) {
            cues.push(TranscriptCue {
                timestamp: format_timestamp(clock),
                text: segment.to_string(),
            });
            clock += SECONDS_PER_SEGMENT;
        }

        debug!(segments = cues.len(), "canned transcription produced");
        Ok(cues)
    }

    async fn suggest(&self, script: &str, kind: SuggestionKind) -> Result<String> {
        if script.trim().is_empty() {
            return Err(ContentError::Suggestion);
        }

        debug!(kind = %kind, "canned suggestion produced");
        Ok(match kind {
            SuggestionKind::Dialogue => {
                "Give the quieter character the last word in this exchange. A short, flat \
                 reply after the energetic line lands harder than another speech."
                    .to_string()
            }
            SuggestionKind::Flow => {
                "The scene turns too quickly after the entrance. Hold the silence for one \
                 more beat before the first line so the reversal has room to register."
                    .to_string()
            }
            SuggestionKind::Consistency => {
                "No continuity breaks found in this draft. Watch the time of day across \
                 scene headings if the conversation continues past this scene."
                    .to_string()
            }
        })
    }

    async fn storyboard(&self, scene: &str) -> Result<StoryboardImage> {
        if scene.trim().is_empty() {
            return Err(ContentError::Storyboard);
        }

        debug!(scene_chars = scene.len(), "canned storyboard panel produced");
        Ok(StoryboardImage {
            mime_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(PLACEHOLDER_JPEG),
        })
    }
}

/// Split raw text into sentence-like segments, keeping terminal punctuation.
fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|segment| segment.chars().any(char::is_alphanumeric))
}

fn format_timestamp(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transcribe_assigns_sequential_timestamps() {
        let service = CannedContentService;

        let cues = service
            .transcribe("First, we set up the lights. Okay, is everyone ready? Action!")
            .await
            .unwrap();

        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].timestamp, "00:01");
        assert_eq!(cues[0].text, "First, we set up the lights.");
        assert_eq!(cues[1].timestamp, "00:04");
        assert_eq!(cues[2].timestamp, "00:07");
        assert_eq!(cues[2].text, "Action!");
    }

    #[tokio::test]
    async fn test_transcribe_rolls_past_a_minute() {
        let service = CannedContentService;
        let text = "One. Two. Three. Four. Five. Six. Seven. Eight. Nine. Ten. \
                    Eleven. Twelve. Thirteen. Fourteen. Fifteen. Sixteen. Seventeen. \
                    Eighteen. Nineteen. Twenty. Twentyone.";

        let cues = service.transcribe(text).await.unwrap();
        assert_eq!(cues.len(), 21);
        assert_eq!(cues[20].timestamp, "01:01");
    }

    #[tokio::test]
    async fn test_empty_input_is_a_generation_failure() {
        let service = CannedContentService;

        assert!(service.transcribe("   ").await.is_err());
        assert!(service.suggest("", SuggestionKind::Dialogue).await.is_err());
        assert!(service.storyboard("\n").await.is_err());
    }

    #[tokio::test]
    async fn test_storyboard_returns_an_embeddable_image() {
        let service = CannedContentService;

        let image = service.storyboard("Rain against the window").await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(image.to_data_url().starts_with("data:image/jpeg;base64,"));
    }
}
