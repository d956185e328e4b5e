//! Schema types shared with the generative services

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One segment of a generated transcript. Timestamps use MM:SS format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptCue {
    /// The timestamp in MM:SS format.
    pub timestamp: String,
    /// The text segment for that timestamp.
    pub text: String,
}

/// The kinds of script suggestions an editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Dialogue,
    Flow,
    Consistency,
}

impl SuggestionKind {
    /// The role-setting header prepended to the suggestion prompt.
    pub fn prompt_header(self) -> &'static str {
        match self {
            Self::Dialogue => {
                "You are a professional screenwriter. Based on the script below, suggest a piece \
                 of alternative or additional dialogue that would enhance the scene. Be creative \
                 and concise. Explain your suggestion briefly."
            }
            Self::Flow => {
                "You are a script editor. Analyze the scene flow of the script below. Provide \
                 specific suggestions on how to improve the pacing, transitions, or emotional \
                 arc. Focus on actionable feedback."
            }
            Self::Consistency => {
                "You are a continuity expert. Read the script below and check for any \
                 inconsistencies in character actions, dialogue, plot points, or timelines. If \
                 you find any, point them out and suggest a fix."
            }
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dialogue => write!(f, "dialogue"),
            Self::Flow => write!(f, "flow"),
            Self::Consistency => write!(f, "consistency"),
        }
    }
}

/// A generated storyboard panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryboardImage {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl StoryboardImage {
    /// Render as a data URL, the form the editor embeds directly.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_cue_schema() {
        let json = r#"[
            {"timestamp": "00:01", "text": "First, we set up the lights."},
            {"timestamp": "00:04", "text": "Okay, is everyone ready?"}
        ]"#;

        let cues: Vec<TranscriptCue> = serde_json::from_str(json).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].timestamp, "00:01");
        assert_eq!(cues[1].text, "Okay, is everyone ready?");
    }

    #[test]
    fn test_suggestion_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SuggestionKind::Dialogue).unwrap(),
            "\"dialogue\""
        );
        assert_eq!(SuggestionKind::Flow.to_string(), "flow");
    }

    #[test]
    fn test_data_url_encoding() {
        let image = StoryboardImage {
            mime_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
        };
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/2Q==");
    }
}
