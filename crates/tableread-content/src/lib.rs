//! Tableread Content - generative service boundary
//!
//! Request/response wrappers around the studio's generative collaborators:
//! - Timestamped transcription of raw dialogue text
//! - Script suggestions (dialogue, scene flow, consistency)
//! - Storyboard panel images
//!
//! Every call is plain request/response with no retry policy; a failure
//! surfaces as a single generic error the editor shows as-is.

pub mod canned;
pub mod error;
pub mod service;
pub mod types;

pub use canned::CannedContentService;
pub use error::{ContentError, Result};
pub use service::ContentService;
pub use types::{StoryboardImage, SuggestionKind, TranscriptCue};
