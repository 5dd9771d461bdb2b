use std::fmt;
use std::path::PathBuf;

use tracing::error;

/// Data-quality findings raised while pairing a group. None of them stop the
/// index from being built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    SizeMismatch {
        identifier: String,
        audio: Vec<PathBuf>,
        subtitles: Vec<PathBuf>,
    },
    LikelyMismatch {
        identifier: String,
        audio: PathBuf,
        subtitle: PathBuf,
        score: u8,
    },
}

impl Diagnostic {
    pub fn identifier(&self) -> &str {
        match self {
            Diagnostic::SizeMismatch { identifier, .. }
            | Diagnostic::LikelyMismatch { identifier, .. } => identifier,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SizeMismatch {
                identifier,
                audio,
                subtitles,
            } => write!(
                f,
                "{}: {} audio files but {} subtitle files ({:?}, {:?})",
                identifier,
                audio.len(),
                subtitles.len(),
                audio,
                subtitles
            ),
            Diagnostic::LikelyMismatch {
                identifier,
                audio,
                subtitle,
                score,
            } => write!(
                f,
                "{}: {} and {} likely do not match (similarity {})",
                identifier,
                audio.display(),
                subtitle.display(),
                score
            ),
        }
    }
}

/// Receives diagnostics as the index is built.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Logs every diagnostic at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::SizeMismatch {
                identifier,
                audio,
                subtitles,
            } => error!(
                identifier = %identifier,
                audio = audio.len(),
                subtitles = subtitles.len(),
                "{}",
                diagnostic
            ),
            Diagnostic::LikelyMismatch {
                identifier, score, ..
            } => error!(identifier = %identifier, score = *score, "{}", diagnostic),
        }
    }
}
