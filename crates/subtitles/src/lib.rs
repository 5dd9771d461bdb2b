mod lrc;
mod vtt;

use std::fs;
use std::path::Path;

use common::LyricLine;
use tracing::debug;

pub use lrc::parse_lrc;
pub use vtt::parse_vtt;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    Lrc,
    Vtt,
}

impl SubtitleFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "lrc" => Some(SubtitleFormat::Lrc),
            "vtt" => Some(SubtitleFormat::Vtt),
            _ => None,
        }
    }

    pub fn parse(self, text: &str) -> Vec<LyricLine> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        match self {
            SubtitleFormat::Lrc => parse_lrc(text),
            SubtitleFormat::Vtt => parse_vtt(text),
        }
    }
}

#[derive(Debug)]
pub enum SubtitleError {
    UnsupportedFormat(String),
    Io(std::io::Error),
    Decode(std::string::FromUtf8Error),
}

impl std::fmt::Display for SubtitleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleError::UnsupportedFormat(ext) => {
                write!(f, "unsupported subtitle format: {:?}", ext)
            }
            SubtitleError::Io(err) => write!(f, "io error: {}", err),
            SubtitleError::Decode(err) => write!(f, "decode error: {}", err),
        }
    }
}

impl std::error::Error for SubtitleError {}

impl From<std::io::Error> for SubtitleError {
    fn from(err: std::io::Error) -> Self {
        SubtitleError::Io(err)
    }
}

impl From<std::string::FromUtf8Error> for SubtitleError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        SubtitleError::Decode(err)
    }
}

/// Reads a `.lrc` or `.vtt` file and returns its captions in file order.
///
/// The format is picked from the extension before the file is opened, so an
/// unsupported extension never touches the disk.
pub fn parse_subtitle(path: &Path) -> Result<Vec<LyricLine>, SubtitleError> {
    let format = SubtitleFormat::from_path(path).ok_or_else(|| {
        SubtitleError::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default(),
        )
    })?;
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    let lines = format.parse(&text);
    debug!("Parsed {} captions from {:?}", lines.len(), path);
    Ok(lines)
}
