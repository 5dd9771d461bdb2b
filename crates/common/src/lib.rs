use serde::{Deserialize, Serialize};
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a"];
const SUBTITLE_EXTENSIONS: &[&str] = &["lrc", "vtt"];

/// What a file under the source tree is, judged only by its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Audio,
    Subtitle,
    Unclassified,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
            None => return MediaKind::Unclassified,
        };
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            MediaKind::Image
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            MediaKind::Audio
        } else if SUBTITLE_EXTENSIONS.contains(&ext) {
            MediaKind::Subtitle
        } else {
            MediaKind::Unclassified
        }
    }
}

/// One timed caption. `timestamp` is in seconds from the start of the track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub timestamp: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

/// Client-safe projection of an identifier group: bare image file names and
/// the stem of each paired audio file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientResourceView {
    pub images: Vec<String>,
    pub resources: Vec<String>,
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{file_name, file_stem, MediaKind};
    use std::path::Path;

    #[test]
    fn classifies_by_extension_case_insensitively() {
        assert_eq!(MediaKind::from_path(Path::new("/a/cover.JPG")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("/a/art.jpeg")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("/a/01.Flac")), MediaKind::Audio);
        assert_eq!(MediaKind::from_path(Path::new("/a/01.m4a")), MediaKind::Audio);
        assert_eq!(MediaKind::from_path(Path::new("/a/01.LRC")), MediaKind::Subtitle);
        assert_eq!(MediaKind::from_path(Path::new("/a/01.vtt")), MediaKind::Subtitle);
    }

    #[test]
    fn unknown_or_missing_extension_is_unclassified() {
        assert_eq!(
            MediaKind::from_path(Path::new("/a/notes.txt")),
            MediaKind::Unclassified
        );
        assert_eq!(MediaKind::from_path(Path::new("/a/README")), MediaKind::Unclassified);
        assert_eq!(MediaKind::from_path(Path::new("/a/.mp3")), MediaKind::Unclassified);
    }

    #[test]
    fn stems_and_names_drop_directories() {
        let path = Path::new("/library/work/disc 1/02 - song.mp3");
        assert_eq!(file_stem(path), "02 - song");
        assert_eq!(file_name(path), "02 - song.mp3");
    }
}
