use std::path::PathBuf;

use common::file_stem;

use crate::diagnostics::Diagnostic;

/// Scores at or below this need the leading-number check to pass.
const SIMILARITY_THRESHOLD: u8 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePair {
    pub audio: PathBuf,
    pub subtitle: PathBuf,
}

/// Zips naturally sorted audio and subtitle lists by position.
///
/// The result is as long as the shorter list. A length difference and every
/// pair that fails [`is_plausible`] are pushed onto `diagnostics`, but the pair
/// is kept either way.
pub fn pair_resources(
    identifier: &str,
    audio: Vec<PathBuf>,
    subtitles: Vec<PathBuf>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ResourcePair> {
    if audio.len() != subtitles.len() {
        diagnostics.push(Diagnostic::SizeMismatch {
            identifier: identifier.to_string(),
            audio: audio.clone(),
            subtitles: subtitles.clone(),
        });
    }

    let mut pairs = Vec::with_capacity(audio.len().min(subtitles.len()));
    for (audio, subtitle) in audio.into_iter().zip(subtitles) {
        let (audio_stem, subtitle_stem) = (file_stem(&audio), file_stem(&subtitle));
        if !is_plausible(&audio_stem, &subtitle_stem) {
            diagnostics.push(Diagnostic::LikelyMismatch {
                identifier: identifier.to_string(),
                audio: audio.clone(),
                subtitle: subtitle.clone(),
                score: similarity(&audio_stem, &subtitle_stem),
            });
        }
        pairs.push(ResourcePair { audio, subtitle });
    }
    pairs
}

/// Two stems belong together when they are more than 50% similar, or when
/// both carry the same first run of digits. A stem without digits can only
/// pass on similarity.
pub fn is_plausible(audio_stem: &str, subtitle_stem: &str) -> bool {
    if similarity(audio_stem, subtitle_stem) > SIMILARITY_THRESHOLD {
        return true;
    }
    match (first_digits(audio_stem), first_digits(subtitle_stem)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Levenshtein ratio scaled to 0..=100: `(|a| + |b| - indel) / (|a| + |b|)`,
/// where insertions and deletions are the only edits. Ties round to even.
/// An empty stem scores 0.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // indel distance is |a| + |b| - 2 * lcs
    let total = (a.len() + b.len()) as f64;
    let ratio = (2 * longest_common_subsequence(&a, &b)) as f64 / total;
    (ratio * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for ca in a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

pub fn first_digits(value: &str) -> Option<&str> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let rest = &value[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
