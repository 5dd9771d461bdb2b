use std::sync::LazyLock;

use common::LyricLine;
use regex::Regex;

static CUE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{2}):([0-9]{2}):([0-9]{2}\.[0-9]{3}) --> ([0-9]{2}):([0-9]{2}):([0-9]{2}\.[0-9]{3})",
    )
    .expect("vtt cue timing pattern")
});

/// Parses WebVTT text into one caption per cue.
///
/// Only the start time of each cue is kept, and only the first non-empty line
/// after a timing line becomes its caption. Further text lines of the same cue
/// are dropped, as is a cue whose timing line is directly followed by another
/// timing line.
pub fn parse_vtt(text: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(start) = cue_start(line) {
            pending_start = Some(start);
        } else if !line.is_empty() {
            if let Some(start) = pending_start.take() {
                lines.push(LyricLine::new(start, line));
            }
        }
    }

    lines
}

fn cue_start(line: &str) -> Option<f64> {
    let caps = CUE_TIMING.captures(line)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::parse_vtt;
    use common::LyricLine;

    #[test]
    fn reads_cue_start_and_caption() {
        assert_eq!(
            parse_vtt("00:00:01.000 --> 00:00:04.000\nHi there\n"),
            vec![LyricLine::new(1.0, "Hi there")]
        );
    }

    #[test]
    fn converts_hours_and_minutes() {
        assert_eq!(
            parse_vtt("01:02:03.500 --> 01:02:05.000\nlate line"),
            vec![LyricLine::new(3723.5, "late line")]
        );
    }

    #[test]
    fn cue_without_text_is_dropped() {
        let text = "00:00:01.000 --> 00:00:02.000\n00:00:03.000 --> 00:00:04.000\nsecond\n";
        assert_eq!(parse_vtt(text), vec![LyricLine::new(3.0, "second")]);
    }

    #[test]
    fn only_first_caption_line_of_a_cue_is_kept() {
        let text = "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000 align:start\nfirst\nsecond line of cue\n\n2\n00:00:05.000 --> 00:00:06.000\nnext\n";
        assert_eq!(
            parse_vtt(text),
            vec![LyricLine::new(1.0, "first"), LyricLine::new(5.0, "next")]
        );
    }

    #[test]
    fn blank_lines_do_not_clear_pending_cue() {
        let text = "00:00:07.250 --> 00:00:08.000\n\n   \ncaption after blanks\n";
        assert_eq!(parse_vtt(text), vec![LyricLine::new(7.25, "caption after blanks")]);
    }

    #[test]
    fn text_before_any_cue_is_ignored() {
        assert!(parse_vtt("WEBVTT\nNOTE header text\n").is_empty());
    }
}
