use std::sync::LazyLock;

use common::LyricLine;
use regex::Regex;

// [mm:ss.ff]text
static LRC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([0-9]{1,2}):([0-9]{2}\.[0-9]+)\](.*)").expect("lrc line pattern")
});

/// Parses LRC text. Lines without a leading `[mm:ss.ff]` tag (metadata,
/// blanks, comments) are skipped.
pub fn parse_lrc(text: &str) -> Vec<LyricLine> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let caps = LRC_LINE.captures(line.trim())?;
    let minutes: u32 = caps[1].parse().ok()?;
    let seconds: f64 = caps[2].parse().ok()?;
    Some(LyricLine::new(
        f64::from(minutes) * 60.0 + seconds,
        &caps[3],
    ))
}
