/// Chord shifted up a whole tone, or None if the token is not a known chord.
///
/// Accepts both the bare form (`Em`) and the inline-lyric form (`[Em]`).
pub fn transpose_chord(token: &str) -> Option<&'static str> {
    let shifted = match token {
        "C" => "D",
        "Dm" => "Em",
        "Em" => "F#m",
        "F" => "G",
        "G" => "A",
        "Am" => "Bm",
        "[C]" => "[D]",
        "[Dm]" => "[Em]",
        "[Em]" => "[F#m]",
        "[F]" => "[G]",
        "[G]" => "[A]",
        "[Am]" => "[Bm]",
        _ => return None,
    };
    Some(shifted)
}

/// Transpose every space-separated chord on a line, keeping other tokens
/// and the original spacing.
pub fn transpose_line(line: &str) -> String {
    line.split(' ')
        .map(|token| transpose_chord(token).unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn transpose_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&transpose_line(line.as_ref()));
        out.push('\n');
    }
    out
}
