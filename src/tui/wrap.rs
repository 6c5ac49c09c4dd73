//! Greedy word wrapping for fixed-width grid cells.

/// Wrap `text` into lines of at most `width` characters.
///
/// Breaks at the last space at or before the boundary and hard-breaks words
/// longer than `width`. The space at a break is consumed and any further
/// leading spaces of the continuation are dropped; everything else is kept
/// verbatim. A zero width returns the text unsplit. Always returns at least
/// one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut rest: &[char] = &chars;
    let mut lines = Vec::new();

    while rest.len() > width {
        let split = rest[..=width]
            .iter()
            .rposition(|&c| c == ' ')
            .filter(|&at| rest[..at].iter().any(|&c| c != ' '));
        let (line, next) = match split {
            Some(at) => (&rest[..at], &rest[at + 1..]),
            None => (&rest[..width], &rest[width..]),
        };
        lines.push(line.iter().collect());

        let skip = next.iter().take_while(|&&c| c == ' ').count();
        rest = &next[skip..];
    }

    if !rest.is_empty() || lines.is_empty() {
        lines.push(rest.iter().collect());
    }
    lines
}
