/// Greedy word wrap at `width` columns; always yields at least one line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Cuts `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if s.chars().count() <= max_len => s.to_string(),
        _ => {
            let mut out: String = s.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// Renders oxidation states with explicit signs, e.g. `-2, +3`.
pub fn join_signed(states: &[i32], sep: &str) -> String {
    states
        .iter()
        .map(|s| format!("{:+}", s))
        .collect::<Vec<_>>()
        .join(sep)
}
