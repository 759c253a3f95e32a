const SMART_QUOTES: &[char] = &['\u{201C}', '\u{201D}'];

/// Undo the usual copy-paste damage: typographic double quotes and an extra
/// layer of quoting around the whole command.
pub(crate) fn normalize_command(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|ch| if SMART_QUOTES.contains(&ch) { '"' } else { ch })
        .collect();
    strip_wrapping_quotes(&replaced).to_string()
}

fn strip_wrapping_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
