/// Split one raw line into its comma-separated fields.
///
/// Quoting follows a small RFC 4180 subset:
/// - a field that *starts* with `"` is quoted; commas and newlines inside it are literal
/// - `""` inside a quoted field decodes to a single `"`
/// - an unterminated quote runs to the end of the line
/// - a `"` in the middle of an unquoted field is kept as a literal character
///
/// Values are returned exactly as written. Trimming is left to the caller.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(16);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next(); // Consume the escaped quote
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut current));
                at_field_start = true;
            }
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            _ => {
                current.push(c);
                at_field_start = false;
            }
        }
    }

    fields.push(current);
    fields
}

/// Like [`split_fields`], but an absent line has no fields at all.
pub fn split_optional(line: Option<&str>) -> Vec<String> {
    line.map(split_fields).unwrap_or_default()
}
