//! Storage-key derivation for column labels.
//!
//! Two derivations exist. The add-row form writes under [`column_to_key`],
//! the row renderer reads under [`to_camel_case`]. They agree for labels such
//! as "First Name" or "Email" and disagree for labels like "first name"
//! (`firstname` vs `firstName`).

/// Which derivation a writer uses when turning a label into a storage key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    /// Strip whitespace, lower-case a leading ASCII capital
    #[default]
    Compact,
    /// Camel-case at every whitespace boundary
    CamelCase,
}

impl KeyStyle {
    pub fn derive(self, label: &str) -> String {
        match self {
            KeyStyle::Compact => column_to_key(label),
            KeyStyle::CamelCase => to_camel_case(label),
        }
    }
}

/// Remove every whitespace run, then lower-case the first character if it is
/// an ASCII upper-case letter.
pub fn column_to_key(label: &str) -> String {
    let stripped: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut key = String::with_capacity(stripped.len());
            key.push(first.to_ascii_lowercase());
            key.extend(chars);
            key
        }
        _ => stripped,
    }
}

/// Trim, replace each whitespace character and the character after it with
/// that character upper-cased, then lower-case the first character.
pub fn to_camel_case(label: &str) -> String {
    let mut camel = String::with_capacity(label.len());
    let mut chars = label.trim().chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            match chars.peek() {
                Some(&next) if !is_line_terminator(next) => {
                    chars.next();
                    camel.extend(next.to_uppercase());
                    continue;
                }
                _ => {}
            }
        }
        camel.push(c);
    }

    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => camel,
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
