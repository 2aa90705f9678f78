//! Identifier case conversion.

/// Converts a camel or Pascal case identifier into snake case.
///
/// Words are split on capital-letter boundaries. A run of capitals is kept
/// together as one word, except that its last capital starts the next word
/// when it is followed by a lowercase letter (`HTTPServer` becomes
/// `http_server`). Identifiers that are already snake case come back
/// unchanged.
#[must_use]
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| !n.is_uppercase());
            let boundary = !prev.is_uppercase() || next_is_lower;
            if boundary && prev != '_' {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}
