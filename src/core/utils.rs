//! String utilities shared by loaders and emitters

use once_cell::sync::Lazy;
use regex::Regex;

static TOPIC_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid topic placeholder regex"));

static QUERY_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("valid query placeholder regex"));

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input.
///
/// # Examples
/// ```
/// use crossover::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("createNewGame"), "create_new_game");
/// assert_eq!(to_snake_case("reset-games-table"), "reset_games_table");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if (ch == '-' || ch == '_' || ch == ' ') && !result.is_empty() && !result.ends_with('_')
        {
            result.push('_');
            prev_is_lowercase = false;
        }
    }

    result.trim_end_matches('_').to_string()
}

/// Turns a route name into a sentence-cased summary.
///
/// # Examples
/// ```
/// use crossover::core::utils::humanize;
///
/// assert_eq!(humanize("updateGameName"), "Update game name");
/// ```
pub fn humanize(s: &str) -> String {
    let words = to_snake_case(s).replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Names of the `{placeholder}` segments in an MQTT topic, first occurrence order
pub fn topic_placeholders(topic: &str) -> Vec<String> {
    unique_captures(&TOPIC_PLACEHOLDER, topic)
}

/// Names of the `$param` bindings referenced by a SQL query
pub fn query_placeholders(query: &str) -> Vec<String> {
    unique_captures(&QUERY_PLACEHOLDER, query)
}

fn unique_captures(re: &Regex, text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in re.captures_iter(text) {
        let name = caps[1].trim().to_string();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
