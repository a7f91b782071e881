//! Business rules for the conversion domain

use crate::conversion::ConversionError;

/// Validates that a route name can be used as a path segment and operation id
pub fn validate_function_name(name: &str) -> Result<(), ConversionError> {
    if name.is_empty() {
        return Err(ConversionError::invalid_route(
            name,
            "route name cannot be empty",
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConversionError::invalid_route(
            name,
            "route name must contain only alphanumeric characters, dashes, and underscores",
        ));
    }

    Ok(())
}

/// Validates that a topic has no empty or unbalanced placeholders
pub fn validate_topic(route: &str, topic: &str) -> Result<(), ConversionError> {
    if topic.trim().is_empty() {
        return Err(ConversionError::invalid_route(route, "topic cannot be empty"));
    }

    let mut depth = 0usize;
    let mut current = 0usize;
    for c in topic.chars() {
        match c {
            '{' if depth == 0 => {
                depth = 1;
                current = 0;
            }
            '}' if depth == 1 => {
                if current == 0 {
                    return Err(ConversionError::invalid_route(
                        route,
                        format!("topic '{topic}' has an empty placeholder"),
                    ));
                }
                depth = 0;
            }
            '{' | '}' => {
                return Err(ConversionError::invalid_route(
                    route,
                    format!("topic '{topic}' has unbalanced braces"),
                ));
            }
            _ if depth == 1 => current += 1,
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ConversionError::invalid_route(
            route,
            format!("topic '{topic}' has unbalanced braces"),
        ));
    }

    Ok(())
}
