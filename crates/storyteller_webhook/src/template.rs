//! `{name}` placeholder substitution for prompts and presentations.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("Valid placeholder regex"));

/// Replace each `{name}` with its value. Unknown names are left as written.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use storyteller_webhook::render;
///
/// let values = HashMap::from([("word", "a dragon")]);
/// assert_eq!(render("Tell a story about {word}", &values), "Tell a story about a dragon");
/// assert_eq!(render("{missing}", &values), "{missing}");
/// ```
pub fn render(template: &str, values: &HashMap<&str, &str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => (*value).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_and_adjacent_placeholders() {
        let values = HashMap::from([("a", "x"), ("b", "y")]);
        assert_eq!(render("{a}{b} {a}", &values), "xy x");
    }

    #[test]
    fn test_non_placeholder_braces_are_untouched() {
        let values = HashMap::from([("a", "x")]);
        assert_eq!(render("{ a } {} {a-b}", &values), "{ a } {} {a-b}");
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let values = HashMap::from([("a", "{b}"), ("b", "y")]);
        assert_eq!(render("{a}", &values), "{b}");
    }
}
