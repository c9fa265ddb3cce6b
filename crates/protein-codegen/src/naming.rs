//! Identifier normalization helpers.
//!
//! The case helpers work on the first `char` only. They are not Unicode-aware
//! case folding: whatever `char::to_uppercase` yields for the first character
//! replaces it, and the rest of the string is copied through untouched.

/// Kotlin hard keywords. These need backticks to be used as identifiers.
const KOTLIN_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Upper-cases the first character: `widget` -> `Widget`.
///
/// Callers must not pass an empty string; it is returned unchanged.
pub fn to_first_upper_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-cases the first character: `Widget` -> `widget`.
///
/// Callers must not pass an empty string; it is returned unchanged.
pub fn to_first_lower_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Joins dotted names into camel case: `page.size` -> `pageSize`.
pub fn camelize_dotted(name: &str) -> String {
    name.split('.')
        .enumerate()
        .map(|(i, part)| if i > 0 { to_first_upper_case(part) } else { part.to_string() })
        .collect()
}

pub fn is_keyword(name: &str) -> bool {
    KOTLIN_KEYWORDS.contains(&name)
}

/// True when `name` can be used as a bare Kotlin identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = match chars.next() {
        Some(first) => first.is_alphabetic() || first == '_',
        None => return false,
    };
    starts_well && chars.all(|c| c.is_alphanumeric() || c == '_') && !is_keyword(name)
}

/// Wraps keywords and other non-identifiers in backticks.
pub fn escape_identifier(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name)
    }
}

/// Returns `name` when it is usable as a class name, otherwise `Model<Name>`.
///
/// Schema definitions such as `2fa` or `object` cannot name a class directly.
pub fn valid_class_name(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("Model{}", to_first_upper_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_upper_case_only_touches_first_char() {
        assert_eq!(to_first_upper_case("widget"), "Widget");
        assert_eq!(to_first_upper_case("wIDGET"), "WIDGET");
        assert_eq!(to_first_upper_case("Widget"), "Widget");
        assert_eq!(to_first_upper_case("1abc"), "1abc");
        assert_eq!(to_first_upper_case("éclair"), "Éclair");
    }

    #[test]
    fn test_first_lower_case_only_touches_first_char() {
        assert_eq!(to_first_lower_case("Widget"), "widget");
        assert_eq!(to_first_lower_case("WIDGET"), "wIDGET");
        assert_eq!(to_first_lower_case("x"), "x");
    }

    #[test]
    fn test_case_helpers_are_idempotent() {
        for input in ["widget", "Widget", "a", "Z", "fooBar", "_private", "ÅngströM"] {
            let upper = to_first_upper_case(input);
            assert_eq!(to_first_upper_case(&upper), upper);
            let lower = to_first_lower_case(input);
            assert_eq!(to_first_lower_case(&lower), lower);
            assert_eq!(upper.chars().skip(1).collect::<String>(), input.chars().skip(1).collect::<String>());
        }
    }

    #[test]
    fn test_camelize_dotted() {
        assert_eq!(camelize_dotted("page.size"), "pageSize");
        assert_eq!(camelize_dotted("filter.created.after"), "filterCreatedAfter");
        assert_eq!(camelize_dotted("plain"), "plain");
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_valid_identifier("widget"));
        assert!(is_valid_identifier("_id"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2fa"));
        assert!(!is_valid_identifier("in-progress"));
        assert!(!is_valid_identifier("object"));
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("name"), "name");
        assert_eq!(escape_identifier("object"), "`object`");
        assert_eq!(escape_identifier("in-progress"), "`in-progress`");
    }

    #[test]
    fn test_valid_class_name_fallback() {
        assert_eq!(valid_class_name("Widget"), "Widget");
        assert_eq!(valid_class_name("object"), "ModelObject");
        assert_eq!(valid_class_name("2fa"), "Model2fa");
    }
}
