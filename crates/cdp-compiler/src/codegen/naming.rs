//! Identifier casing and sanitizing.

use std::collections::HashSet;

use crate::config::NamingConvention;

/// Applies a naming convention to a generated type identifier.
pub fn apply_convention(convention: NamingConvention, name: &str) -> String {
    match convention {
        NamingConvention::Preserve => name.to_string(),
        NamingConvention::UpperCamel => to_pascal_case(name),
        NamingConvention::LowerCamel => to_camel_case(name),
    }
}

/// Converts a name to PascalCase, treating any non-alphanumeric character as
/// a word break. Inner capitals are kept (`getCookies` -> `GetCookies`).
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect()
}

/// Converts a name to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// Converts a PascalCase or camelCase name to snake_case, keeping acronyms
/// together (`DOMDebugger` -> `dom_debugger`, `IndexedDB` -> `indexed_db`).
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result
}

/// Derives one identifier per enum literal.
///
/// Non-alphanumeric characters become word breaks, a leading digit gets an
/// underscore prefix, and literals that would map to an identifier already
/// taken get a numeric suffix, so the result is deterministic and free of
/// collisions. `escape` adjusts names the target language reserves before
/// the collision check.
pub fn enum_identifiers(values: &[String], escape: impl Fn(String) -> String) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();

    values
        .iter()
        .map(|value| {
            let base = escape(sanitize_literal(value));
            let mut candidate = base.clone();
            let mut suffix = 2;
            while !taken.insert(candidate.to_lowercase()) {
                candidate = format!("{}{}", base, suffix);
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn sanitize_literal(value: &str) -> String {
    let ident = to_pascal_case(value);
    if ident.is_empty() {
        "Empty".to_string()
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("getCookies"), "GetCookies");
        assert_eq!(to_pascal_case("cookie-part_key"), "CookiePartKey");
        assert_eq!(to_camel_case("GetCookiesResult"), "getCookiesResult");
        assert_eq!(to_snake_case("DOMDebugger"), "dom_debugger");
        assert_eq!(to_snake_case("IndexedDB"), "indexed_db");
        assert_eq!(to_snake_case("backendNodeId"), "backend_node_id");
        assert_eq!(to_snake_case("CSS"), "css");
    }

    #[test]
    fn test_conventions() {
        assert_eq!(apply_convention(NamingConvention::Preserve, "getCookiesParams"), "getCookiesParams");
        assert_eq!(apply_convention(NamingConvention::UpperCamel, "getCookiesParams"), "GetCookiesParams");
        assert_eq!(apply_convention(NamingConvention::LowerCamel, "GetCookiesParams"), "getCookiesParams");
    }

    #[test]
    fn test_enum_identifiers() {
        let values: Vec<String> = ["Document", "text/plain", "3d", "", "foo-bar", "foo_bar", "FooBar"]
            .iter()
            .map(|v| v.to_string())
            .collect();

        assert_eq!(
            enum_identifiers(&values, |ident| ident),
            vec!["Document", "TextPlain", "_3d", "Empty", "FooBar", "FooBar2", "FooBar3"]
        );
    }

    #[test]
    fn test_enum_identifiers_escape_before_dedup() {
        let values: Vec<String> = ["self", "Self_", "other"].iter().map(|v| v.to_string()).collect();
        let escape = |ident: String| if ident == "Self" { format!("{}_", ident) } else { ident };

        assert_eq!(enum_identifiers(&values, escape), vec!["Self_", "Self_2", "Other"]);
    }
}
