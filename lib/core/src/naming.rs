//! Naming strategies for field and mapping names

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Converts a declared name to the name written in the mapping
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NameStrategy {
    /// Keep the declared name
    Identity,
    /// Lower-case the first character: `FirstName` -> `firstName`
    #[default]
    CamelCase,
    /// `FirstName` / `firstName` -> `first_name`
    SnakeCase,
    Lowercase,
    /// Lower-case and pluralize: `Person` -> `persons`, `City` -> `cities`
    Pluralize,
}

impl NameStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NameStrategy::Identity => name.to_string(),
            NameStrategy::CamelCase => camel_case(name),
            NameStrategy::SnakeCase => snake_case(name),
            NameStrategy::Lowercase => name.to_lowercase(),
            NameStrategy::Pluralize => pluralize(&name.to_lowercase()),
        }
    }
}

impl FromStr for NameStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "identity" | "none" => Ok(NameStrategy::Identity),
            "camel_case" | "camelcase" | "camel" => Ok(NameStrategy::CamelCase),
            "snake_case" | "snakecase" | "snake" => Ok(NameStrategy::SnakeCase),
            "lowercase" | "lower" => Ok(NameStrategy::Lowercase),
            "pluralize" | "plural" => Ok(NameStrategy::Pluralize),
            other => Err(format!("unknown naming strategy: {}", other)),
        }
    }
}

fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u') | None) {
            return format!("{}ies", stem);
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| word.ends_with(suffix)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(NameStrategy::CamelCase.apply("FirstName"), "firstName");
        assert_eq!(NameStrategy::CamelCase.apply("name"), "name");
        assert_eq!(NameStrategy::CamelCase.apply(""), "");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(NameStrategy::SnakeCase.apply("FirstName"), "first_name");
        assert_eq!(NameStrategy::SnakeCase.apply("geoIP"), "geo_ip");
        assert_eq!(NameStrategy::SnakeCase.apply("already_snake"), "already_snake");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(NameStrategy::Pluralize.apply("Person"), "persons");
        assert_eq!(NameStrategy::Pluralize.apply("City"), "cities");
        assert_eq!(NameStrategy::Pluralize.apply("Day"), "days");
        assert_eq!(NameStrategy::Pluralize.apply("Address"), "addresses");
        assert_eq!(NameStrategy::Pluralize.apply("Branch"), "branches");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("snake-case".parse::<NameStrategy>(), Ok(NameStrategy::SnakeCase));
        assert_eq!("Identity".parse::<NameStrategy>(), Ok(NameStrategy::Identity));
        assert!("kebab".parse::<NameStrategy>().is_err());
    }
}
