//! Variable interpolation for strings
//!
//! Replaces `${name}` references in build file commands. Substitution is a
//! single pass: substituted values are inserted literally and never
//! scanned again.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::env;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid interpolation pattern"))
}

/// Interpolate variables in a string
///
/// Supports:
/// - `${var}` - variable from `vars`
/// - Environment variables (when not found in `vars`)
///
/// Unknown variables are left as-is.
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> String {
    interpolate_with(s, |name| vars.get(name).cloned().or_else(|| env::var(name).ok()))
}

/// Interpolate using an arbitrary variable lookup; `None` keeps the reference
pub fn interpolate_with<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    pattern()
        .replace_all(s, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Interpolate a list of strings
pub fn interpolate_list(list: &[String], vars: &HashMap<String, String>) -> Vec<String> {
    list.iter().map(|s| interpolate(s, vars)).collect()
}
