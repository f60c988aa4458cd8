//! Masking of sensitive values

use crate::envarg::EnvArg;

/// Replacement shown for sensitive values
pub const MASK: &str = "**********";

/// Mask `value` when `sensitive` is set and there is something to hide
pub fn mask_value<'a>(value: Option<&'a str>, sensitive: bool) -> Option<&'a str> {
    match value {
        Some(v) if sensitive && !v.is_empty() => Some(MASK),
        other => other,
    }
}

/// Resolved value of an argument as it may be displayed
pub fn display_value(arg: &EnvArg) -> &str {
    mask_value(arg.value.as_deref(), arg.sensitive).unwrap_or("")
}

/// Default of an argument as it may be displayed
pub fn display_default(arg: &EnvArg) -> &str {
    mask_value(arg.default.as_deref(), arg.sensitive).unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(value: Option<&str>, sensitive: bool) -> EnvArg {
        EnvArg {
            name: "TOKEN".to_string(),
            default: value.map(String::from),
            description: None,
            sensitive,
            value: value.map(String::from),
            source: None,
        }
    }

    #[test]
    fn test_sensitive_values_are_masked() {
        assert_eq!(display_value(&arg(Some("secret"), true)), MASK);
        assert_eq!(display_default(&arg(Some("secret"), true)), MASK);
    }

    #[test]
    fn test_plain_values_are_shown() {
        assert_eq!(display_value(&arg(Some("dev"), false)), "dev");
        assert_eq!(display_default(&arg(Some("dev"), false)), "dev");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(display_value(&arg(None, true)), "");
        assert_eq!(display_default(&arg(None, true)), "none");
        assert_eq!(mask_value(Some(""), true), Some(""));
    }
}
