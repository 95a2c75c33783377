/// Read an environment variable, treating unset and blank values alike.
pub(super) fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Drop values that are empty after trimming; trim the rest.
pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(super) fn parse_port(name: &str, value: &str) -> Result<u16, String> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("Invalid {name} value '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("PORT", "3001"), Ok(3001));
        assert_eq!(parse_port("PORT", " 443 "), Ok(443));
        assert!(parse_port("PORT", "70000").unwrap_err().contains("PORT"));
        assert!(parse_port("PORT", "abc").is_err());
    }
}
