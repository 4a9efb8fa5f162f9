//! Reading `ARTPAPER_*` overrides from the environment.

use std::fmt::Display;
use std::str::FromStr;

/// Value of `var` parsed as `T`, or `fallback` when unset or unparsable.
///
/// An unparsable value is logged at warn level so a typo in, say,
/// `ARTPAPER_HTTP_TIMEOUT_SECS` does not pass silently.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, fallback: T) -> T {
    let Ok(raw) = std::env::var(var) else {
        return fallback;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(var, value = %raw, fallback = %fallback, "Ignoring unparsable environment override");
        fallback
    })
}

/// Non-empty value of an environment variable, trimmed.
#[must_use]
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name, so parallel tests never race on one key.
    fn set(var: &str, value: &str) {
        // SAFETY: the variable is unique to the calling test.
        unsafe { std::env::set_var(var, value) };
    }

    fn unset(var: &str) {
        // SAFETY: the variable is unique to the calling test.
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_timeout_override_is_parsed() {
        let var = "ARTPAPER_TEST_TIMEOUT_OVERRIDE";
        set(var, " 90 ");
        assert_eq!(env_parse_with_default::<u64>(var, 30), 90);
        unset(var);
    }

    #[test]
    fn test_unparsable_timeout_falls_back() {
        let var = "ARTPAPER_TEST_TIMEOUT_GARBAGE";
        set(var, "thirty");
        assert_eq!(env_parse_with_default::<u64>(var, 30), 30);
        set(var, "-5");
        assert_eq!(env_parse_with_default::<u64>(var, 30), 30);
        unset(var);
    }

    #[test]
    fn test_unset_override_uses_fallback() {
        assert_eq!(env_parse_with_default::<u64>("ARTPAPER_TEST_TIMEOUT_UNSET", 30), 30);
    }

    #[test]
    fn test_blank_directory_override_is_ignored() {
        let var = "ARTPAPER_TEST_ART_DIR_OVERRIDE";
        set(var, "   ");
        assert_eq!(env_non_empty(var), None);
        set(var, " /srv/art ");
        assert_eq!(env_non_empty(var).as_deref(), Some("/srv/art"));
        unset(var);
    }
}
