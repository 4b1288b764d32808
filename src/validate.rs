//! Validators applied to free-text answers before they enter the project config.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::RESERVED_NAMES;

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*[a-z0-9]$").expect("valid regex"));

static SINGLE_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Checks a project name: lowercase letters, digits and inner hyphens,
/// 2 to 214 characters (or a single lowercase letter), not a reserved word.
pub fn validate_project_name(name: &str) -> bool {
    let valid_shape = match name.len() {
        0 => false,
        1 => SINGLE_LETTER_RE.is_match(name),
        2..=214 => PROJECT_NAME_RE.is_match(name),
        _ => false,
    };

    valid_shape && !RESERVED_NAMES.contains(&name)
}

/// Checks an email address against a pragmatic subset of RFC 5322.
pub fn validate_email(email: &str) -> bool {
    if email.len() < 5 || email.len() > 254 || !EMAIL_RE.is_match(email) {
        return false;
    }

    match email.rsplit_once('@') {
        Some((local, domain)) => local.len() <= 64 && domain.len() <= 253,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_accepts() {
        for name in ["my-lib", "a", "x2y", "data-pipeline-2"] {
            assert!(validate_project_name(name), "{name} should be accepted");
        }
    }

    #[test]
    fn test_project_name_rejects() {
        let too_long = "a".repeat(215);
        for name in ["Test", "-bad", "test", "ab-", "", "1abc", "my_lib", "A", too_long.as_str()] {
            assert!(!validate_project_name(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_project_name_length_limit() {
        assert!(validate_project_name(&"a".repeat(214)));
    }

    #[test]
    fn test_email_accepts() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last+tag@example.org"));
    }

    #[test]
    fn test_email_rejects() {
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a@b"));

        let long = format!("{}@example.com", "a".repeat(243));
        assert_eq!(long.len(), 255);
        assert!(!validate_email(&long));

        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(!validate_email(&long_local));
    }
}
