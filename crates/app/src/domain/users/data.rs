//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}

/// Canonical form used to compare and store email addresses.
pub(crate) fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Cheap structural check of a normalised address.
pub(crate) fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lower_cased() {
        assert_eq!(normalise_email("  Ann@Example.COM "), "ann@example.com");
    }

    #[test]
    fn structural_email_check() {
        assert!(looks_like_email("ann@example.com"));
        assert!(!looks_like_email("ann@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ann@@example.com"));
        assert!(!looks_like_email("ann smith@example.com"));
    }
}
