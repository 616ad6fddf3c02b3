//! Organizations Data

use crate::domain::organizations::records::OrganizationUuid;

/// New Organization Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub uuid: OrganizationUuid,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
}

/// Slugs are lowercase ASCII letters, digits and single inner hyphens.
pub(crate) fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .bytes()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-')
}

#[cfg(test)]
mod tests {
    use super::is_valid_slug;

    #[test]
    fn accepts_lowercase_hyphenated_slugs() {
        assert!(is_valid_slug("acme"));
        assert!(is_valid_slug("acme-labs-2"));
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in ["", "Acme", "acme labs", "-acme", "acme-", "ac--me", "acmé"] {
            assert!(!is_valid_slug(slug), "{slug:?} should be rejected");
        }
    }
}
