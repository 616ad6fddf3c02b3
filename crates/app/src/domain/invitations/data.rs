//! Invitations Data

use jiff::SignedDuration;
use rustc_hash::FxHashSet;

use crate::domain::{
    members::records::MemberRole,
    users::data::{looks_like_email, normalise_email},
};

/// How long a membership invitation stays acceptable.
pub const INVITATION_TTL: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Invitations to issue for one organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvitations {
    pub emails: Vec<String>,
    pub role: MemberRole,
}

/// Normalise, validate and de-duplicate recipient addresses, keeping order.
///
/// Returns the first malformed address as the error.
pub(crate) fn recipient_emails(emails: &[String]) -> Result<Vec<String>, String> {
    let mut seen = FxHashSet::default();
    let mut recipients = Vec::with_capacity(emails.len());

    for email in emails {
        let email = normalise_email(email);

        if email.is_empty() {
            continue;
        }

        if !looks_like_email(&email) {
            return Err(email);
        }

        if seen.insert(email.clone()) {
            recipients.push(email);
        }
    }

    Ok(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipients_are_normalised_and_deduplicated() {
        let emails = vec![
            " Ann@Example.com".to_string(),
            String::new(),
            "bob@example.com".to_string(),
            "ann@example.com ".to_string(),
        ];

        assert_eq!(
            recipient_emails(&emails),
            Ok(vec![
                "ann@example.com".to_string(),
                "bob@example.com".to_string()
            ])
        );
    }

    #[test]
    fn malformed_address_is_reported() {
        let emails = vec!["ann@example.com".to_string(), "not-an-email".to_string()];

        assert_eq!(recipient_emails(&emails), Err("not-an-email".to_string()));
    }
}
