//! Self-registration rules: single-institution email allow-list.

use crate::error::CoreError;

/// Department recorded when registration omits one.
pub const DEFAULT_DEPARTMENT: &str = "Unassigned";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Require `email` to end with the institution's domain suffix
/// (e.g. `@jaipur.manipal.edu`). The comparison ignores ASCII case.
pub fn ensure_allowed_domain(email: &str, allowed_domain: &str) -> Result<(), CoreError> {
    let email = email.trim().to_ascii_lowercase();
    let domain = allowed_domain.trim().to_ascii_lowercase();
    let local_part_len = email.len().saturating_sub(domain.len());
    if domain.is_empty() || !email.ends_with(&domain) || local_part_len == 0 {
        return Err(CoreError::Validation(format!(
            "Only {allowed_domain} emails are allowed"
        )));
    }
    Ok(())
}

/// Canonical stored form of an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "@jaipur.manipal.edu";

    #[test]
    fn institution_email_is_allowed() {
        assert!(ensure_allowed_domain("yash.sehgal@jaipur.manipal.edu", DOMAIN).is_ok());
        assert!(ensure_allowed_domain(" Yash@JAIPUR.manipal.edu ", DOMAIN).is_ok());
    }

    #[test]
    fn other_domains_are_rejected() {
        let err = ensure_allowed_domain("someone@gmail.com", DOMAIN).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Only @jaipur.manipal.edu emails are allowed"
        );
        assert!(ensure_allowed_domain("x@evil-jaipur.manipal.edu.com", DOMAIN).is_err());
    }

    #[test]
    fn bare_domain_without_local_part_is_rejected() {
        assert!(ensure_allowed_domain("@jaipur.manipal.edu", DOMAIN).is_err());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  A.B@Jaipur.Manipal.EDU"), "a.b@jaipur.manipal.edu");
    }
}
