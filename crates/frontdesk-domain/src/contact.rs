//! Structural checks for contact details captured at intake.

/// Structural email check: one `@`, a non-empty local part, and a dotted domain
/// without whitespace. Deliverability is proven by the one-time code, not here.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    domain.contains('.') && labels.all(|label| !label.is_empty())
}
