//! Classification of authentication outcomes.

use serde_json::Value;

use crate::envelope;
use crate::error::ApiError;

/// Substrings (lower-cased) the backend uses for an account whose email is not
/// yet verified.
const UNVERIFIED_MARKERS: [&str; 5] = [
    "not enabled",
    "not verified",
    "未验证",
    "disabled",
    "not active",
];

/// Whether a failed login means "verify your email first".
pub fn is_unverified_email(status: u16, message: &str) -> bool {
    if status != 401 {
        return false;
    }
    let message = message.to_lowercase();
    UNVERIFIED_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Why a login did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    /// Offer to resend the verification mail
    EmailNotVerified { message: String },
    Rejected { message: String },
}

impl LoginFailure {
    pub fn classify(err: &ApiError) -> Self {
        let message = err.message();
        match err.status() {
            Some(status) if is_unverified_email(status, &message) => {
                LoginFailure::EmailNotVerified { message }
            }
            _ => LoginFailure::Rejected { message },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LoginFailure::EmailNotVerified { message } | LoginFailure::Rejected { message } => {
                message
            }
        }
    }

    pub fn needs_verification(&self) -> bool {
        matches!(self, LoginFailure::EmailNotVerified { .. })
    }
}

/// Result of `POST /auth/resend-verification`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    NotRegistered,
    AlreadyVerified,
    Failed { status: Option<u16>, message: String },
}

impl ResendOutcome {
    pub fn from_status(status: u16, body: &Value) -> Self {
        match status {
            200 => ResendOutcome::Sent,
            404 => ResendOutcome::NotRegistered,
            400 => ResendOutcome::AlreadyVerified,
            _ => ResendOutcome::Failed {
                status: Some(status),
                message: envelope::error_message(body, "", "Failed to resend verification email"),
            },
        }
    }

    pub fn from_error(err: &ApiError) -> Self {
        match err.status() {
            Some(status) => {
                ResendOutcome::from_status(status, err.body().unwrap_or(&Value::Null))
            }
            None => ResendOutcome::Failed {
                status: None,
                message: err.message(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResendOutcome::Sent)
    }

    pub fn message(&self) -> String {
        match self {
            ResendOutcome::Sent => "Verification email sent. Check your inbox.".to_string(),
            ResendOutcome::NotRegistered => "No account is registered with that email.".to_string(),
            ResendOutcome::AlreadyVerified => {
                "This email is already verified. You can sign in.".to_string()
            }
            ResendOutcome::Failed {
                status: Some(status),
                message,
            } => format!("{} (status {})", message, status),
            ResendOutcome::Failed {
                status: None,
                message,
            } => message.clone(),
        }
    }
}

/// Result of following an email verification link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified { message: String },
    MissingToken,
    Failed { message: String },
}

impl VerifyOutcome {
    pub fn message(&self) -> &str {
        match self {
            VerifyOutcome::Verified { message } | VerifyOutcome::Failed { message } => message,
            VerifyOutcome::MissingToken => "Verification link is missing its token.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unverified_markers() {
        assert!(is_unverified_email(401, "User account is not enabled"));
        assert!(is_unverified_email(401, "Email NOT VERIFIED"));
        assert!(is_unverified_email(401, "邮箱未验证"));
        assert!(is_unverified_email(401, "Account disabled"));
        assert!(is_unverified_email(401, "account not active"));
        assert!(!is_unverified_email(401, "Bad credentials"));
        assert!(!is_unverified_email(403, "not enabled"));
    }

    #[test]
    fn test_classify_login_failure() {
        let err = ApiError::from_response(401, "Unauthorized", json!({"message": "User is not enabled"}), "Login failed");
        let failure = LoginFailure::classify(&err);
        assert!(failure.needs_verification());
        assert_eq!(failure.message(), "User is not enabled");

        let err = ApiError::from_response(401, "Unauthorized", json!({"message": "Bad credentials"}), "Login failed");
        assert_eq!(
            LoginFailure::classify(&err),
            LoginFailure::Rejected {
                message: "Bad credentials".into()
            }
        );

        let err = ApiError::transport("offline");
        assert!(!LoginFailure::classify(&err).needs_verification());
    }

    #[test]
    fn test_resend_outcomes() {
        assert_eq!(ResendOutcome::from_status(200, &json!({})), ResendOutcome::Sent);
        assert_eq!(
            ResendOutcome::from_status(404, &json!({})),
            ResendOutcome::NotRegistered
        );
        assert_eq!(
            ResendOutcome::from_status(400, &json!({})),
            ResendOutcome::AlreadyVerified
        );
        let failed = ResendOutcome::from_status(500, &json!({"message": "smtp down"}));
        assert_eq!(failed.message(), "smtp down (status 500)");

        let err = ApiError::from_response(404, "Not Found", json!({}), "x");
        assert_eq!(ResendOutcome::from_error(&err), ResendOutcome::NotRegistered);
    }
}
