//! Authentication session lifecycle.
//!
//! The token is the only client-persisted state. It is written as a
//! JSON-encoded string, but older builds stored it raw, so reads accept both.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{AuthResponse, UserProfile};

/// Persistence seam for the bearer token
pub trait TokenStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str) -> ApiResult<()>;
    fn clear(&self);
}

impl<T: TokenStore + ?Sized> TokenStore for Rc<T> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&self, token: &str) -> ApiResult<()> {
        (**self).write(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    value: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an already-encoded stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Option<String> {
        self.value.borrow().as_deref().and_then(decode_stored_token)
    }

    fn write(&self, token: &str) -> ApiResult<()> {
        *self.value.borrow_mut() = Some(encode_token(token)?);
        Ok(())
    }

    fn clear(&self) {
        self.value.borrow_mut().take();
    }
}

/// Encode a token for storage (a JSON string literal).
pub fn encode_token(token: &str) -> ApiResult<String> {
    serde_json::to_string(token).map_err(ApiError::from)
}

/// Decode a stored token that may be JSON-encoded or raw.
pub fn decode_stored_token(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let token = match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s,
        Ok(Value::Null) => return None,
        Ok(other) => other.to_string(),
        Err(_) => raw.to_string(),
    };
    Some(token).filter(|t| !t.trim().is_empty())
}

/// `Authorization` header value, adding the scheme only when missing.
pub fn bearer_value(token: &str) -> String {
    if token.starts_with("Bearer") {
        token.to_string()
    } else {
        format!("Bearer {}", token)
    }
}

/// Who is signed in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

impl Session {
    /// A token implies an authenticated session.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|u| u.id)
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(UserProfile::label).unwrap_or("")
    }
}

/// Owns the session and keeps the token store in step with it.
pub struct SessionManager<S: TokenStore> {
    store: S,
    session: Session,
}

impl<S: TokenStore> SessionManager<S> {
    /// Restore whatever token the store holds.
    pub fn init(store: S) -> Self {
        let token = store.read();
        if token.is_some() {
            tracing::debug!("Restored session token from storage");
        }
        Self {
            store,
            session: Session { user: None, token },
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Adopt the outcome of a login or registration.
    ///
    /// A response without a token leaves the previous session in place.
    pub fn establish(&mut self, auth: AuthResponse) -> ApiResult<&Session> {
        let Some(token) = auth.token else {
            return Err(ApiError::unexpected("No access token in response"));
        };
        self.store.write(&token)?;
        self.session = Session {
            user: auth.user,
            token: Some(token),
        };
        Ok(&self.session)
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.session.user = Some(user);
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.session = Session::default();
        tracing::info!("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stored_token_variants() {
        assert_eq!(decode_stored_token(r#""abc""#), Some("abc".into()));
        assert_eq!(decode_stored_token("abc.def.ghi"), Some("abc.def.ghi".into()));
        assert_eq!(decode_stored_token("null"), None);
        assert_eq!(decode_stored_token(""), None);
        assert_eq!(decode_stored_token(r#""""#), None);
        assert_eq!(decode_stored_token("12345"), Some("12345".into()));
    }

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("abc"), "Bearer abc");
        assert_eq!(bearer_value("Bearer abc"), "Bearer abc");
    }

    #[test]
    fn test_memory_store_encodes_json() {
        let store = MemoryTokenStore::new();
        store.write("tok").unwrap();
        assert_eq!(store.raw().as_deref(), Some(r#""tok""#));
        assert_eq!(store.read().as_deref(), Some("tok"));
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut manager = SessionManager::init(MemoryTokenStore::new());
        assert!(!manager.is_authenticated());

        let user = UserProfile {
            id: Some(9),
            username: "kim".into(),
            ..UserProfile::default()
        };
        manager
            .establish(AuthResponse {
                user: Some(user),
                token: Some("tok".into()),
            })
            .unwrap();
        assert!(manager.is_authenticated());
        assert_eq!(manager.session().user_id(), Some(9));
        assert_eq!(manager.store().read().as_deref(), Some("tok"));

        manager.logout();
        assert!(!manager.is_authenticated());
        assert_eq!(manager.store().raw(), None);
    }

    #[test]
    fn test_init_restores_raw_token() {
        let manager = SessionManager::init(MemoryTokenStore::with_raw("legacy-raw-token"));
        assert!(manager.is_authenticated());
        assert_eq!(manager.session().token.as_deref(), Some("legacy-raw-token"));
    }

    #[test]
    fn test_establish_without_token_keeps_state() {
        let mut manager = SessionManager::init(MemoryTokenStore::with_raw(r#""old""#));
        let err = manager.establish(AuthResponse::default()).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
        assert_eq!(manager.session().token.as_deref(), Some("old"));
    }
}
