use classdesk_shared::session::encode_token;
use classdesk_shared::{ApiError, ApiResult, TokenStore};
use gloo::storage::{LocalStorage, Storage};

/// Token persisted in `window.localStorage`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for LocalTokenStore {
    fn read(&self) -> Option<String> {
        // Read raw: the value may predate JSON encoding
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .and_then(|raw| classdesk_shared::session::decode_stored_token(&raw))
    }

    fn write(&self, token: &str) -> ApiResult<()> {
        let encoded = encode_token(token)?;
        LocalStorage::raw()
            .set_item(&self.key, &encoded)
            .map_err(|e| ApiError::Storage(format!("{:?}", e)))
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_store_round_trip() {
        let store = LocalTokenStore::new("classdesk-test-token");
        store.write("abc").unwrap();
        assert_eq!(
            LocalStorage::raw().get_item("classdesk-test-token").unwrap().as_deref(),
            Some("\"abc\"")
        );
        assert_eq!(store.read().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[wasm_bindgen_test]
    fn test_local_store_reads_raw_value() {
        LocalStorage::raw()
            .set_item("classdesk-test-raw", "plain-token")
            .unwrap();
        let store = LocalTokenStore::new("classdesk-test-raw");
        assert_eq!(store.read().as_deref(), Some("plain-token"));
        store.clear();
    }
}
