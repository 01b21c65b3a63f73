//! Session context.
//!
//! The provider owns one [`SessionManager`] for the lifetime of the app and
//! mirrors its session into Yew state so that consumers re-render on login and
//! logout.

use std::cell::RefCell;
use std::rc::Rc;

use classdesk_shared::models::{AuthResponse, UserProfile};
use classdesk_shared::{ApiResult, Session, SessionManager};
use yew::prelude::*;

use crate::services::api;
use crate::services::storage::LocalTokenStore;

type Manager = SessionManager<Rc<LocalTokenStore>>;

#[derive(Clone)]
pub struct SessionHandle {
    state: UseStateHandle<Session>,
    manager: Rc<RefCell<Manager>>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        *self.state == *other.state && Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl SessionHandle {
    pub fn session(&self) -> &Session {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn establish(&self, auth: AuthResponse) -> ApiResult<()> {
        let mut manager = self.manager.borrow_mut();
        let session = manager.establish(auth)?.clone();
        self.state.set(session);
        Ok(())
    }

    pub fn set_user(&self, user: UserProfile) {
        let mut manager = self.manager.borrow_mut();
        manager.set_user(user);
        self.state.set(manager.session().clone());
    }

    pub fn logout(&self) {
        let mut manager = self.manager.borrow_mut();
        manager.logout();
        self.state.set(manager.session().clone());
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Html,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let manager = use_memo((), |_| RefCell::new(Manager::init(api::token_store())));
    let state = {
        let manager = manager.clone();
        use_state(move || manager.borrow().session().clone())
    };
    let handle = SessionHandle { state, manager };

    // Load the profile for a token restored from storage
    {
        let handle = handle.clone();
        let token = handle.session().token.clone();
        use_effect_with(token, move |token| {
            if token.is_some() && handle.user().is_none() {
                wasm_bindgen_futures::spawn_local(async move {
                    match api::client().current_user().await {
                        Ok(user) => handle.set_user(user),
                        Err(e) => tracing::warn!("Failed to load current user: {}", e),
                    }
                });
            }
            || ()
        });
    }

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider missing from the component tree")
}
