use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::session::use_session;
use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| {
            session.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>
                    <Link<Route> to={Route::Calendar}>{ "ClassDesk" }</Link<Route>>
                </h1>
                <nav>
                    if session.is_authenticated() {
                        <span class="user-name">{ session.session().display_name().to_string() }</span>
                        { " | " }
                        <button class="btn btn-link" onclick={on_logout}>{ "Sign out" }</button>
                    } else {
                        <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                        { " | " }
                        <Link<Route> to={Route::Register}>{ "Register" }</Link<Route>>
                    }
                </nav>
            </div>
        </header>
    }
}
