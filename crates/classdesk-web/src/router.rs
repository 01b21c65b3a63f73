use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::session::use_session;
use crate::pages::{
    calendar::CalendarPage, day_detail::DayDetail, login::Login, not_found::NotFound,
    register::Register, verify_email::VerifyEmail,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Calendar,
    #[at("/day/:date")]
    Day { date: String },
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/verify-email")]
    VerifyEmail,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Calendar => html! { <RequireAuth><CalendarPage /></RequireAuth> },
        Route::Day { date } => html! { <RequireAuth><DayDetail {date} /></RequireAuth> },
        Route::Login => html! { <Login /> },
        Route::Register => html! { <Register /> },
        Route::VerifyEmail => html! { <VerifyEmail /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[derive(Properties, PartialEq)]
struct RequireAuthProps {
    children: Html,
}

/// Shows the login form in place of `children` until a token exists.
#[function_component(RequireAuth)]
fn require_auth(props: &RequireAuthProps) -> Html {
    let session = use_session();
    if session.is_authenticated() {
        props.children.clone()
    } else {
        html! { <Login /> }
    }
}
