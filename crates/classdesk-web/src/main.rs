mod components;
mod context;
mod pages;
mod router;
mod services;

use classdesk_shared::TaskBus;
use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::context::session::SessionProvider;
use crate::router::{switch, Route};

#[function_component(App)]
fn app() -> Html {
    let bus = use_memo((), |_| TaskBus::new());

    html! {
        <BrowserRouter>
            <SessionProvider>
                <ContextProvider<TaskBus> context={(*bus).clone()}>
                    <div id="app">
                        <components::header::Header />
                        <main>
                            <yew_router::Switch<Route> render={switch} />
                        </main>
                    </div>
                </ContextProvider<TaskBus>>
            </SessionProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
