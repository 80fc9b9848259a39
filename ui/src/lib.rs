use payloads::APIClient;
use serde::{Deserialize, Serialize};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod contexts;
pub mod geolocation;
pub mod hooks;
mod logs;
pub mod pages;
pub mod renthouse_editor;
pub mod renthouse_form;
pub mod state;

pub use state::State;

use components::layout::MainLayout;
use contexts::ToastProvider;
use pages::{NotFoundPage, RenthouseEditorPage, RenthousesPage};

/// API base used when `API_URL` is not set at build time.
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Where the auth system leaves the bearer token.
const TOKEN_STORAGE_KEY: &str = "token";

/// Global API client, configured at build time and authenticated with the
/// token from local storage when one is present.
pub fn get_api_client() -> APIClient {
    let address = option_env!("API_URL").unwrap_or(DEFAULT_API_URL).to_string();

    APIClient {
        address,
        auth_token: stored_token(),
        inner_client: reqwest::Client::new(),
    }
}

fn stored_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(TOKEN_STORAGE_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/owner/renthouses")]
    Renthouses,
    #[at("/owner/renthouses/new")]
    RenthouseEditor,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query string of [`Route::RenthouseEditor`]. `?edit=<id>` opens an
/// existing renthouse; no query creates a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<String>,
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();

    html! {
        <ToastProvider>
            <BrowserRouter>
                <MainLayout>
                    <Switch<Route> render={switch} />
                </MainLayout>
            </BrowserRouter>
        </ToastProvider>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Renthouses} /> },
        Route::Renthouses => html! { <RenthousesPage /> },
        Route::RenthouseEditor => html! { <RenthouseEditorPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
