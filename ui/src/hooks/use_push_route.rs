use payloads::RenthouseId;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{EditQuery, Route};

/// Returns a callback that navigates to a route and scrolls to top.
/// Use this instead of `navigator.push()` for most navigation.
#[hook]
pub fn use_push_route() -> Callback<Route> {
    let navigator = use_navigator();
    Callback::from(move |route: Route| {
        let Some(navigator) = &navigator else {
            tracing::error!("Navigation attempted outside of a router");
            return;
        };
        navigator.push(&route);
        scroll_to_top();
    })
}

/// Returns a callback that opens the renthouse editor, in edit mode when
/// given an id.
#[hook]
pub fn use_push_editor() -> Callback<Option<RenthouseId>> {
    let navigator = use_navigator();
    Callback::from(move |renthouse_id: Option<RenthouseId>| {
        let Some(navigator) = &navigator else {
            tracing::error!("Navigation attempted outside of a router");
            return;
        };
        let query = EditQuery {
            edit: renthouse_id.map(|id| id.to_string()),
        };
        if let Err(e) = navigator.push_with_query(&Route::RenthouseEditor, &query)
        {
            tracing::error!("Failed to open editor: {e}");
            return;
        }
        scroll_to_top();
    })
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
