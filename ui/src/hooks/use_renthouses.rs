use payloads::Renthouse;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State, get_api_client,
    hooks::{FetchHookReturn, use_fetch_with_cache},
};

/// The current owner's renthouses, cached in global state until a create,
/// update or delete invalidates them.
#[hook]
pub fn use_renthouses() -> FetchHookReturn<Vec<Renthouse>> {
    let (state, dispatch) = use_store::<State>();

    let get_cached_state = state.clone();
    let should_fetch_state = state.clone();
    let fetch_dispatch = dispatch.clone();

    use_fetch_with_cache(
        (),
        move || get_cached_state.get_renthouses().cloned(),
        move || !should_fetch_state.has_renthouses_loaded(),
        move || {
            let dispatch = fetch_dispatch.clone();
            async move {
                let api_client = get_api_client();
                let renthouses = api_client
                    .list_my_renthouses()
                    .await
                    .map_err(|e| e.to_string())?;
                dispatch.reduce_mut(|s| {
                    s.set_renthouses(renthouses.clone());
                });
                Ok(renthouses)
            }
        },
    )
}
