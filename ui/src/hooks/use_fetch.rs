use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::FetchState;

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// - No data + loading: spinner with "Loading {context}..."
    /// - No data + error: "Error loading {context}: ..."
    /// - Has data: `render_fn(data, is_loading, error)`, where `error` is
    ///   from a failed fetch and the previous data is still shown
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            None if self.is_loading => html! {
                <div class="flex justify-center items-center py-12">
                    <span class="h-6 w-6 rounded-full border-2 border-neutral-300 \
                                 border-t-neutral-900 animate-spin" />
                    <span class="ml-2 text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </span>
                </div>
            },
            None => match &self.error {
                Some(error) => html! {
                    <div class="p-4 rounded-md bg-red-50 \
                               dark:bg-red-900/20 border \
                               border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 \
                                  dark:text-red-400">
                            {format!("Error loading {}: {}", context, error)}
                        </p>
                    </div>
                },
                None => html! {
                    <div class="text-center py-12">
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {format!("No {} found", context)}
                        </p>
                    </div>
                },
            },
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Fetches on mount and whenever `deps` change.
///
/// `fetch_fn` captures whatever it needs; `deps` only drives
/// `use_callback`/`use_effect_with` dependency tracking.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<String>);
    // Starts true so the first render already shows the loading state.
    let is_loading = use_state(|| true);

    let fetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_fn = fetch_fn.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error.set(None);

                match fetch_fn().await {
                    Ok(result) => data.set(FetchState::Fetched(result)),
                    Err(e) => {
                        tracing::warn!("Fetch failed: {e}");
                        error.set(Some(e));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    use_effect_with(deps, move |_| {
        fetch.emit(());
    });

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
    }
}

/// Like [`use_fetch`], for data cached in the Yewdux store.
///
/// 1. `get_cached` reads the cached value from global state
/// 2. `should_fetch` decides whether the cache needs filling
/// 3. `fetch_and_cache` calls the API and writes the result to the store
#[hook]
pub fn use_fetch_with_cache<T, D, GetCached, ShouldFetch, FetchAndCache, Fut>(
    deps: D,
    get_cached: GetCached,
    should_fetch: ShouldFetch,
    fetch_and_cache: FetchAndCache,
) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    GetCached: Fn() -> Option<T> + 'static,
    ShouldFetch: Fn() -> bool + 'static,
    FetchAndCache: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let fetch = {
        let error = error.clone();
        let is_loading = is_loading.clone();
        let fetch_and_cache = Rc::new(fetch_and_cache);

        use_callback(deps.clone(), move |_, _| {
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_and_cache = fetch_and_cache.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error.set(None);

                if let Err(e) = fetch_and_cache().await {
                    tracing::warn!("Fetch failed: {e}");
                    error.set(Some(e));
                }

                is_loading.set(false);
            });
        })
    };

    // Refetch whenever the cache gets invalidated, not only on mount.
    let needs_fetch = should_fetch();
    {
        let is_loading = is_loading.clone();
        let error = error.clone();

        use_effect_with((deps, needs_fetch), move |(_, needs_fetch)| {
            if *needs_fetch && !*is_loading && error.is_none() {
                fetch.emit(());
            }
        });
    }

    let data = match get_cached() {
        Some(cached) => FetchState::Fetched(cached),
        None => FetchState::NotFetched,
    };

    let effective_is_loading =
        *is_loading || (!data.is_fetched() && error.is_none());

    FetchHookReturn {
        data,
        is_loading: effective_is_loading,
        error: (*error).clone(),
    }
}
