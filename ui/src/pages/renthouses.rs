use payloads::{Renthouse, RenthouseId};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State,
    contexts::use_toast,
    get_api_client,
    hooks::{use_push_editor, use_renthouses, use_title},
};

const PRIMARY_BUTTON: &str = "bg-neutral-900 hover:bg-neutral-800 dark:bg-neutral-100 \
    dark:text-neutral-900 dark:hover:bg-neutral-200 text-white px-4 py-2 \
    rounded-md text-sm font-medium transition-colors";

/// `/owner/renthouses`: the owner's properties.
#[function_component]
pub fn RenthousesPage() -> Html {
    use_title("My Properties");

    let renthouses_hook = use_renthouses();
    let push_editor = use_push_editor();
    let toast = use_toast();
    let (_, dispatch) = use_store::<State>();
    let deleting = use_state(|| None::<RenthouseId>);

    let on_add = {
        let push_editor = push_editor.clone();
        Callback::from(move |_: MouseEvent| push_editor.emit(None))
    };

    let on_delete = {
        let deleting = deleting.clone();
        Callback::from(move |renthouse_id: RenthouseId| {
            if deleting.is_some() {
                return;
            }
            let deleting = deleting.clone();
            let toast = toast.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                deleting.set(Some(renthouse_id));

                let api_client = get_api_client();
                match api_client.delete_renthouse(&renthouse_id).await {
                    Ok(()) => {
                        tracing::info!(%renthouse_id, "Deleted renthouse");
                        toast.success("Property deleted successfully!");
                        dispatch.reduce_mut(|s| s.clear_renthouses());
                    }
                    Err(e) => {
                        tracing::error!(%renthouse_id, "Failed to delete renthouse: {e}");
                        toast.error(format!("Failed to delete property: {e}"));
                    }
                }

                deleting.set(None);
            });
        })
    };

    html! {
        <div class="space-y-8">
            <div class="flex justify-between items-center">
                <div>
                    <h1 class="text-3xl font-bold text-neutral-900 dark:text-neutral-100">
                        {"My Properties"}
                    </h1>
                    <p class="text-lg text-neutral-600 dark:text-neutral-400 mt-2">
                        {"Manage your rental properties"}
                    </p>
                </div>
                <button onclick={on_add.clone()} class={PRIMARY_BUTTON}>
                    {"Add New Property"}
                </button>
            </div>

            {renthouses_hook.render("properties", move |renthouses, _, _| {
                if renthouses.is_empty() {
                    return html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400 mb-4">
                                {"You haven't added any properties yet."}
                            </p>
                            <button onclick={on_add.clone()} class={PRIMARY_BUTTON}>
                                {"Add Your First Property"}
                            </button>
                        </div>
                    };
                }

                html! {
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                        {for renthouses.iter().map(|renthouse| html! {
                            <RenthouseCard
                                key={renthouse.id.to_string()}
                                renthouse={renthouse.clone()}
                                deleting={*deleting == Some(renthouse.id)}
                                on_edit={push_editor.reform(Some)}
                                on_delete={on_delete.clone()}
                            />
                        })}
                    </div>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RenthouseCardProps {
    renthouse: Renthouse,
    deleting: bool,
    on_edit: Callback<RenthouseId>,
    on_delete: Callback<RenthouseId>,
}

#[function_component]
fn RenthouseCard(props: &RenthouseCardProps) -> Html {
    let renthouse = &props.renthouse;
    let renthouse_id = renthouse.id;
    let on_edit = props.on_edit.reform(move |_: MouseEvent| renthouse_id);
    let on_delete = props.on_delete.reform(move |_: MouseEvent| renthouse_id);
    let image_url = renthouse
        .image_url
        .as_deref()
        .filter(|path| !path.is_empty())
        .map(|path| get_api_client().asset_url(path));

    html! {
        <div class="bg-white dark:bg-neutral-800 rounded-lg shadow-md border border-neutral-200 dark:border-neutral-700 overflow-hidden">
            if let Some(src) = image_url {
                <img src={src} alt={renthouse.name.clone()} class="w-full h-40 object-cover" />
            }
            <div class="p-6 space-y-4">
                <div>
                    <h3 class="text-xl font-semibold text-neutral-900 dark:text-neutral-100">
                        {&renthouse.name}
                    </h3>
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">
                        {&renthouse.address}
                    </p>
                </div>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {format!("Base rent: {}", renthouse.base_rent)}
                </p>
                <div class="flex space-x-3 pt-2">
                    <button
                        onclick={on_edit}
                        disabled={props.deleting}
                        class="flex-1 bg-neutral-100 hover:bg-neutral-200 dark:bg-neutral-700 dark:hover:bg-neutral-600 text-neutral-900 dark:text-neutral-100 px-4 py-2 rounded-md text-sm font-medium transition-colors disabled:opacity-50"
                    >
                        {"Edit"}
                    </button>
                    <button
                        onclick={on_delete}
                        disabled={props.deleting}
                        class="flex-1 bg-red-600 hover:bg-red-700 text-white px-4 py-2 rounded-md text-sm font-medium transition-colors disabled:opacity-50"
                    >
                        if props.deleting { {"Deleting..."} } else { {"Delete"} }
                    </button>
                </div>
            </div>
        </div>
    }
}
