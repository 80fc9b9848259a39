use web_sys::File;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{
    EditQuery, Route, State,
    components::{FormField, ImageUploadField},
    contexts::use_toast,
    geolocation::current_position,
    get_api_client,
    hooks::{use_fetch, use_push_route, use_title},
    renthouse_editor::{
        self, EditorMode, SelectedFile, SubmitError, UploadError,
        UploadedImage,
    },
    renthouse_form::{EditorAction, EditorState, Field, ImageSlot},
};

/// `/owner/renthouses/new`, or `/owner/renthouses/new?edit=<id>` to edit.
#[function_component]
pub fn RenthouseEditorPage() -> Html {
    let location = use_location();
    let edit = location
        .and_then(|l| l.query::<EditQuery>().ok())
        .and_then(|q| q.edit);

    match EditorMode::from_query(edit.as_deref()) {
        Ok(mode) => html! {
            <RenthouseEditor key={format!("{mode:?}")} {mode} />
        },
        Err(e) => {
            tracing::warn!("{e}");
            html! {
                <div class="space-y-6">
                    <BackLink />
                    <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">{e.to_string()}</p>
                    </div>
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct RenthouseEditorProps {
    mode: EditorMode,
}

#[function_component]
fn RenthouseEditor(props: &RenthouseEditorProps) -> Html {
    let mode = props.mode;
    use_title(mode.title());

    let state = use_reducer(EditorState::default);
    let toast = use_toast();
    let push_route = use_push_route();
    let (_, store_dispatch) = use_store::<State>();

    let loaded = {
        let toast = toast.clone();
        use_fetch(mode, move || {
            let toast = toast.clone();
            async move {
                let EditorMode::Edit(renthouse_id) = mode else {
                    return Ok(None);
                };
                match renthouse_editor::load(&get_api_client(), renthouse_id)
                    .await
                {
                    Ok(editor_state) => Ok(Some(editor_state)),
                    Err(e) => {
                        tracing::error!(%renthouse_id, "Failed to load renthouse: {e}");
                        toast.error(e.to_string());
                        Err(e.to_string())
                    }
                }
            }
        })
    };

    {
        let state = state.clone();
        use_effect_with(loaded.data.clone(), move |data| {
            if let Some(Some(editor_state)) = data.as_ref() {
                state.dispatch(EditorAction::Reset(editor_state.clone()));
            }
        });
    }

    let on_edit = |field: Field| {
        let state = state.clone();
        Callback::from(move |value: String| {
            state.dispatch(EditorAction::Edit(field, value));
        })
    };

    let on_submit = {
        let state = state.clone();
        let toast = toast.clone();
        let push_route = push_route.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if state.controls_disabled() {
                return;
            }

            let state = state.clone();
            let toast = toast.clone();
            let push_route = push_route.clone();
            let store_dispatch = store_dispatch.clone();
            let form = state.form.clone();

            yew::platform::spawn_local(async move {
                state.dispatch(EditorAction::SaveStarted);

                let api_client = get_api_client();
                match renthouse_editor::submit(&api_client, mode, &form).await
                {
                    Ok(_) => {
                        toast.success(mode.success_message());
                        store_dispatch.reduce_mut(|s| s.clear_renthouses());
                        push_route.emit(Route::Renthouses);
                    }
                    Err(SubmitError::Invalid(errors)) => {
                        state.dispatch(EditorAction::Invalid(errors));
                    }
                    Err(SubmitError::Api(e)) => {
                        tracing::error!(?mode, "Failed to save renthouse: {e}");
                        toast.error(mode.failure_message());
                    }
                }

                state.dispatch(EditorAction::SaveFinished);
            });
        })
    };

    let on_locate = {
        let state = state.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                match current_position().await {
                    Ok(coords) => {
                        state.dispatch(EditorAction::LocationDetected {
                            latitude: coords.latitude,
                            longitude: coords.longitude,
                        });
                        toast.success("Location detected successfully!");
                    }
                    Err(e) => {
                        tracing::warn!("Geolocation failed: {e:?}");
                        toast.error(e.to_string());
                    }
                }
            });
        })
    };

    let on_select_image = {
        let state = state.clone();
        let toast = toast.clone();
        Callback::from(move |(slot, file): (ImageSlot, File)| {
            let state = state.clone();
            let toast = toast.clone();
            let file = gloo_file::File::from(file);
            let selected = SelectedFile {
                name: file.name(),
                content_type: file.raw_mime_type(),
                size: file.size(),
            };

            yew::platform::spawn_local(async move {
                state.dispatch(EditorAction::UploadStarted(slot));

                let api_client = get_api_client();
                let read = move || async move {
                    gloo_file::futures::read_as_bytes(&file)
                        .await
                        .map_err(|e| UploadError::Read(e.to_string()))
                };

                match renthouse_editor::upload_image(&api_client, &selected, read)
                    .await
                {
                    Ok(UploadedImage { path, preview_url }) => {
                        state.dispatch(EditorAction::Uploaded {
                            slot,
                            path,
                            preview_url,
                        });
                        toast.success("Image uploaded successfully!");
                    }
                    Err(e) => {
                        tracing::warn!(?slot, file = %selected.name, "Image upload failed: {e:?}");
                        state.dispatch(EditorAction::UploadFailed(slot));
                        toast.error(e.to_string());
                    }
                }
            });
        })
    };

    let on_remove_image = {
        let state = state.clone();
        Callback::from(move |slot: ImageSlot| {
            state.dispatch(EditorAction::RemoveImage(slot));
        })
    };

    let on_cancel = {
        let push_route = push_route.clone();
        Callback::from(move |_: MouseEvent| push_route.emit(Route::Renthouses))
    };

    let disabled = state.controls_disabled();
    let form = &state.form;
    let errors = &state.errors;

    let form_html = html! {
        <div class="bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
            <div class="mb-6">
                <h2 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">
                    {"Property Information"}
                </h2>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {mode.form_description()}
                </p>
            </div>

            <form onsubmit={on_submit} class="space-y-6" novalidate={true}>
                <div class="space-y-4">
                    <FormField
                        id="name"
                        label="Property Name"
                        placeholder="e.g., Sunny Apartments"
                        value={form.name.clone()}
                        error={errors.get(Field::Name)}
                        on_input={on_edit(Field::Name)}
                        {disabled}
                    />
                    <FormField
                        id="description"
                        label="Description (Optional)"
                        placeholder="Describe your property..."
                        rows={3}
                        value={form.description.clone()}
                        error={errors.get(Field::Description)}
                        on_input={on_edit(Field::Description)}
                        {disabled}
                    />
                </div>

                <div class="space-y-4">
                    <div class="flex items-center justify-between">
                        <span class="text-base font-medium text-neutral-900 dark:text-neutral-100">
                            {"Location"}
                        </span>
                        <button
                            type="button"
                            onclick={on_locate}
                            disabled={disabled}
                            class="py-1 px-3 border border-neutral-300 dark:border-neutral-600
                                   rounded-md text-sm font-medium text-neutral-700 dark:text-neutral-300
                                   bg-white dark:bg-neutral-700 hover:bg-neutral-50 dark:hover:bg-neutral-600
                                   disabled:opacity-50 disabled:cursor-not-allowed"
                        >
                            {"Use Current Location"}
                        </button>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <FormField
                            id="latitude"
                            label="Latitude"
                            placeholder="e.g., 40.7128"
                            input_type="number"
                            step="any"
                            value={form.latitude.clone()}
                            error={errors.get(Field::Latitude)}
                            on_input={on_edit(Field::Latitude)}
                            {disabled}
                        />
                        <FormField
                            id="longitude"
                            label="Longitude"
                            placeholder="e.g., -74.0060"
                            input_type="number"
                            step="any"
                            value={form.longitude.clone()}
                            error={errors.get(Field::Longitude)}
                            on_input={on_edit(Field::Longitude)}
                            {disabled}
                        />
                        <FormField
                            id="address"
                            label="Address"
                            placeholder="e.g., 123 Main Street, City, State"
                            value={form.address.clone()}
                            error={errors.get(Field::Address)}
                            on_input={on_edit(Field::Address)}
                            {disabled}
                        />
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <FormField
                        id="waterFee"
                        label="Water Fee"
                        placeholder="0.00"
                        input_type="number"
                        step="0.01"
                        value={form.water_fee.clone()}
                        error={errors.get(Field::WaterFee)}
                        on_input={on_edit(Field::WaterFee)}
                        {disabled}
                    />
                    <FormField
                        id="electricityFee"
                        label="Electricity Fee"
                        placeholder="0.00"
                        input_type="number"
                        step="0.01"
                        value={form.electricity_fee.clone()}
                        error={errors.get(Field::ElectricityFee)}
                        on_input={on_edit(Field::ElectricityFee)}
                        {disabled}
                    />
                    <FormField
                        id="baseRent"
                        label="Base Rent"
                        placeholder="0.00"
                        input_type="number"
                        step="0.01"
                        value={form.base_rent.clone()}
                        error={errors.get(Field::BaseRent)}
                        on_input={on_edit(Field::BaseRent)}
                        {disabled}
                    />
                </div>

                <div class="space-y-6">
                    {for [ImageSlot::Property, ImageSlot::QrCode].into_iter().map(|slot| html! {
                        <ImageUploadField
                            key={slot.input_id()}
                            {slot}
                            image={state.image(slot).clone()}
                            disabled={disabled}
                            error={errors.get(slot.field())}
                            on_select={on_select_image.clone()}
                            on_remove={on_remove_image.clone()}
                        />
                    })}
                </div>

                <div class="flex justify-end space-x-4 pt-6">
                    <button
                        type="button"
                        onclick={on_cancel}
                        disabled={disabled}
                        class="py-2 px-4 border border-neutral-300 dark:border-neutral-600
                               rounded-md shadow-sm text-sm font-medium text-neutral-700 dark:text-neutral-300
                               bg-white dark:bg-neutral-700 hover:bg-neutral-50 dark:hover:bg-neutral-600
                               disabled:opacity-50 disabled:cursor-not-allowed transition-colors duration-200"
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="submit"
                        disabled={disabled}
                        class="py-2 px-4 border border-transparent rounded-md shadow-sm
                               text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800
                               dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                               disabled:opacity-50 disabled:cursor-not-allowed transition-colors duration-200"
                    >
                        {mode.submit_label(state.saving)}
                    </button>
                </div>
            </form>
        </div>
    };

    html! {
        <div class="space-y-6">
            <BackLink />

            <div>
                <h1 class="text-3xl font-bold tracking-tight text-neutral-900 dark:text-neutral-100">
                    {mode.title()}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">{mode.subtitle()}</p>
            </div>

            if mode.is_edit() {
                {loaded.render("property data", move |_, _, _| form_html.clone())}
            } else {
                {form_html}
            }
        </div>
    }
}

#[function_component]
fn BackLink() -> Html {
    html! {
        <div class="flex items-center">
            <Link<Route>
                to={Route::Renthouses}
                classes="text-sm text-neutral-600 dark:text-neutral-400 hover:text-neutral-900 dark:hover:text-white"
            >
                {"← Back to Properties"}
            </Link<Route>>
        </div>
    }
}

