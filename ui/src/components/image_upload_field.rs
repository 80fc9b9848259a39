use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::renthouse_form::{ImageSlot, ImageState};

#[derive(Properties, PartialEq)]
pub struct ImageUploadFieldProps {
    pub slot: ImageSlot,
    pub image: ImageState,
    /// A save or an upload in any slot is running; everything in the slot
    /// is locked.
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub error: Option<&'static str>,
    pub on_select: Callback<(ImageSlot, File)>,
    pub on_remove: Callback<ImageSlot>,
}

/// One image slot: a preview with a remove button once an image is set,
/// otherwise a drop-zone style upload button over a hidden file input.
#[function_component]
pub fn ImageUploadField(props: &ImageUploadFieldProps) -> Html {
    let file_input_ref = use_node_ref();
    let slot = props.slot;
    let locked = props.disabled || props.image.uploading;

    let on_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            // Reset so choosing the same file again still fires a change.
            input.set_value("");
            if let Some(file) = file {
                on_select.emit((slot, file));
            }
        })
    };

    let on_pick = {
        let file_input_ref = file_input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_remove = props.on_remove.reform(move |_: MouseEvent| slot);

    let body = match &props.image.preview_url {
        Some(preview_url) => html! {
            <div class="relative">
                <img
                    src={preview_url.clone()}
                    alt={slot.alt_text()}
                    class="w-full h-48 object-cover rounded-lg border \
                           border-neutral-200 dark:border-neutral-700"
                />
                <button
                    type="button"
                    onclick={on_remove}
                    disabled={locked}
                    title="Remove image"
                    class="absolute top-2 right-2 px-2 py-1 rounded-md text-sm \
                           text-white bg-red-600 hover:bg-red-700 \
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {"×"}
                </button>
            </div>
        },
        None => html! {
            <div class="border-2 border-dashed border-neutral-300 \
                        dark:border-neutral-600 rounded-lg p-6 text-center">
                <button
                    type="button"
                    onclick={on_pick}
                    disabled={locked}
                    class="mt-2 py-2 px-4 border border-neutral-300 \
                           dark:border-neutral-600 rounded-md text-sm font-medium \
                           text-neutral-700 dark:text-neutral-300 \
                           bg-white dark:bg-neutral-700 hover:bg-neutral-50 \
                           dark:hover:bg-neutral-600 \
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    if props.image.uploading {
                        {"Uploading..."}
                    } else {
                        {slot.upload_label()}
                    }
                </button>
                <p class="text-sm text-neutral-500 dark:text-neutral-400 mt-2">
                    {"PNG, JPG, GIF up to 5MB"}
                </p>
            </div>
        },
    };

    html! {
        <div class="space-y-3">
            <span class="block text-sm font-medium text-neutral-700 dark:text-neutral-300">
                {slot.label()}
            </span>
            {body}
            <input
                ref={file_input_ref}
                id={slot.input_id()}
                type="file"
                accept="image/*"
                class="hidden"
                onchange={on_change}
                disabled={locked}
            />
            if let Some(error) = props.error {
                <p class="text-sm text-red-600 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
