use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const INPUT_CLASSES: &str = "w-full px-3 py-2 border rounded-md shadow-sm \
    bg-white dark:bg-neutral-700 text-neutral-900 dark:text-neutral-100 \
    focus:outline-none focus:ring-2 focus:ring-neutral-500 \
    dark:focus:ring-neutral-400 disabled:opacity-50 disabled:cursor-not-allowed";

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or_default]
    pub error: Option<&'static str>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    /// Input `type`; ignored for textareas.
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub step: Option<AttrValue>,
    /// Render a textarea with this many rows instead of an input.
    #[prop_or_default]
    pub rows: Option<u32>,
}

/// A labelled input with its inline validation error.
#[function_component]
pub fn FormField(props: &FormFieldProps) -> Html {
    let border = if props.error.is_some() {
        "border-red-500"
    } else {
        "border-neutral-300 dark:border-neutral-600"
    };

    let control = match props.rows {
        Some(rows) => {
            let on_input = props.on_input.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                on_input.emit(textarea.value());
            });
            html! {
                <textarea
                    id={props.id.clone()}
                    rows={rows.to_string()}
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    disabled={props.disabled}
                    {oninput}
                    class={format!("{INPUT_CLASSES} {border}")}
                />
            }
        }
        None => {
            let on_input = props.on_input.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_input.emit(input.value());
            });
            html! {
                <input
                    id={props.id.clone()}
                    type={props.input_type.clone()}
                    step={props.step.clone()}
                    value={props.value.clone()}
                    placeholder={props.placeholder.clone()}
                    disabled={props.disabled}
                    {oninput}
                    class={format!("{INPUT_CLASSES} {border}")}
                />
            }
        }
    };

    html! {
        <div class="space-y-2">
            <label
                for={props.id.clone()}
                class="block text-sm font-medium text-neutral-700 dark:text-neutral-300"
            >
                {&props.label}
            </label>
            {control}
            if let Some(error) = props.error {
                <p class="text-sm text-red-600 dark:text-red-400">{error}</p>
            }
        </div>
    }
}
