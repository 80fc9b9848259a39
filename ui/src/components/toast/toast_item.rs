use crate::contexts::toast::{Toast, ToastType, use_toast};
use yew::prelude::*;

struct ToastStyle {
    classes: &'static str,
    icon: &'static str,
    role: &'static str,
}

fn style(toast_type: ToastType) -> ToastStyle {
    match toast_type {
        ToastType::Error => ToastStyle {
            classes: "bg-red-50 dark:bg-red-900 border-red-200 \
                      dark:border-red-800 text-red-700 dark:text-red-400",
            icon: "✕",
            role: "alert",
        },
        ToastType::Success => ToastStyle {
            classes: "bg-green-50 dark:bg-green-900 border-green-200 \
                      dark:border-green-800 text-green-700 dark:text-green-400",
            icon: "✓",
            role: "status",
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast_id = props.toast.id;
    let on_dismiss = Callback::from(move |_: MouseEvent| toast_handle.remove(toast_id));
    let ToastStyle { classes, icon, role } = style(props.toast.toast_type);

    html! {
        <div
            role={role}
            class={format!("flex items-start gap-3 p-4 rounded-lg border shadow-lg {classes}")}
        >
            <span class="text-sm font-medium">{icon}</span>
            <p class="flex-1 min-w-0 text-sm font-medium leading-5">
                {&props.toast.message}
            </p>
            <button
                type="button"
                onclick={on_dismiss}
                title="Dismiss"
                class="text-lg leading-none text-neutral-400 hover:text-neutral-600 dark:hover:text-neutral-200"
            >
                {"×"}
            </button>
        </div>
    }
}
