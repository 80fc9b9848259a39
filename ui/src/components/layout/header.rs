use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex-shrink-0">
                        <Link<Route>
                            to={Route::Renthouses}
                            classes="text-xl font-semibold text-neutral-900 dark:text-white"
                        >
                            {"RentHouse"}
                        </Link<Route>>
                    </div>
                    <nav class="flex items-center space-x-4">
                        <Link<Route>
                            to={Route::Renthouses}
                            classes="text-sm text-neutral-600 dark:text-neutral-400 hover:text-neutral-900 dark:hover:text-white"
                        >
                            {"My Properties"}
                        </Link<Route>>
                    </nav>
                </div>
            </div>
        </header>
    }
}
