//! View Tab Bar Component
//!
//! Switches between the card list and the canvas, and opens the library.

use leptos::prelude::*;

use crate::context::{use_app_context, View};

const VIEWS: &[(View, &str)] = &[(View::Cards, "Cards"), (View::Canvas, "Canvas")];

#[component]
pub fn ViewTabBar(
    settings_open: ReadSignal<bool>,
    set_settings_open: WriteSignal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="view-tab-bar">
            {VIEWS.iter().map(|&(tab, label)| {
                let is_active = move || ctx.view.get() == tab;
                view! {
                    <button
                        class=move || if is_active() { "view-tab active" } else { "view-tab" }
                        on:click=move |_| ctx.set_view.set(tab)
                    >
                        {label}
                    </button>
                }
            }).collect_view()}

            <span class="view-tab-spacer"></span>

            <button class="view-tab" on:click=move |_| ctx.set_library_open.set(true)>
                "Library"
            </button>
            <button
                class=move || if settings_open.get() { "view-tab active" } else { "view-tab" }
                title="Settings"
                on:click=move |_| set_settings_open.update(|open| *open = !*open)
            >
                "⚙"
            </button>
        </nav>
    }
}
