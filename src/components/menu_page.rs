//! Public Menu Page
//!
//! Read-only menu browsing: category filter, item grid, QR share modal.

use std::sync::Arc;

use leptos::prelude::*;

use crate::catalog::{filter_items, ALL_CATEGORIES};
use crate::components::{CategoryFilter, LoadingSpinner, MenuItemCard, QrModal};
use crate::menu::use_menu;
use crate::remote::RealtimeDb;

#[component]
pub fn MenuPage() -> impl IntoView {
    let db = expect_context::<RealtimeDb>();
    let menu = use_menu(Arc::new(db));
    let items = menu.items;
    let loading = menu.loading;
    let error = menu.error;

    let (selected, set_selected) = signal(ALL_CATEGORIES.to_string());
    let (show_qr, set_show_qr) = signal(false);

    let visible = Signal::derive(move || filter_items(&items.get(), &selected.get()));

    view! {
        <div class="page menu-page">
            <header class="page-header">
                <h1>"The Chefly Menu"</h1>
                <button class="qr-btn" on:click=move |_| set_show_qr.set(true)>
                    "QR Code"
                </button>
            </header>

            <Show when=move || show_qr.get()>
                <QrModal on_close=move |_: ()| set_show_qr.set(false)/>
            </Show>

            {move || {
                if loading.get() {
                    return view! { <LoadingSpinner/> }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! {
                        <div class="page-error">
                            <h2>"Error"</h2>
                            <p>{message}</p>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="menu-content">
                        <CategoryFilter items=items selected=selected set_selected=set_selected/>
                        <Show
                            when=move || !visible.get().is_empty()
                            fallback=|| {
                                view! {
                                    <div class="empty-state">
                                        <h3>"No items found"</h3>
                                        <p>"Try selecting a different category"</p>
                                    </div>
                                }
                            }
                        >
                            <div class="menu-grid">
                                <For
                                    each=move || visible.get()
                                    key=|item| item.id.clone()
                                    children=move |item| view! { <MenuItemCard item=item/> }
                                />
                            </div>
                        </Show>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
