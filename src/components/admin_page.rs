//! Admin Page
//!
//! CRUD surface for the menu: category filter with counts, add/edit forms
//! (one visible at a time), inline delete confirmation, and a toast for
//! every mutation outcome.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_toast::use_toasts;

use crate::catalog::{filter_items, ALL_CATEGORIES};
use crate::components::menu_item_card::PLACEHOLDER_IMAGE;
use crate::components::{CategoryFilter, DeleteConfirmButton, LoadingSpinner, MenuItemForm};
use crate::currency::format_price;
use crate::menu::use_menu;
use crate::models::MenuItem;
use crate::remote::RealtimeDb;

#[component]
pub fn AdminPage() -> impl IntoView {
    let db = expect_context::<RealtimeDb>();
    let menu = StoredValue::new(use_menu(Arc::new(db)));
    let toasts = use_toasts();

    let items = menu.get_value().items;
    let loading = menu.get_value().loading;

    let (selected, set_selected) = signal(ALL_CATEGORIES.to_string());
    let (show_add_form, set_show_add_form) = signal(false);
    let (editing, set_editing) = signal(None::<MenuItem>);

    let visible = Signal::derive(move || filter_items(&items.get(), &selected.get()));

    // One form at a time: the add form clears any edit target and vice versa.
    let add_form = move || {
        show_add_form.get().then(|| {
            view! {
                <MenuItemForm
                    menu=menu.get_value()
                    on_close=move |_: ()| set_show_add_form.set(false)
                />
            }
        })
    };
    let edit_form = move || {
        editing.get().map(|item| {
            view! {
                <MenuItemForm
                    item=item
                    menu=menu.get_value()
                    on_close=move |_: ()| set_editing.set(None)
                />
            }
        })
    };

    view! {
        <div class="page admin-page">
            <header class="page-header">
                <h1>"Admin Panel"</h1>
            </header>

            <div class="admin-controls">
                <CategoryFilter items=items selected=selected set_selected=set_selected/>
                <button
                    class="add-btn"
                    on:click=move |_| {
                        set_editing.set(None);
                        set_show_add_form.set(true);
                    }
                >
                    "+ Add New Item"
                </button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <LoadingSpinner/> }>
                <Show
                    when=move || !visible.get().is_empty()
                    fallback=move || {
                        view! {
                            <div class="empty-state">
                                <h3>"No items found"</h3>
                                <p>
                                    {move || {
                                        if selected.get() == ALL_CATEGORIES {
                                            "Add your first menu item"
                                        } else {
                                            "No items in this category"
                                        }
                                    }}
                                </p>
                            </div>
                        }
                    }
                >
                    <div class="admin-grid">
                        <For
                            each=move || visible.get()
                            key=|item| item.id.clone()
                            children={
                                move |item| {
                                    let menu = menu.get_value();
                                    let edit_target = item.clone();
                                    let delete_id = item.id.clone();
                                    let on_delete = Callback::new(move |_: ()| {
                                        let menu = menu.clone();
                                        let id = delete_id.clone();
                                        spawn_local(async move {
                                            let result = menu.remove(&id).await;
                                            if result.success {
                                                toasts.success("Menu item deleted successfully!");
                                            } else {
                                                toasts.error(
                                                    result
                                                        .error
                                                        .unwrap_or_else(|| "Failed to delete item".to_string()),
                                                );
                                            }
                                        });
                                    });
                                    let image = item
                                        .image
                                        .clone()
                                        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

                                    view! {
                                        <div class="admin-card">
                                            <img class="admin-card-image" src=image alt=item.name.clone()/>
                                            <div class="admin-card-body">
                                                <h3 class="admin-card-name">{item.name.clone()}</h3>
                                                {item
                                                    .description
                                                    .clone()
                                                    .map(|text| {
                                                        view! { <p class="admin-card-description">{text}</p> }
                                                    })}
                                                <div class="admin-card-meta">
                                                    <span class="admin-card-price">
                                                        {format_price(item.price)}
                                                    </span>
                                                    <span class="admin-card-category">
                                                        {item.category.clone()}
                                                    </span>
                                                </div>
                                                <div class="admin-card-actions">
                                                    <button
                                                        class="edit-btn"
                                                        on:click=move |_| {
                                                            set_show_add_form.set(false);
                                                            set_editing.set(Some(edit_target.clone()));
                                                        }
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <DeleteConfirmButton
                                                        button_label="Delete"
                                                        on_confirm=on_delete
                                                    />
                                                </div>
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            {add_form}
            {edit_form}
        </div>
    }
}
