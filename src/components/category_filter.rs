//! Category Filter Component
//!
//! Pill row for narrowing the visible items. `"All"` comes first; every
//! other pill carries the live count for its category.

use leptos::prelude::*;

use crate::catalog::{category_counts, ALL_CATEGORIES};
use crate::models::MenuItem;

#[component]
pub fn CategoryFilter(
    items: Signal<Vec<MenuItem>>,
    selected: ReadSignal<String>,
    set_selected: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="category-filter">
            <For
                each=move || category_counts(&items.get())
                key=|(name, count)| (name.clone(), *count)
                children=move |(name, count)| {
                    let label = if name == ALL_CATEGORIES {
                        "All Items".to_string()
                    } else {
                        format!("{name} ({count})")
                    };
                    let value = name.clone();
                    let pill_class = {
                        let value = value.clone();
                        move || {
                            if selected.get() == value {
                                "category-pill active"
                            } else {
                                "category-pill"
                            }
                        }
                    };
                    view! {
                        <button class=pill_class on:click=move |_| set_selected.set(value.clone())>
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}
