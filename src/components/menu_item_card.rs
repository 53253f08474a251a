//! Menu Item Card Component
//!
//! Public-facing card for a single menu item.

use leptos::prelude::*;

use crate::currency::format_price;
use crate::models::MenuItem;

/// Fallback shown when an item has no image.
pub(crate) const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

#[component]
pub fn MenuItemCard(item: MenuItem) -> impl IntoView {
    let image = item
        .image
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    view! {
        <div class="menu-card">
            <img class="menu-card-image" src=image alt=item.name.clone()/>
            <div class="menu-card-body">
                <h3 class="menu-card-name">{item.name.clone()}</h3>
                {item
                    .description
                    .clone()
                    .map(|text| view! { <p class="menu-card-description">{text}</p> })}
                <div class="menu-card-footer">
                    <span class="menu-card-price">{format_price(item.price)}</span>
                    <span class="menu-card-category">{item.category.clone()}</span>
                </div>
            </div>
        </div>
    }
}
