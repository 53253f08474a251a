//! Menu Item Form Component
//!
//! Modal form for creating and editing menu items. Validation runs before
//! any network call; a picked image is uploaded first and the save only
//! runs after the upload succeeds, so an upload failure is reported
//! distinctly and never leaves a half-saved item.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_toast::use_toasts;
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement, Url};

use crate::config::Config;
use crate::menu::MenuHandle;
use crate::models::{MenuItem, MenuItemDraft};
use crate::upload::upload_image;

/// Categories offered in the form selector.
pub const CATEGORIES: &[&str] = &["Main Course", "Appetizers", "Drinks", "Desserts", "Sides"];

/// Check the form fields, returning the parsed price.
fn validate(name: &str, price: &str, category: &str) -> Result<f64, String> {
    if name.trim().is_empty() {
        return Err("Item name is required".to_string());
    }
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| "Price must be a number".to_string())?;
    if price < 0.0 {
        return Err("Price cannot be negative".to_string());
    }
    if category.is_empty() {
        return Err("Select a category".to_string());
    }
    Ok(price)
}

#[component]
pub fn MenuItemForm(
    /// Item being edited; `None` renders the add form.
    #[prop(optional)]
    item: Option<MenuItem>,
    menu: MenuHandle,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let config = expect_context::<Config>();
    let toasts = use_toasts();

    let is_edit = item.is_some();
    let editing_id = item.as_ref().map(|item| item.id.clone());

    // Field state seeded from the edit target's values at open time.
    let (name, set_name) = signal(item.as_ref().map(|i| i.name.clone()).unwrap_or_default());
    let (price, set_price) = signal(
        item.as_ref()
            .map(|i| i.price.to_string())
            .unwrap_or_default(),
    );
    let (category, set_category) = signal(
        item.as_ref()
            .map(|i| i.category.clone())
            .unwrap_or_default(),
    );
    let (description, set_description) = signal(
        item.as_ref()
            .and_then(|i| i.description.clone())
            .unwrap_or_default(),
    );
    let (image_url, set_image_url) = signal(
        item.as_ref()
            .and_then(|i| i.image.clone())
            .unwrap_or_default(),
    );
    let (form_error, set_form_error) = signal(None::<String>);
    let (saving, set_saving) = signal(false);

    // The picked file never enters a signal; it is only read at submit.
    let picked_file: Rc<RefCell<Option<File>>> = Rc::new(RefCell::new(None));

    let on_file_change = {
        let picked_file = Rc::clone(&picked_file);
        move |ev: web_sys::Event| {
            let file = ev
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            let Some(file) = file else {
                return;
            };
            match Url::create_object_url_with_blob(&file) {
                Ok(preview) => set_image_url.set(preview),
                Err(err) => warn!("image preview failed: {err:?}"),
            }
            *picked_file.borrow_mut() = Some(file);
        }
    };

    let on_submit = {
        let picked_file = Rc::clone(&picked_file);
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() {
                return;
            }
            set_form_error.set(None);

            let price_value = match validate(
                &name.get_untracked(),
                &price.get_untracked(),
                &category.get_untracked(),
            ) {
                Ok(value) => value,
                Err(message) => {
                    set_form_error.set(Some(message));
                    return;
                }
            };
            set_saving.set(true);

            let config = config.clone();
            let menu = menu.clone();
            let editing_id = editing_id.clone();
            let file = picked_file.borrow().clone();
            spawn_local(async move {
                let image = match &file {
                    Some(file) => match upload_image(&config, file).await {
                        Ok(url) => Some(url),
                        Err(err) => {
                            error!("image upload failed: {err}");
                            set_form_error.set(Some("Failed to upload image".to_string()));
                            toasts.error("Failed to upload image");
                            set_saving.set(false);
                            return;
                        }
                    },
                    None => {
                        let existing = image_url.get_untracked();
                        (!existing.is_empty()).then_some(existing)
                    }
                };

                let description = description.get_untracked();
                let draft = MenuItemDraft {
                    name: name.get_untracked().trim().to_string(),
                    price: price_value,
                    category: category.get_untracked(),
                    description: (!description.trim().is_empty())
                        .then(|| description.trim().to_string()),
                    image,
                };

                let result = match &editing_id {
                    Some(id) => menu.update(id, &draft).await,
                    None => menu.add(&draft).await,
                };

                if result.success {
                    if editing_id.is_some() {
                        toasts.success("Menu item updated successfully!");
                    } else {
                        toasts.success("Menu item added successfully!");
                    }
                    on_close.run(());
                } else {
                    let message = result
                        .error
                        .unwrap_or_else(|| "Failed to save item".to_string());
                    set_form_error.set(Some(message.clone()));
                    toasts.error(message);
                }
                set_saving.set(false);
            });
        }
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal form-modal">
                <div class="modal-header">
                    <h2 class="modal-title">
                        {if is_edit { "Edit Menu Item" } else { "Add New Menu Item" }}
                    </h2>
                    <button class="modal-close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>

                {move || {
                    form_error
                        .get()
                        .map(|message| view! { <div class="form-error">{message}</div> })
                }}

                <form class="menu-item-form" on:submit=on_submit>
                    <label class="form-field">
                        "Item Name"
                        <input
                            type="text"
                            required
                            placeholder="Enter item name"
                            prop:value=move || name.get()
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </label>

                    <div class="form-row">
                        <label class="form-field">
                            "Price (₦)"
                            <input
                                type="number"
                                required
                                min="0"
                                step="0.01"
                                placeholder="0.00"
                                prop:value=move || price.get()
                                on:input=move |ev| set_price.set(event_target_value(&ev))
                            />
                        </label>

                        <label class="form-field">
                            "Category"
                            <select
                                required
                                prop:value=move || category.get()
                                on:change=move |ev| set_category.set(event_target_value(&ev))
                            >
                                <option value="">"Select category"</option>
                                {CATEGORIES
                                    .iter()
                                    .map(|name| view! { <option value=*name>{*name}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>

                    <label class="form-field">
                        "Description (Optional)"
                        <textarea
                            rows="3"
                            placeholder="Brief description of the item"
                            prop:value=move || description.get()
                            on:input=move |ev| set_description.set(event_target_value(&ev))
                        ></textarea>
                    </label>

                    <div class="form-field">
                        "Image"
                        {move || {
                            let url = image_url.get();
                            (!url.is_empty())
                                .then(|| view! { <img class="image-preview" src=url alt="Preview"/> })
                        }}
                        <input type="file" accept="image/*" on:change=on_file_change/>
                    </div>

                    <div class="form-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="submit-btn" disabled=move || saving.get()>
                            {move || {
                                if saving.get() {
                                    "Saving..."
                                } else if is_edit {
                                    "Update Item"
                                } else {
                                    "Add Item"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
