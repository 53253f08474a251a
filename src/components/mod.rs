//! UI Components
//!
//! Leptos components for the menu pages.

mod admin_page;
mod category_filter;
mod delete_confirm_button;
mod loading_spinner;
mod menu_item_card;
mod menu_item_form;
mod menu_page;
mod qr_modal;

pub use admin_page::AdminPage;
pub use category_filter::CategoryFilter;
pub use delete_confirm_button::DeleteConfirmButton;
pub use loading_spinner::LoadingSpinner;
pub use menu_item_card::MenuItemCard;
pub use menu_item_form::MenuItemForm;
pub use menu_page::MenuPage;
pub use qr_modal::QrModal;
