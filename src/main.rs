//! Chefly Menu Frontend Entry Point

mod app;
mod catalog;
mod components;
mod config;
mod currency;
mod menu;
mod models;
mod remote;
mod upload;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("logger already initialized");
    mount_to_body(App);
}
