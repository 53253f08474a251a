//! Chefly Menu App
//!
//! Router plus app-wide context: the database handle, the endpoint config,
//! and the toast queue live here so both pages share one of each.

use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use leptos_toast::{provide_toasts, ToastContainer};

use crate::components::{AdminPage, MenuPage};
use crate::config::Config;
use crate::remote::RealtimeDb;

#[component]
pub fn App() -> impl IntoView {
    let config = Config::load();
    let db = RealtimeDb::new(&config.database_url);
    provide_context(config);
    provide_context(db);
    provide_toasts();

    view! {
        <ToastContainer/>
        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=path!("/") view=MenuPage/>
                <Route path=path!("/admin") view=AdminPage/>
            </Routes>
        </Router>
    }
}
