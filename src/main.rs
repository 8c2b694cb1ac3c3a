#![allow(warnings)]
//! Todo Widget Frontend Entry Point

mod models;
mod config;
mod dom;
mod todo_list;
mod storage;
mod events;
mod theme;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
    mount_to_body(App);
}
