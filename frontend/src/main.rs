use std::cell::RefCell;

use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod app;
mod back_to_top;
mod config;
mod dom;
mod error;
mod nav;
mod reveal;
mod scroll;
mod surface;
mod timer;
mod typing;
mod contact {
    pub mod form;
    pub mod transport;
    pub mod validate;
}

use app::App;
use config::Config;
use dom::Page;

thread_local! {
    // Owns every mounted listener, observer and timer for the page's lifetime.
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn boot() {
    let page = match Page::current() {
        Ok(page) => page,
        Err(e) => {
            error!("cannot start: {}", e);
            return;
        }
    };
    let app = App::mount(&page, &Config::default());
    info!("{} of 5 enhancements mounted", app.mounted());
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting portfolio enhancements");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        error!("no document to enhance");
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            error!("could not wait for DOMContentLoaded: {}", error::js_message(&e));
        }
    } else {
        boot();
    }
}
