// ============================================================================
// MOLEK SCHOOLS PORTAL - Rust/WASM frontend
// ============================================================================
// - Views: functions that build DOM from state
// - ViewModels: session store and data table logic
// - Services: backend API and persisted snapshot
// - State: Rc<RefCell> observables
// - Models: records shared with the backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
pub use web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 MOLEK portal starting ({})", CONFIG.environment);

        let app = App::new()?;
        app.render()?;
        APP.with(|cell| *cell.borrow_mut() = Some(app));

        // Listeners and rehydration may trigger renders, so the app must be installed first
        APP.with(|cell| match cell.borrow().as_ref() {
            Some(app) => app.start(),
            None => Ok(()),
        })
    }

    /// Re-render the whole app from current state
    pub fn rerender_app() {
        APP.with(|cell| {
            if let Some(app) = cell.borrow().as_ref() {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] {:?}", e);
                }
            } else {
                log::warn!("⚠️ [RERENDER] App is not initialised");
            }
        });
    }
}
