// ============================================================================
// APP - Mounts the portal into #app
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{current_hash, get_element_by_id, on_hash_change, replace_children};
use crate::router::Route;
use crate::state::AppState;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new(Route::from_hash(&current_hash()));

        // Several changes in one tick render once
        let scheduled = Rc::new(Cell::new(false));
        state.subscribe_to_changes(move || {
            if scheduled.replace(true) {
                return;
            }
            let scheduled = scheduled.clone();
            Timeout::new(0, move || {
                scheduled.set(false);
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    /// Wire global listeners and restore the persisted session; call once
    pub fn start(&self) -> Result<(), JsValue> {
        let route = self.state.route.clone();
        on_hash_change(move |_| {
            let next = Route::from_hash(&current_hash());
            if route.get() != next {
                route.set(next);
            }
        })?;

        let state = self.state.clone();
        spawn_local(async move {
            state.session.rehydrate().await;
        });
        Ok(())
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let page = render_app(&self.state)?;
        replace_children(&self.root, &page)
    }
}
