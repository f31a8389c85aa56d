// ============================================================================
// APP VIEW - Page shell for the current route
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, set_hash, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::views::dashboard::render_dashboard;
use crate::views::layout::{render_footer, render_header};
use crate::views::login::render_login;
use crate::views::pages;

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let session = state.session.session();
    let requested = state.route.get();
    let route = requested.resolve(session.is_authenticated, session.loading);

    if route != requested {
        log::info!("🔀 [ROUTER] {:?} -> {:?}", requested, route);
        // hashchange updates state.route and renders again
        set_hash(route.to_hash());
    }

    let shell = ElementBuilder::new("div")?.class("app-shell").build();
    append_child(&shell, &render_header(state, route)?)?;

    let main = ElementBuilder::new("main")?.class("app-main").build();
    let page = match route {
        Route::Dashboard if session.loading => {
            text_element("p", "loading", "Restoring your session...")?
        }
        Route::Home => pages::render_home()?,
        Route::About => pages::render_about()?,
        Route::Admissions => pages::render_admissions()?,
        Route::Academics => pages::render_academics()?,
        Route::Contact => pages::render_contact()?,
        Route::Gallery => pages::render_gallery(state)?,
        Route::News => pages::render_news(state)?,
        Route::Login => render_login(state)?,
        Route::Dashboard => render_dashboard(state)?,
        Route::NotFound => pages::render_not_found()?,
    };
    append_child(&main, &page)?;
    append_child(&shell, &main)?;

    append_child(&shell, &render_footer()?)?;
    Ok(shell)
}
