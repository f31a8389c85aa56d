// ============================================================================
// LAYOUT - Site header and footer
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;
use crate::utils::SCHOOL_NAME;

pub fn render_header(state: &AppState, active: Route) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?.class("site-header").build();

    let brand = ElementBuilder::new("a")?
        .class("brand")
        .attr("href", Route::Home.to_hash())?
        .text(SCHOOL_NAME)
        .build();
    append_child(&header, &brand)?;

    let nav = ElementBuilder::new("nav")?.class("site-nav").build();
    for route in Route::NAVIGATION {
        let link = ElementBuilder::new("a")?
            .class(if route == active { "nav-link active" } else { "nav-link" })
            .attr("href", route.to_hash())?
            .text(route.title())
            .build();
        append_child(&nav, &link)?;
    }
    append_child(&header, &nav)?;

    append_child(&header, &render_portal_links(state)?)?;
    Ok(header)
}

fn render_portal_links(state: &AppState) -> Result<Element, JsValue> {
    let portal = ElementBuilder::new("div")?.class("portal-links").build();
    let session = state.session.session();

    if session.loading {
        return Ok(portal);
    }

    match session.student.filter(|_| session.is_authenticated) {
        Some(student) => {
            let dashboard = ElementBuilder::new("a")?
                .class("btn-portal")
                .attr("href", Route::Dashboard.to_hash())?
                .text(&student.display_name())
                .build();

            let logout = ElementBuilder::new("button")?
                .class("btn-logout")
                .attr("type", "button")?
                .text("Log out")
                .build();

            let state_clone = state.clone();
            on_click(&logout, move |_| {
                state_clone.session.logout();
                state_clone.reset_portal();
                crate::dom::set_hash(Route::Home.to_hash());
            })?;

            append_child(&portal, &dashboard)?;
            append_child(&portal, &logout)?;
        }
        None => {
            let login = ElementBuilder::new("a")?
                .class("btn-portal")
                .attr("href", Route::Login.to_hash())?
                .text("Student Portal")
                .build();
            append_child(&portal, &login)?;
        }
    }

    Ok(portal)
}

pub fn render_footer() -> Result<Element, JsValue> {
    let footer = ElementBuilder::new("footer")?.class("site-footer").build();
    append_child(&footer, &text_element("p", "footer-name", SCHOOL_NAME)?)?;
    append_child(
        &footer,
        &text_element("p", "footer-motto", "Knowledge, Discipline and Excellence")?,
    )?;
    append_child(
        &footer,
        &text_element(
            "p",
            "footer-copy",
            &format!("© {} {}. All rights reserved.", chrono::Utc::now().format("%Y"), SCHOOL_NAME),
        )?,
    )?;
    Ok(footer)
}
