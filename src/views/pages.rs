// ============================================================================
// PAGES - Public informational pages
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::{AppState, Remote};
use crate::utils::SCHOOL_NAME;

fn page(route: Route) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?.class("page").build();
    append_child(&section, &text_element("h1", "page-title", route.title())?)?;
    Ok(section)
}

fn paragraphs(section: &Element, texts: &[&str]) -> Result<(), JsValue> {
    for text in texts {
        append_child(section, &text_element("p", "", text)?)?;
    }
    Ok(())
}

fn bullet_list(section: &Element, heading: &str, items: &[&str]) -> Result<(), JsValue> {
    append_child(section, &text_element("h2", "", heading)?)?;
    let list = ElementBuilder::new("ul")?.build();
    for item in items {
        append_child(&list, &text_element("li", "", item)?)?;
    }
    append_child(section, &list)
}

pub fn render_home() -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?.class("page hero").build();
    append_child(&section, &text_element("h1", "hero-title", &format!("Welcome to {}", SCHOOL_NAME))?)?;
    paragraphs(
        &section,
        &["A co-educational secondary school raising confident, disciplined and curious young Nigerians."],
    )?;

    let actions = ElementBuilder::new("div")?.class("hero-actions").build();
    for (route, label) in [(Route::Admissions, "Apply for Admission"), (Route::Login, "Student Portal")] {
        let link = ElementBuilder::new("a")?
            .class("btn-primary")
            .attr("href", route.to_hash())?
            .text(label)
            .build();
        append_child(&actions, &link)?;
    }
    append_child(&section, &actions)?;
    Ok(section)
}

pub fn render_about() -> Result<Element, JsValue> {
    let section = page(Route::About)?;
    paragraphs(
        &section,
        &[
            "MOLEK Schools offers junior and senior secondary education following the Nigerian national curriculum.",
            "Our teachers combine strong academics with character formation, sports and the creative arts.",
        ],
    )?;
    bullet_list(
        &section,
        "Our values",
        &["Integrity", "Excellence", "Discipline", "Service to the community"],
    )?;
    Ok(section)
}

pub fn render_admissions() -> Result<Element, JsValue> {
    let section = page(Route::Admissions)?;
    paragraphs(
        &section,
        &["Admission into JSS1 and transfer into other classes is by entrance examination and interview."],
    )?;
    bullet_list(
        &section,
        "How to apply",
        &[
            "Collect or download the application form from the school office.",
            "Submit the completed form with the last two terms' report cards.",
            "Sit the entrance examination on the scheduled date.",
            "Attend an interview with a parent or guardian.",
        ],
    )?;
    Ok(section)
}

pub fn render_academics() -> Result<Element, JsValue> {
    let section = page(Route::Academics)?;
    bullet_list(
        &section,
        "Junior Secondary (JSS1 - JSS3)",
        &["Mathematics", "English Language", "Basic Science & Technology", "Social Studies", "Yoruba / French"],
    )?;
    bullet_list(
        &section,
        "Senior Secondary (SS1 - SS3)",
        &["Science", "Commercial", "Arts", "WAEC and NECO preparation"],
    )?;
    Ok(section)
}

pub fn render_contact() -> Result<Element, JsValue> {
    let section = page(Route::Contact)?;
    paragraphs(
        &section,
        &[
            "School office: Monday to Friday, 8:00am - 4:00pm.",
            "Email: info@molekschools.com",
        ],
    )?;
    Ok(section)
}

pub fn render_not_found() -> Result<Element, JsValue> {
    let section = page(Route::NotFound)?;
    let home = ElementBuilder::new("a")?
        .attr("href", Route::Home.to_hash())?
        .text("Back to the home page")
        .build();
    append_child(&section, &home)?;
    Ok(section)
}

pub fn render_news(state: &AppState) -> Result<Element, JsValue> {
    let section = page(Route::News)?;

    if state.news.borrow().is_idle() {
        load_news(state);
    }

    match &*state.news.borrow() {
        Remote::Idle | Remote::Loading => {
            append_child(&section, &text_element("p", "loading", "Loading news...")?)?;
        }
        Remote::Failed(message) => {
            append_child(&section, &text_element("p", "error", message)?)?;
        }
        Remote::Loaded(items) if items.is_empty() => {
            append_child(&section, &text_element("p", "empty", "No news yet.")?)?;
        }
        Remote::Loaded(items) => {
            for item in items {
                let card = ElementBuilder::new("article")?.class("news-card").build();
                append_child(&card, &text_element("h2", "", &item.title)?)?;
                if let Some(date) = &item.published_at {
                    append_child(&card, &text_element("time", "", date)?)?;
                }
                if let Some(summary) = &item.summary {
                    append_child(&card, &text_element("p", "", summary)?)?;
                }
                append_child(&section, &card)?;
            }
        }
    }

    Ok(section)
}

fn load_news(state: &AppState) {
    *state.news.borrow_mut() = Remote::Loading;
    let state = state.clone();
    spawn_local(async move {
        let result = state.session.api().news().await;
        *state.news.borrow_mut() = match result {
            Ok(items) => {
                log::info!("📰 [NEWS] {} items loaded", items.len());
                Remote::Loaded(items)
            }
            Err(e) => {
                log::warn!("⚠️ [NEWS] Could not load news: {}", e);
                Remote::Failed("News is unavailable right now.".to_string())
            }
        };
        state.notify_changed();
    });
}

pub fn render_gallery(state: &AppState) -> Result<Element, JsValue> {
    let section = page(Route::Gallery)?;

    if state.gallery.borrow().is_idle() {
        load_gallery(state);
    }

    match &*state.gallery.borrow() {
        Remote::Idle | Remote::Loading => {
            append_child(&section, &text_element("p", "loading", "Loading gallery...")?)?;
        }
        Remote::Failed(message) => {
            append_child(&section, &text_element("p", "error", message)?)?;
        }
        Remote::Loaded(items) => {
            let grid = ElementBuilder::new("div")?.class("gallery-grid").build();
            for item in items {
                let caption = item.caption.as_deref().unwrap_or("");
                let image = ElementBuilder::new("img")?
                    .attr("src", &item.image_url)?
                    .attr("alt", caption)?
                    .attr("loading", "lazy")?
                    .build();
                let figure = ElementBuilder::new("figure")?
                    .child(image)?
                    .child(text_element("figcaption", "", caption)?)?
                    .build();
                append_child(&grid, &figure)?;
            }
            append_child(&section, &grid)?;
        }
    }

    Ok(section)
}

fn load_gallery(state: &AppState) {
    *state.gallery.borrow_mut() = Remote::Loading;
    let state = state.clone();
    spawn_local(async move {
        let result = state.session.api().gallery().await;
        *state.gallery.borrow_mut() = match result {
            Ok(items) => Remote::Loaded(items),
            Err(e) => {
                log::warn!("⚠️ [GALLERY] Could not load gallery: {}", e);
                Remote::Failed("The gallery is unavailable right now.".to_string())
            }
        };
        state.notify_changed();
    });
}
