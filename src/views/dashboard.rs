// ============================================================================
// DASHBOARD VIEW - Logged-in student's portal
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{append_child, on_change, on_click, text_element, ElementBuilder};
use crate::models::{StudentPatch, StudentRecord};
use crate::state::{AppState, Remote};
use crate::viewmodels::{display_value, to_records};
use crate::views::data_table::render_data_table;

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?.class("page dashboard").build();

    let student = match state.session.student() {
        Some(student) => student,
        None => {
            append_child(&section, &text_element("p", "loading", "Loading your profile...")?)?;
            return Ok(section);
        }
    };

    append_child(
        &section,
        &text_element("h1", "page-title", &format!("Welcome, {}", student.display_name()))?,
    )?;

    if let Some(error) = state.dashboard_error.borrow().as_deref() {
        append_child(&section, &text_element("div", "dashboard-error", error)?)?;
    }

    append_child(&section, &render_profile_card(state, &student)?)?;
    append_child(&section, &render_grades(state)?)?;

    Ok(section)
}

fn render_profile_card(state: &AppState, student: &StudentRecord) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("profile-card").build();
    let busy = *state.dashboard_busy.borrow();

    let picture = match &student.profile_picture {
        Some(url) => ElementBuilder::new("img")?
            .class("profile-picture")
            .attr("src", url)?
            .attr("alt", &student.display_name())?
            .build(),
        None => text_element("div", "profile-picture placeholder", &initials(student))?,
    };
    append_child(&card, &picture)?;

    let details = ElementBuilder::new("dl")?.class("profile-details").build();
    let rows = [
        ("Name", Some(student.display_name())),
        ("Admission number", Some(student.admission_number.clone())),
        ("Class", student.class_name.clone()),
        ("Status", student.status.clone()),
        ("Email", student.email.clone()),
        ("Phone", student.phone.clone()),
    ];
    for (label, value) in rows {
        append_child(&details, &text_element("dt", "", label)?)?;
        append_child(&details, &text_element("dd", "", value.as_deref().unwrap_or("-"))?)?;
    }
    append_child(&card, &details)?;

    let actions = ElementBuilder::new("div")?.class("profile-actions").build();

    let refresh = ElementBuilder::new("button")?
        .class("btn-secondary")
        .attr("type", "button")?
        .flag("disabled", busy)?
        .text(if busy { "Refreshing..." } else { "Refresh profile" })
        .build();
    {
        let state = state.clone();
        on_click(&refresh, move |_| refresh_profile(&state))?;
    }
    append_child(&actions, &refresh)?;

    let upload = ElementBuilder::new("input")?
        .class("profile-upload")
        .attr("type", "file")?
        .attr("accept", "image/*")?
        .flag("disabled", busy)?
        .build();
    {
        let state = state.clone();
        let input = upload.clone();
        on_change(&upload, move |_| {
            let file = input
                .dyn_ref::<HtmlInputElement>()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                upload_picture(&state, file);
            }
        })?;
    }
    append_child(
        &actions,
        &ElementBuilder::new("label")?
            .class("form-group")
            .child(text_element("span", "form-label", "Change photo")?)?
            .child(upload)?
            .build(),
    )?;

    append_child(&card, &actions)?;
    Ok(card)
}

fn initials(student: &StudentRecord) -> String {
    student
        .display_name()
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

fn refresh_profile(state: &AppState) {
    if *state.dashboard_busy.borrow() {
        return;
    }
    *state.dashboard_busy.borrow_mut() = true;
    *state.dashboard_error.borrow_mut() = None;
    state.notify_changed();

    let state = state.clone();
    spawn_local(async move {
        let result = state.session.refresh_student().await;
        *state.dashboard_busy.borrow_mut() = false;
        if let Err(e) = result {
            *state.dashboard_error.borrow_mut() = Some(e.user_message());
        }
        state.notify_changed();
    });
}

fn upload_picture(state: &AppState, file: web_sys::File) {
    if *state.dashboard_busy.borrow() {
        return;
    }
    *state.dashboard_busy.borrow_mut() = true;
    *state.dashboard_error.borrow_mut() = None;
    state.notify_changed();

    let state = state.clone();
    spawn_local(async move {
        match state.session.api().upload_profile_picture(&file).await {
            Ok(url) => {
                log::info!("🖼️ [DASHBOARD] Profile picture updated");
                state.session.update_student(StudentPatch::profile_picture(url));
            }
            Err(e) => {
                log::warn!("⚠️ [DASHBOARD] Upload failed: {}", e);
                *state.dashboard_error.borrow_mut() =
                    Some("Could not upload the photo. Please try again.".to_string());
            }
        }
        *state.dashboard_busy.borrow_mut() = false;
        state.notify_changed();
    });
}

fn render_grades(state: &AppState) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("div")?.class("grades").build();
    append_child(&section, &text_element("h2", "", "My results")?)?;

    if state.grades.borrow().is_idle() {
        load_grades(state);
    }

    match &*state.grades.borrow() {
        Remote::Idle | Remote::Loading => {
            append_child(&section, &text_element("p", "loading", "Loading results...")?)?;
        }
        Remote::Failed(message) => {
            append_child(&section, &text_element("p", "error", message)?)?;
        }
        Remote::Loaded(_) => {
            append_child(&section, &render_data_table(state.grades_table.clone())?)?;
        }
    }

    if let Some(row) = state.selected_grade.borrow().as_ref() {
        let detail = ElementBuilder::new("dl")?.class("grade-detail").build();
        for (key, value) in row {
            append_child(&detail, &text_element("dt", "", key)?)?;
            append_child(&detail, &text_element("dd", "", &display_value(value))?)?;
        }

        let close = ElementBuilder::new("button")?
            .class("btn-secondary")
            .attr("type", "button")?
            .text("Close")
            .build();
        {
            let state = state.clone();
            on_click(&close, move |_| {
                *state.selected_grade.borrow_mut() = None;
                state.notify_changed();
            })?;
        }
        append_child(&detail, &close)?;
        append_child(&section, &detail)?;
    }

    Ok(section)
}

fn load_grades(state: &AppState) {
    *state.grades.borrow_mut() = Remote::Loading;
    let state = state.clone();
    spawn_local(async move {
        let result = state.session.api().grades().await;

        // A logout while loading already reset the portal
        if !state.session.is_authenticated() {
            return;
        }

        *state.grades.borrow_mut() = match result {
            Ok(grades) => {
                log::info!("📊 [DASHBOARD] {} results loaded", grades.len());
                state.grades_table.borrow_mut().set_data(to_records(&grades));
                Remote::Loaded(grades.len())
            }
            Err(e) => {
                log::warn!("⚠️ [DASHBOARD] Could not load results: {}", e);
                Remote::Failed("Results are unavailable right now.".to_string())
            }
        };
        state.notify_changed();
    });
}
