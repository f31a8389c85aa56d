// ============================================================================
// LOGIN VIEW - Student sign-in form
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, input_value, on_submit, set_hash, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::AppState;

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("section")?.class("page login-screen").build();
    let card = ElementBuilder::new("div")?.class("login-card").build();

    append_child(&card, &text_element("h1", "", "Student Portal")?)?;
    append_child(
        &card,
        &text_element("p", "login-subtitle", "Sign in with your admission number")?,
    )?;

    if let Some(error) = state.login_error.borrow().as_deref() {
        append_child(&card, &text_element("div", "login-error", error)?)?;
    }

    let pending = *state.login_pending.borrow();
    let form = ElementBuilder::new("form")?.class("login-form").build();

    let admission_input = ElementBuilder::new("input")?
        .attr("type", "text")?
        .attr("name", "admission_number")?
        .attr("placeholder", "e.g. MOL/2024/001")?
        .attr("value", &state.login_admission_number.borrow())?
        .attr("autocomplete", "username")?
        .flag("disabled", pending)?
        .build();
    let password_input = ElementBuilder::new("input")?
        .attr("type", "password")?
        .attr("name", "password")?
        .attr("autocomplete", "current-password")?
        .flag("disabled", pending)?
        .build();

    append_child(&form, &labelled("Admission number", admission_input.clone())?)?;
    append_child(&form, &labelled("Password", password_input.clone())?)?;

    let submit = ElementBuilder::new("button")?
        .class("btn-login")
        .attr("type", "submit")?
        .flag("disabled", pending)?
        .text(if pending { "Signing in..." } else { "Sign in" })
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            let admission_number = input_value(&admission_input).trim().to_string();
            let password = input_value(&password_input);
            // Survives the re-render triggered below
            *state.login_admission_number.borrow_mut() = admission_number.clone();

            if admission_number.is_empty() || password.is_empty() {
                *state.login_error.borrow_mut() =
                    Some("Enter your admission number and password.".to_string());
                state.notify_changed();
                return;
            }
            if *state.login_pending.borrow() {
                return;
            }

            *state.login_pending.borrow_mut() = true;
            *state.login_error.borrow_mut() = None;
            state.notify_changed();

            let state = state.clone();
            spawn_local(async move {
                let result = state.session.login(&admission_number, &password).await;
                *state.login_pending.borrow_mut() = false;

                match result {
                    Ok(_) => {
                        log::info!("✅ [LOGIN] Redirecting to dashboard");
                        set_hash(Route::Dashboard.to_hash());
                    }
                    Err(e) => {
                        *state.login_error.borrow_mut() = Some(e.user_message());
                    }
                }
                state.notify_changed();
            });
        })?;
    }

    append_child(&card, &form)?;
    append_child(&screen, &card)?;
    Ok(screen)
}

fn labelled(label: &str, input: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("label")?
        .class("form-group")
        .child(text_element("span", "form-label", label)?)?
        .child(input)?
        .build())
}
