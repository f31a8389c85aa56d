// ============================================================================
// DATA TABLE VIEW - DOM for a DataTable
// ============================================================================
// The search box is built once; the table and pager are redrawn into
// `body` after each interaction so the input keeps focus.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{
    append_child, input_value, on_click, on_input, replace_children, text_element, ElementBuilder,
};
use crate::viewmodels::{DataTable, Record, RowAction, SortOrder, NO_RECORDS_MESSAGE};

pub fn render_data_table(table: Rc<RefCell<DataTable>>) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("data-table").build();
    let body = ElementBuilder::new("div")?.class("data-table-body").build();

    if table.borrow().is_searchable() {
        let input = ElementBuilder::new("input")?
            .class("data-table-search")
            .attr("type", "search")?
            .attr("placeholder", "Search...")?
            .attr("value", table.borrow().search())?
            .build();

        let table_ref = table.clone();
        let body_ref = body.clone();
        let input_ref = input.clone();
        on_input(&input, move |_| {
            table_ref.borrow_mut().set_search(input_value(&input_ref));
            redraw(&body_ref, &table_ref);
        })?;

        append_child(&container, &input)?;
    }

    append_child(&container, &body)?;
    draw_body(&body, &table)?;
    Ok(container)
}

fn redraw(body: &Element, table: &Rc<RefCell<DataTable>>) {
    if let Err(e) = draw_body(body, table) {
        log::error!("❌ [TABLE] Redraw failed: {:?}", e);
    }
}

fn draw_body(body: &Element, table: &Rc<RefCell<DataTable>>) -> Result<(), JsValue> {
    let content = ElementBuilder::new("div")?.build();
    append_child(&content, &render_table(body, table)?)?;
    append_child(&content, &render_pager(body, table)?)?;
    replace_children(body, &content)
}

fn render_table(body: &Element, table: &Rc<RefCell<DataTable>>) -> Result<Element, JsValue> {
    let view = table.borrow();
    let element = ElementBuilder::new("table")?.class("table").build();

    // Header
    let thead = ElementBuilder::new("thead")?.build();
    let header_row = ElementBuilder::new("tr")?.build();
    for column in view.columns() {
        let sortable = view.is_column_sortable(&column.key);
        let indicator = match view.sort_state() {
            Some(sort) if sort.field == column.key => match sort.order {
                SortOrder::Asc => " ▲",
                SortOrder::Desc => " ▼",
            },
            _ => "",
        };
        let th = ElementBuilder::new("th")?
            .class(if sortable { "sortable" } else { "" })
            .text(&format!("{}{}", column.label, indicator))
            .build();

        if sortable {
            let key = column.key.clone();
            let table_ref = table.clone();
            let body_ref = body.clone();
            on_click(&th, move |_| {
                table_ref.borrow_mut().toggle_sort(&key);
                redraw(&body_ref, &table_ref);
            })?;
        }
        append_child(&header_row, &th)?;
    }
    if view.has_actions() {
        append_child(&header_row, &text_element("th", "actions", "Actions")?)?;
    }
    append_child(&thead, &header_row)?;
    append_child(&element, &thead)?;

    // Rows
    let tbody = ElementBuilder::new("tbody")?.build();
    let rows = view.visible_rows();
    if rows.is_empty() {
        let td = ElementBuilder::new("td")?
            .class("empty")
            .attr("colspan", &view.column_span().to_string())?
            .text(NO_RECORDS_MESSAGE)
            .build();
        let tr = ElementBuilder::new("tr")?.child(td)?.build();
        append_child(&tbody, &tr)?;
    }

    for row in rows {
        let tr = ElementBuilder::new("tr")?.build();
        for column in view.columns() {
            append_child(&tr, &text_element("td", "", &column.render_cell(row))?)?;
        }

        if view.has_actions() {
            let cell = ElementBuilder::new("td")?.class("actions").build();
            let actions = view.actions();
            for (label, class, action) in [
                ("View", "btn-view", &actions.on_view),
                ("Edit", "btn-edit", &actions.on_edit),
                ("Delete", "btn-delete", &actions.on_delete),
            ] {
                if let Some(action) = action {
                    let button = render_action(label, class, action.clone(), row.clone(), body, table)?;
                    append_child(&cell, &button)?;
                }
            }
            append_child(&tr, &cell)?;
        }
        append_child(&tbody, &tr)?;
    }
    append_child(&element, &tbody)?;

    Ok(element)
}

fn render_action(
    label: &str,
    class: &str,
    action: RowAction,
    row: Record,
    body: &Element,
    table: &Rc<RefCell<DataTable>>,
) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text(label)
        .build();

    let table_ref = table.clone();
    let body_ref = body.clone();
    on_click(&button, move |_| {
        // No table borrow is held here: the action may replace the data
        action(&row);
        redraw(&body_ref, &table_ref);
    })?;

    Ok(button)
}

fn render_pager(body: &Element, table: &Rc<RefCell<DataTable>>) -> Result<Element, JsValue> {
    let view = table.borrow();
    let pager = ElementBuilder::new("div")?.class("table-pagination").build();

    append_child(&pager, &text_element("span", "summary", &view.summary().to_string())?)?;

    let controls = ElementBuilder::new("div")?.class("pager-controls").build();

    let previous = ElementBuilder::new("button")?
        .attr("type", "button")?
        .flag("disabled", !view.can_previous())?
        .text("Previous")
        .build();
    {
        let table_ref = table.clone();
        let body_ref = body.clone();
        on_click(&previous, move |_| {
            table_ref.borrow_mut().previous_page();
            redraw(&body_ref, &table_ref);
        })?;
    }

    let page_label = format!("Page {} of {}", view.current_page(), view.page_count().max(1));

    let next = ElementBuilder::new("button")?
        .attr("type", "button")?
        .flag("disabled", !view.can_next())?
        .text("Next")
        .build();
    {
        let table_ref = table.clone();
        let body_ref = body.clone();
        on_click(&next, move |_| {
            table_ref.borrow_mut().next_page();
            redraw(&body_ref, &table_ref);
        })?;
    }

    append_child(&controls, &previous)?;
    append_child(&controls, &text_element("span", "page", &page_label)?)?;
    append_child(&controls, &next)?;
    append_child(&pager, &controls)?;

    Ok(pager)
}
