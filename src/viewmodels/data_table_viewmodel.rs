// ============================================================================
// DATA TABLE VIEWMODEL - Search / sort / paginate over opaque records
// ============================================================================
// Records stay owned by the caller's Vec; every derived view borrows them.
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

/// One row: field name to raw value
pub type Record = Map<String, Value>;

/// Typed per-cell formatter: `(value, row) -> text`
pub type CellRenderer = Rc<dyn Fn(&Value, &Record) -> String>;

/// Caller callback for a row button
pub type RowAction = Rc<dyn Fn(&Record)>;

pub const NO_RECORDS_MESSAGE: &str = "No records found";

#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    /// `Some(false)` opts this column out of sorting
    pub sortable: Option<bool>,
    render: Option<CellRenderer>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: None,
            render: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Record) -> String + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }

    /// Text for this column's cell: the renderer if any, else the raw value
    pub fn render_cell(&self, row: &Record) -> String {
        let value = row.get(&self.key).unwrap_or(&Value::Null);
        match &self.render {
            Some(render) => render(value, row),
            None => display_value(value),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Clone, Default)]
pub struct RowActions {
    pub on_view: Option<RowAction>,
    pub on_edit: Option<RowAction>,
    pub on_delete: Option<RowAction>,
}

impl RowActions {
    pub fn is_empty(&self) -> bool {
        self.on_view.is_none() && self.on_edit.is_none() && self.on_delete.is_none()
    }
}

/// "Showing X to Y of Z entries"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {} entries", self.from, self.to, self.total)
    }
}

pub struct DataTable {
    data: Vec<Record>,
    columns: Vec<Column>,
    actions: RowActions,
    searchable: bool,
    sortable: bool,
    page_size: usize,
    search: String,
    sort: Option<SortState>,
    current_page: usize,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, data: Vec<Record>) -> Self {
        Self {
            data,
            columns,
            actions: RowActions::default(),
            searchable: true,
            sortable: true,
            page_size: 10,
            search: String::new(),
            sort: None,
            current_page: 1,
        }
    }

    /// Page size is at least one row
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn on_view<F: Fn(&Record) + 'static>(mut self, action: F) -> Self {
        self.actions.on_view = Some(Rc::new(action));
        self
    }

    pub fn on_edit<F: Fn(&Record) + 'static>(mut self, action: F) -> Self {
        self.actions.on_edit = Some(Rc::new(action));
        self
    }

    pub fn on_delete<F: Fn(&Record) + 'static>(mut self, action: F) -> Self {
        self.actions.on_delete = Some(Rc::new(action));
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn actions(&self) -> &RowActions {
        &self.actions
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the collection (e.g. after a fetch). Keeps search and sort,
    /// pulls the page back in range.
    pub fn set_data(&mut self, data: Vec<Record>) {
        self.data = data;
        self.clamp_page();
    }

    /// New search term; always returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.current_page = 1;
        }
    }

    pub fn is_column_sortable(&self, key: &str) -> bool {
        self.sortable
            && self
                .columns
                .iter()
                .find(|column| column.key == key)
                .map(|column| column.sortable != Some(false))
                .unwrap_or(false)
    }

    /// Header click: same column flips the order, a new column starts
    /// ascending. Returns false when sorting is not allowed there.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        if !self.is_column_sortable(key) {
            return false;
        }

        self.sort = Some(match self.sort.take() {
            Some(current) if current.field == key => SortState {
                field: current.field,
                order: current.order.toggled(),
            },
            _ => SortState {
                field: key.to_string(),
                order: SortOrder::Asc,
            },
        });
        log::debug!("↕️ [TABLE] Sort by {:?}", self.sort);
        true
    }

    /// Records matching the search term, in input order
    pub fn filtered(&self) -> Vec<&Record> {
        let needle = self.search.to_lowercase();
        if !self.searchable || needle.is_empty() {
            return self.data.iter().collect();
        }

        self.data
            .iter()
            .filter(|record| {
                record
                    .values()
                    .any(|value| js_string(value).to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Filtered records in the current sort order (stable)
    pub fn processed(&self) -> Vec<&Record> {
        let mut rows = self.filtered();
        if let Some(sort) = &self.sort {
            merge_sort_by(&mut rows, &|a: &&Record, b: &&Record| {
                let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn total_rows(&self) -> usize {
        self.filtered().len()
    }

    /// ceil(rows / page_size); zero when nothing matches
    pub fn page_count(&self) -> usize {
        self.total_rows().div_ceil(self.page_size)
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.can_previous() {
            self.current_page -= 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count().max(1));
    }

    /// Rows of the current page
    pub fn visible_rows(&self) -> Vec<&Record> {
        let start = (self.current_page - 1) * self.page_size;
        self.processed()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn summary(&self) -> PageSummary {
        let total = self.total_rows();
        if total == 0 {
            return PageSummary { from: 0, to: 0, total };
        }
        let from = (self.current_page - 1) * self.page_size + 1;
        PageSummary {
            from: from.min(total),
            to: (self.current_page * self.page_size).min(total),
            total,
        }
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Width of the "No records found" row
    pub fn column_span(&self) -> usize {
        self.columns.len() + usize::from(self.has_actions())
    }

    pub fn view(&self, row: &Record) {
        if let Some(action) = &self.actions.on_view {
            action(row);
        }
    }

    pub fn edit(&self, row: &Record) {
        if let Some(action) = &self.actions.on_edit {
            action(row);
        }
    }

    pub fn delete(&self, row: &Record) {
        if let Some(action) = &self.actions.on_delete {
            action(row);
        }
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count().max(1));
    }
}

/// Serialize typed items into table records; non-object items are skipped.
pub fn to_records<T: Serialize>(items: &[T]) -> Vec<Record> {
    items
        .iter()
        .filter_map(|item| match serde_json::to_value(item) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
        .collect()
}

/// String form used for searching (matches JavaScript's `String(value)`)
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => js_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript's `Number.prototype.toString()` for a JSON number
fn js_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if float.is_finite() => js_float(float),
        _ => number.to_string(),
    }
}

fn js_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", js_float(-value));
    }

    // Shortest round-trip digits, e.g. "1.2345e3"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point sits after `n` digits
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() { String::new() } else { format!(".{}", rest) };
        format!("{}{}e{}{}", first, fraction, sign, (n - 1).abs())
    }
}

/// Raw cell text: like `js_string` but null renders empty
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => js_string(other),
    }
}

/// Operand of a JS relational comparison after `ToPrimitive`
enum Primitive {
    Text(String),
    Number(f64),
}

impl Primitive {
    fn from_field(value: Option<&Value>) -> Self {
        match value {
            // undefined
            None => Primitive::Number(f64::NAN),
            Some(Value::Null) => Primitive::Number(0.0),
            Some(Value::Bool(flag)) => Primitive::Number(f64::from(u8::from(*flag))),
            Some(Value::Number(number)) => Primitive::Number(number.as_f64().unwrap_or(f64::NAN)),
            Some(Value::String(text)) => Primitive::Text(text.clone()),
            Some(other) => Primitive::Text(js_string(other)),
        }
    }

    fn to_number(&self) -> f64 {
        match self {
            Primitive::Number(number) => *number,
            Primitive::Text(text) => js_string_to_number(text),
        }
    }
}

/// JavaScript's `Number(text)`
fn js_string_to_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    // Rust also accepts "inf" / "nan", JS does not
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}

/// `a < b` / `a > b` as JavaScript evaluates them on raw values: two
/// strings compare by UTF-16 code units, anything else numerically after
/// coercion. Pairs where neither holds (NaN, missing fields) are equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (Primitive::from_field(a), Primitive::from_field(b)) {
        (Primitive::Text(x), Primitive::Text(y)) => x.encode_utf16().cmp(y.encode_utf16()),
        (x, y) => x
            .to_number()
            .partial_cmp(&y.to_number())
            .unwrap_or(Ordering::Equal),
    }
}

/// Stable top-down merge sort. Unlike `slice::sort_by` it accepts a
/// comparator that is not a total order and never panics on one.
fn merge_sort_by<T: Copy>(items: &mut [T], compare: &impl Fn(&T, &T) -> Ordering) {
    if items.len() < 2 {
        return;
    }

    let mid = items.len() / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let (left, right) = items.split_at(mid);
    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // Ties take from the left run
        if compare(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    items.copy_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn numbered(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|n| record(json!({ "id": n, "studentName": format!("Student {n}") })))
            .collect()
    }

    fn columns() -> Vec<Column> {
        vec![Column::new("id", "ID"), Column::new("studentName", "Name")]
    }

    fn ids(rows: &[&Record]) -> Vec<u64> {
        rows.iter().map(|row| row["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn twenty_three_rows_make_three_pages_of_ten() {
        let mut table = DataTable::new(columns(), numbered(23)).with_page_size(10);

        assert_eq!(table.page_count(), 3);
        assert_eq!(ids(&table.visible_rows()), (1..=10).collect::<Vec<_>>());
        assert_eq!(table.summary().to_string(), "Showing 1 to 10 of 23 entries");
        assert!(!table.can_previous());
        assert!(table.can_next());

        table.next_page();
        table.next_page();
        assert_eq!(table.current_page(), 3);
        assert_eq!(ids(&table.visible_rows()), vec![21, 22, 23]);
        assert_eq!(table.summary().to_string(), "Showing 21 to 23 of 23 entries");
        assert!(!table.can_next());

        // Disabled controls do nothing
        table.next_page();
        assert_eq!(table.current_page(), 3);
    }

    #[test]
    fn every_page_respects_the_page_size() {
        for (count, size) in [(0, 4), (1, 4), (8, 4), (9, 4), (17, 5)] {
            let mut table = DataTable::new(columns(), numbered(count)).with_page_size(size);
            assert_eq!(table.page_count(), count.div_ceil(size));

            let mut seen = 0;
            loop {
                let rows = table.visible_rows().len();
                assert!(rows <= size);
                seen += rows;
                if !table.can_next() {
                    break;
                }
                table.next_page();
            }
            assert_eq!(seen, count);
        }
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let data = vec![
            record(json!({ "id": 1, "studentName": "Kemi Adebayo", "class": "SS1" })),
            record(json!({ "id": 2, "studentName": "Tunde Bello", "class": "JSS2" })),
            record(json!({ "id": 31, "studentName": "Ngozi Eze", "class": "SS3" })),
        ];
        let mut table = DataTable::new(columns(), data);

        table.set_search("kemi");
        assert_eq!(ids(&table.filtered()), vec![1]);

        table.set_search("ss");
        assert_eq!(ids(&table.filtered()), vec![1, 2, 31]);

        // Numbers are searched through their string form
        table.set_search("31");
        assert_eq!(ids(&table.filtered()), vec![31]);

        table.set_search("");
        assert_eq!(table.filtered().len(), 3);
    }

    #[test]
    fn search_without_matches_leaves_an_empty_table() {
        let data = vec![record(json!({ "studentName": "Kemi Adebayo" }))];
        let mut table = DataTable::new(columns(), data);

        table.set_search("zzz");

        assert!(table.visible_rows().is_empty());
        assert_eq!(table.page_count(), 0);
        assert!(!table.can_next());
        assert!(!table.can_previous());
        assert_eq!(table.summary().to_string(), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn search_ignored_when_table_is_not_searchable() {
        let mut table = DataTable::new(columns(), numbered(5)).searchable(false);
        table.set_search("nobody");
        assert_eq!(table.filtered().len(), 5);
    }

    #[test]
    fn search_stringifies_like_javascript() {
        assert_eq!(js_string(&json!(null)), "null");
        assert_eq!(js_string(&json!(true)), "true");
        assert_eq!(js_string(&json!(1.5)), "1.5");
        assert_eq!(js_string(&json!(3.0)), "3");
        assert_eq!(js_string(&json!(-0.25)), "-0.25");
        assert_eq!(js_string(&json!(1e16)), "10000000000000000");
        assert_eq!(js_string(&json!(1e21)), "1e+21");
        assert_eq!(js_string(&json!(1.5e-7)), "1.5e-7");
        assert_eq!(js_string(&json!(0.000001)), "0.000001");
        assert_eq!(js_string(&json!(123456789012345678u64)), "123456789012345680");
        assert_eq!(js_string(&json!(["a", null, 3])), "a,,3");
        assert_eq!(js_string(&json!({ "nested": 1 })), "[object Object]");
    }

    #[test]
    fn header_clicks_toggle_then_reset() {
        let mut table = DataTable::new(columns(), numbered(3));

        assert!(table.toggle_sort("id"));
        assert_eq!(table.sort_state().unwrap().order, SortOrder::Asc);
        assert_eq!(ids(&table.processed()), vec![1, 2, 3]);

        table.toggle_sort("id");
        assert_eq!(table.sort_state().unwrap().order, SortOrder::Desc);
        assert_eq!(ids(&table.processed()), vec![3, 2, 1]);

        table.toggle_sort("studentName");
        let sort = table.sort_state().unwrap();
        assert_eq!(sort.field, "studentName");
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn numbers_sort_numerically_and_strings_by_code_unit() {
        let data = vec![
            record(json!({ "id": 10, "studentName": "adaeze" })),
            record(json!({ "id": 2, "studentName": "Zainab" })),
            record(json!({ "id": 33, "studentName": "Bola" })),
        ];
        let mut table = DataTable::new(columns(), data);

        table.toggle_sort("id");
        assert_eq!(ids(&table.processed()), vec![2, 10, 33]);

        table.toggle_sort("studentName");
        let names: Vec<&str> = table
            .processed()
            .iter()
            .map(|row| row["studentName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Bola", "Zainab", "adaeze"]);
    }

    #[test]
    fn equal_keys_keep_their_original_order() {
        let data = vec![
            record(json!({ "id": 1, "score": 50 })),
            record(json!({ "id": 2, "score": 20 })),
            record(json!({ "id": 3, "score": 50 })),
            record(json!({ "id": 4, "score": 20 })),
        ];
        let mut table = DataTable::new(vec![Column::new("score", "Score")], data);

        table.toggle_sort("score");
        assert_eq!(ids(&table.processed()), vec![2, 4, 1, 3]);

        table.toggle_sort("score");
        assert_eq!(ids(&table.processed()), vec![1, 3, 2, 4]);
    }

    #[test]
    fn numeric_strings_are_coerced_against_numbers() {
        let data = vec![
            record(json!({ "id": 1, "score": 85 })),
            record(json!({ "id": 2, "score": "9" })),
            record(json!({ "id": 3, "score": 20 })),
        ];
        let mut table = DataTable::new(vec![Column::new("score", "Score")], data);

        table.toggle_sort("score");
        assert_eq!(ids(&table.processed()), vec![2, 3, 1]);

        table.toggle_sort("score");
        assert_eq!(ids(&table.processed()), vec![1, 3, 2]);
    }

    #[test]
    fn relational_comparison_follows_javascript() {
        let cmp = |a: Value, b: Value| compare_values(Some(&a), Some(&b));

        assert_eq!(cmp(json!("9"), json!(85)), Ordering::Less);
        assert_eq!(cmp(json!("9"), json!("85")), Ordering::Greater);
        assert_eq!(cmp(json!(null), json!(1)), Ordering::Less);
        assert_eq!(cmp(json!(true), json!(0)), Ordering::Greater);
        assert_eq!(cmp(json!(""), json!(-1)), Ordering::Greater);
        assert_eq!(cmp(json!("0x10"), json!(15)), Ordering::Greater);
        assert_eq!(cmp(json!([2]), json!(10)), Ordering::Less);
        // NaN on either side: neither < nor >
        assert_eq!(cmp(json!("absent"), json!(5)), Ordering::Equal);
        assert_eq!(cmp(json!("inf"), json!(5)), Ordering::Equal);
        assert_eq!(compare_values(None, Some(&json!(5))), Ordering::Equal);
    }

    #[test]
    fn incomparable_values_do_not_break_sorting() {
        let data = vec![
            record(json!({ "id": 1, "score": 50 })),
            record(json!({ "id": 2 })),
            record(json!({ "id": 3, "score": "absent" })),
            record(json!({ "id": 4, "score": "100" })),
            record(json!({ "id": 5, "score": 20 })),
            record(json!({ "id": 6, "score": "9" })),
        ];
        let mut table = DataTable::new(vec![Column::new("score", "Score")], data);

        table.toggle_sort("score");
        let mut sorted = ids(&table.processed());
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sorting_respects_table_and_column_flags() {
        let cols = vec![Column::new("id", "ID"), Column::new("photo", "Photo").sortable(false)];

        let mut table = DataTable::new(cols.clone(), numbered(3));
        assert!(!table.toggle_sort("photo"));
        assert!(!table.toggle_sort("unknown"));
        assert!(table.sort_state().is_none());

        let mut frozen = DataTable::new(cols, numbered(3)).sortable(false);
        assert!(!frozen.toggle_sort("id"));
        assert!(frozen.sort_state().is_none());
    }

    #[test]
    fn new_search_returns_to_first_page() {
        let mut table = DataTable::new(columns(), numbered(30)).with_page_size(10);
        table.go_to_page(3);
        assert_eq!(table.current_page(), 3);

        table.set_search("Student 1");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.summary().total, 11);
    }

    #[test]
    fn shrinking_data_pulls_page_back_in_range() {
        let mut table = DataTable::new(columns(), numbered(30)).with_page_size(10);
        table.go_to_page(99);
        assert_eq!(table.current_page(), 3);

        table.set_data(numbered(4));
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.visible_rows().len(), 4);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let table = DataTable::new(columns(), numbered(3)).with_page_size(0);
        assert_eq!(table.page_size(), 1);
        assert_eq!(table.page_count(), 3);
    }

    #[test]
    fn renderer_takes_precedence_over_raw_value() {
        let status = Column::new("status", "Status")
            .with_render(|value, row| format!("{} ({})", display_value(value).to_uppercase(), row["id"]));
        let plain = Column::new("note", "Note");
        let row = record(json!({ "id": 7, "status": "active", "note": null }));

        assert_eq!(status.render_cell(&row), "ACTIVE (7)");
        assert_eq!(plain.render_cell(&row), "");
        assert_eq!(Column::new("id", "ID").render_cell(&row), "7");
    }

    #[test]
    fn actions_receive_the_row_and_widen_the_empty_row() {
        let viewed = Rc::new(RefCell::new(Vec::new()));
        let sink = viewed.clone();

        let plain = DataTable::new(columns(), numbered(2));
        assert!(!plain.has_actions());
        assert_eq!(plain.column_span(), 2);

        let table = DataTable::new(columns(), numbered(2))
            .on_view(move |row| sink.borrow_mut().push(row["id"].clone()));
        assert!(table.has_actions());
        assert_eq!(table.column_span(), 3);

        let second = table.visible_rows()[1].clone();
        table.view(&second);
        table.edit(&second);

        assert_eq!(*viewed.borrow(), vec![json!(2)]);
    }

    #[test]
    fn typed_items_become_records() {
        #[derive(Serialize)]
        struct Grade {
            subject: &'static str,
            total: u32,
        }

        let records = to_records(&[Grade { subject: "Mathematics", total: 78 }]);
        assert_eq!(records[0]["subject"], json!("Mathematics"));
        assert_eq!(records[0]["total"], json!(78));
    }

    #[test]
    fn empty_table_has_no_pages_to_move_to() {
        let mut table = DataTable::new(columns(), Vec::new()).with_page_size(10);

        assert_eq!(table.page_count(), 0);
        assert!(table.visible_rows().is_empty());
        assert_eq!(table.summary().to_string(), "Showing 0 to 0 of 0 entries");
        assert!(!table.can_previous());
        assert!(!table.can_next());

        table.next_page();
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.column_span(), 2);
    }
}
