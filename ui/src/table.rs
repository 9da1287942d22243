//! Table model for the car list and its HTML rendering.

use std::fmt::Write as _;

use autos_core::CarRecord;

pub const PLACEHOLDER: &str = "No hay autos registrados o Render está despertando...";

/// Make, model, year, price, transmission, actions.
pub const COLUMNS: usize = 6;

pub const EDIT_CONTROL_CLASS: &str = "btn-editar";
pub const DELETE_CONTROL_CLASS: &str = "btn-eliminar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub price: String,
    pub transmission: String,
}

impl TableRow {
    pub fn from_record(record: &CarRecord) -> Self {
        let car = &record.car;
        Self {
            id: record.id.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: format_price(car.price),
            transmission: car.transmission.clone(),
        }
    }

    /// Text of the data columns, in display order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.make,
            &self.model,
            &self.year,
            &self.price,
            &self.transmission,
        ]
    }

    pub fn edit_action(&self) -> TableAction {
        TableAction::Edit(self.id.clone())
    }

    pub fn delete_action(&self) -> TableAction {
        TableAction::Delete(self.id.clone())
    }
}

/// What the table body shows: either data rows or the single placeholder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Placeholder(String),
    Rows(Vec<TableRow>),
}

impl TableView {
    pub fn from_records(records: &[CarRecord]) -> Self {
        if records.is_empty() {
            return TableView::Placeholder(PLACEHOLDER.to_string());
        }
        TableView::Rows(records.iter().map(TableRow::from_record).collect())
    }

    /// Data rows only; empty for the placeholder.
    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Placeholder(_) => &[],
            TableView::Rows(rows) => rows,
        }
    }

    /// Number of `<tr>` elements the table body ends up with.
    pub fn rendered_rows(&self) -> usize {
        match self {
            TableView::Placeholder(_) => 1,
            TableView::Rows(rows) => rows.len(),
        }
    }

    /// Markup for the table body. All record text is escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            TableView::Placeholder(text) => {
                let _ = write!(
                    html,
                    r#"<tr><td colspan="{COLUMNS}" class="text-center">{}</td></tr>"#,
                    escape(text)
                );
            }
            TableView::Rows(rows) => {
                for row in rows {
                    html.push_str("<tr>");
                    for cell in row.cells() {
                        let _ = write!(html, "<td>{}</td>", escape(cell));
                    }
                    let id = escape(&row.id);
                    let _ = write!(
                        html,
                        concat!(
                            r#"<td class="text-end">"#,
                            r#"<button class="btn btn-warning btn-sm {edit}" data-id="{id}"><i class="bi bi-pencil-fill"></i></button>"#,
                            r#"<button class="btn btn-danger btn-sm {delete}" data-id="{id}"><i class="bi bi-trash-fill"></i></button>"#,
                            "</td></tr>"
                        ),
                        edit = EDIT_CONTROL_CLASS,
                        delete = DELETE_CONTROL_CLASS,
                        id = id,
                    );
                }
            }
        }
        html
    }
}

/// A click on one of a row's action controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Edit(String),
    Delete(String),
}

impl TableAction {
    /// Resolve a clicked control from its class list and `data-id`. Clicks
    /// elsewhere in the table, or controls without an id, yield `None`.
    pub fn from_control(class_list: &str, data_id: &str) -> Option<Self> {
        let id = data_id.trim();
        if id.is_empty() {
            return None;
        }
        let mut classes = class_list.split_whitespace();
        if classes.clone().any(|c| c == EDIT_CONTROL_CLASS) {
            Some(TableAction::Edit(id.to_string()))
        } else if classes.any(|c| c == DELETE_CONTROL_CLASS) {
            Some(TableAction::Delete(id.to_string()))
        } else {
            None
        }
    }
}

/// Dollar amount with thousands separators and at most three decimals,
/// e.g. `15000.0` -> `$15,000`, `1234.5678` -> `$1,234.568`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format!("${price}");
    }
    let fixed = format!("{:.3}", price.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("${sign}{grouped}")
    } else {
        format!("${sign}{grouped}.{fraction}")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
