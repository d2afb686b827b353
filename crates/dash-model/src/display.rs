//! Text conventions shared by the table and chart renderers.

use crate::Value;

/// Human-readable header for a column name.
///
/// Upper-cases the first character and inserts a space before every ASCII
/// capital that does not already follow whitespace, so `totalPrice` becomes
/// `Total Price` and `Product Name` is left alone.
///
/// Capitals that already follow whitespace get no extra space. Inserting
/// one there would double the gap in names such as `Product Name`.
pub fn display_label(column: &str) -> String {
    let mut chars = column.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(column.len() + 4);
    out.extend(first.to_uppercase());
    let mut previous = first;
    for ch in chars {
        if ch.is_ascii_uppercase() && !previous.is_whitespace() {
            out.push(' ');
        }
        out.push(ch);
        previous = ch;
    }
    out
}

/// Format a number the way the dashboard prints it: integral values have no
/// fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Text shown in a table cell or used as a chart label.
///
/// Null renders as the empty string; opaque values as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(flag) => flag.to_string(),
        Value::Number(number) => format_number(*number),
        Value::String(text) => text.clone(),
        Value::Opaque(raw) => raw.to_string(),
    }
}
