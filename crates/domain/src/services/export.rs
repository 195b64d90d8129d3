//! Rendering of exported client rows to CSV and JSON.

use std::borrow::Cow;

use crate::models::ExportRow;

/// Byte order mark written at the start of CSV exports.
pub const UTF8_BOM: &str = "\u{feff}";

/// CSV field delimiter.
pub const CSV_DELIMITER: char = ';';

/// CSV header row.
pub const CSV_HEADER: [&str; 5] = [
    "id-пользователя",
    "Имя",
    "Фамилия",
    "Почта",
    "Номер телефона",
];

const LINE_TERMINATOR: &str = "\r\n";

/// Render rows as a BOM-prefixed, semicolon-delimited CSV document with a
/// header row.
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut csv = String::from(UTF8_BOM);
    push_record(&mut csv, CSV_HEADER.iter().copied());

    for row in rows {
        let fields = row.text_fields();
        push_record(&mut csv, fields.iter().map(String::as_str));
    }

    csv
}

/// Render rows as a pretty-printed JSON array of five element arrays.
pub fn render_json(rows: &[ExportRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(CSV_DELIMITER);
        }
        out.push_str(&escape_field(field));
    }
    out.push_str(LINE_TERMINATOR);
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([CSV_DELIMITER, '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
