//! Plain-text seating chart: one line per row, one character per seat.

use crate::core::{Auditorium, TicketClass};
use crate::domain::model::column_label;
use crate::utils::error::Result;

/// 從文字內容建立座位表；未知的字元原樣保留
pub fn parse_chart(content: &str) -> Result<Auditorium> {
    let rows: Vec<Vec<TicketClass>> = content
        .lines()
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.chars().map(TicketClass::from_code).collect()
        })
        .collect();

    let auditorium = Auditorium::from_classes(rows)?;
    tracing::debug!(
        rows = auditorium.num_rows(),
        columns = auditorium.max_columns(),
        "seating chart parsed"
    );
    Ok(auditorium)
}

/// Persistence form of the chart. Loading the output with [`parse_chart`]
/// gives back the same seat classes.
pub fn serialize_chart(auditorium: &Auditorium) -> String {
    let mut out = String::new();
    for row in auditorium.rows() {
        out.extend(row.iter().map(|seat| seat.class().code()));
        out.push('\n');
    }
    out
}

/// Customer-facing chart: column letters on top, `.` for a free seat and `#`
/// for a sold one.
pub fn render_chart(auditorium: &Auditorium) -> String {
    let mut out = String::from("  ");
    out.extend((0..auditorium.max_columns()).map(column_label));
    out.push('\n');

    for (index, row) in auditorium.rows().enumerate() {
        out.push_str(&format!("{} ", index + 1));
        out.extend(
            row.iter()
                .map(|seat| if seat.is_available() { '.' } else { '#' }),
        );
        out.push('\n');
    }
    out
}
