// Number and column formatting for console output. Every formatter is
// total: missing or non-finite input renders as "-".

use chrono::{DateTime, Utc};

pub const EMPTY: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Dollar amount with a K/M/B suffix above a thousand, sign before `$`.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return EMPTY.to_string();
    };
    let sign = if v < 0.0 { "-" } else { "" };
    let abs = v.abs();
    let body = if abs >= 1_000_000_000.0 {
        format!("{:.2}B", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.2}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.2}K", abs / 1_000.0)
    } else if abs >= 1.0 {
        format!("{:.4}", abs)
    } else {
        format!("{:.8}", abs)
    };
    format!("{}${}", sign, body)
}

pub fn format_pct(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.2}%", v),
        None => EMPTY.to_string(),
    }
}

/// Percentage with an explicit `+` for gains.
pub fn format_signed_pct(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) if v > 0.0 => format!("+{:.2}%", v),
        Some(v) => format!("{:.2}%", v),
        None => EMPTY.to_string(),
    }
}

/// Integer with thousands separators, truncated toward zero.
pub fn format_int(value: Option<f64>) -> String {
    let Some(v) = finite(value) else {
        return EMPTY.to_string();
    };
    let truncated = v.trunc();
    let digits = format!("{:.0}", truncated.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if truncated < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => EMPTY.to_string(),
    }
}

/// Fit `text` into exactly `width` characters.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let length = text.chars().count();
    if length == width {
        return text.to_string();
    }
    if length > width {
        return text.chars().take(width).collect();
    }
    let space = width - length;
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(space)),
        Align::Right => format!("{}{}", " ".repeat(space), text),
        Align::Center => {
            let left = space / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(space - left))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Left,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Cells are padded to their column and joined with two spaces. Missing
/// cells render blank.
pub fn render_table_row<S: AsRef<str>>(values: &[S], columns: &[TableColumn]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let value = values.get(i).map(|v| v.as_ref()).unwrap_or("");
            pad(value, col.width, col.align)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Upper-cased header row plus a dashed underline.
pub fn render_table_header(columns: &[TableColumn]) -> String {
    let headers: Vec<String> = columns.iter().map(|c| c.header.to_uppercase()).collect();
    let header = render_table_row(&headers, columns);
    let underline = columns
        .iter()
        .map(|c| "-".repeat(c.width.min(c.header.chars().count().max(3))))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n{}", header, underline)
}
