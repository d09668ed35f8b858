use crate::MovieRecord;
use crate::selectors::Field;

/// Column order of the printed table; the index column has a blank header.
pub const COLUMNS: [Field; 11] = [
    Field::Title,
    Field::Country,
    Field::Runtime,
    Field::Rating,
    Field::Metascore,
    Field::Award,
    Field::Genre,
    Field::ReleaseDate,
    Field::Presentation,
    Field::Review,
    Field::Video,
];

const MISSING: &str = "None";

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}

fn cell(record: &MovieRecord, field: Field) -> String {
    let d = &record.details;
    match field {
        Field::Title => d.title.clone(),
        Field::Country => d.country.clone(),
        Field::Runtime => optional(&d.runtime),
        Field::Rating => optional(&d.rating),
        Field::Metascore => optional(&d.metascore),
        Field::Award => optional(&d.award),
        Field::Genre => d.genre.clone(),
        Field::ReleaseDate => optional(&d.release_date),
        Field::Presentation => d.presentation.clone(),
        Field::Review => optional(&d.review),
        Field::Video => match &d.video {
            Some(url) => format!("[{url}]"),
            None => MISSING.to_string(),
        },
    }
}

/// Collapse line breaks and cut to `max` characters, ending in "...".
fn clip(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    if max <= 3 {
        return ".".repeat(max);
    }
    let mut out: String = flat.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Render records as a column-aligned text table.
pub fn render_table(records: &[MovieRecord], max_cell: usize) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);

    let mut header = vec![String::new()];
    header.extend(COLUMNS.iter().map(|f| clip(f.header(), max_cell)));
    rows.push(header);

    for record in records {
        let mut row = vec![record.index.to_string()];
        row.extend(COLUMNS.iter().map(|&f| clip(&cell(record, f), max_cell)));
        rows.push(row);
    }

    let mut widths = vec![0usize; COLUMNS.len() + 1];
    for row in &rows {
        for (w, value) in widths.iter_mut().zip(row) {
            *w = (*w).max(value.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (value, &w))| {
                // index column right-aligned, text columns left-aligned
                if i == 0 {
                    format!("{value:>w$}")
                } else {
                    format!("{value:<w$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push_str(&format!(
        "\n[{} rows x {} columns]\n",
        records.len(),
        COLUMNS.len() + 1
    ));
    out
}

/// Render records as a pretty JSON array; missing fields become `null`.
pub fn render_json(records: &[MovieRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
