use std::io::{Read, Seek};
use std::path::Path;

use calamine::Reader as _;

use crate::foundation::error::{ThumbError, ThumbResult};
use crate::theme::PartialTheme;

/// One decoded batch input row.
///
/// Values are raw user input; nothing is validated here. Blank cells decode as absent
/// (`None`, or an empty `id`/`title`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowRecord {
    /// 0-based position in the input, header excluded.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub preset: Option<String>,
    pub overrides: PartialTheme,
}

impl RowRecord {
    /// Archive entry / file name for this row's image.
    pub fn output_name(&self) -> String {
        format!("{}.png", self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Id,
    Title,
    Preset,
    BackgroundMode,
    PrimaryColor,
    SecondaryColor,
    GradientDirection,
    TitleColor,
    BadgeColor,
    BrandColor,
    BorderColor,
}

impl Column {
    /// Match a header name, ignoring case, `_`, `-` and spaces. Unknown headers are ignored.
    fn from_header(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Some(match key.as_str() {
            "id" | "quizid" => Self::Id,
            "title" => Self::Title,
            "preset" => Self::Preset,
            "backgroundmode" | "bgtype" => Self::BackgroundMode,
            "primarycolor" | "bgcolor1" => Self::PrimaryColor,
            "secondarycolor" | "bgcolor2" => Self::SecondaryColor,
            "gradientdirection" => Self::GradientDirection,
            "titlecolor" | "textcolor" => Self::TitleColor,
            "badgecolor" | "verifiedcolor" => Self::BadgeColor,
            "brandcolor" | "waygroundcolor" => Self::BrandColor,
            "bordercolor" => Self::BorderColor,
            _ => return None,
        })
    }

    fn assign(self, row: &mut RowRecord, value: &str) {
        let value = value.trim();
        let opt = (!value.is_empty()).then(|| value.to_string());
        let t = &mut row.overrides;
        match self {
            Self::Id => row.id = value.to_string(),
            Self::Title => row.title = value.to_string(),
            Self::Preset => row.preset = opt,
            Self::BackgroundMode => t.background_mode = opt,
            Self::PrimaryColor => t.primary_color = opt,
            Self::SecondaryColor => t.secondary_color = opt,
            Self::GradientDirection => t.gradient_direction = opt,
            Self::TitleColor => t.title_color = opt,
            Self::BadgeColor => t.badge_color = opt,
            Self::BrandColor => t.brand_color = opt,
            Self::BorderColor => t.border_color = opt,
        }
    }
}

/// Map a header row to columns, requiring an id column (`id` or `quiz_id`) and a `title`.
fn header_columns<'h>(
    source: &str,
    headers: impl IntoIterator<Item = &'h str>,
) -> ThumbResult<Vec<Option<Column>>> {
    let headers: Vec<&str> = headers.into_iter().collect();
    let columns: Vec<Option<Column>> = headers.iter().map(|h| Column::from_header(h)).collect();
    for (required, name) in [(Column::Id, "id"), (Column::Title, "title")] {
        if !columns.contains(&Some(required)) {
            return Err(ThumbError::decode(format!(
                "{source} header has no '{name}' column (found: {})",
                headers.join(", ")
            )));
        }
    }
    Ok(columns)
}

fn row_from_cells<'c>(
    index: usize,
    columns: &[Option<Column>],
    cells: impl IntoIterator<Item = &'c str>,
) -> RowRecord {
    let mut row = RowRecord {
        index,
        ..RowRecord::default()
    };
    for (col, value) in columns.iter().zip(cells) {
        if let Some(col) = col {
            col.assign(&mut row, value);
        }
    }
    row
}

/// Decode CSV rows. The header must name an id column (`id` or `quiz_id`) and a `title`
/// column; otherwise the whole input is rejected with [`ThumbError::Decode`].
pub fn read_csv<R: Read>(reader: R) -> ThumbResult<Vec<RowRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ThumbError::decode(format!("csv header: {e}")))?
        .clone();
    let columns = header_columns("csv", headers.iter())?;

    let mut rows = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record =
            record.map_err(|e| ThumbError::decode(format!("csv row {}: {e}", index + 1)))?;
        rows.push(row_from_cells(index, &columns, record.iter()));
    }
    Ok(rows)
}

/// Decode the first worksheet of an `.xlsx` workbook with the same header rules as
/// [`read_csv`]. Numeric cells are taken as their text (`7.0` reads as `"7"`); fully blank
/// rows are ignored.
pub fn read_xlsx<R: Read + Seek>(reader: R) -> ThumbResult<Vec<RowRecord>> {
    let mut workbook: calamine::Xlsx<R> = calamine::Xlsx::new(reader)
        .map_err(|e| ThumbError::decode(format!("xlsx workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ThumbError::decode("xlsx workbook has no worksheet"))?
        .map_err(|e| ThumbError::decode(format!("xlsx worksheet: {e}")))?;

    let mut sheet_rows = range.rows().map(|cells| {
        cells
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<Vec<String>>()
    });
    let headers = sheet_rows
        .next()
        .ok_or_else(|| ThumbError::decode("xlsx worksheet is empty"))?;
    let columns = header_columns("xlsx", headers.iter().map(String::as_str))?;

    Ok(sheet_rows
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .enumerate()
        .map(|(index, cells)| row_from_cells(index, &columns, cells.iter().map(String::as_str)))
        .collect())
}

/// Decode a JSON array of row objects. Keys follow the CSV header rules; numbers and
/// booleans are taken as their text, `null` as absent.
pub fn read_json<R: Read>(reader: R) -> ThumbResult<Vec<RowRecord>> {
    let items: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_reader(reader)
        .map_err(|e| ThumbError::decode(format!("json rows: {e}")))?;

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, obj)| {
            let mut row = RowRecord {
                index,
                ..RowRecord::default()
            };
            for (key, value) in &obj {
                let Some(col) = Column::from_header(key) else {
                    continue;
                };
                let text = match value {
                    serde_json::Value::Null => continue,
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                col.assign(&mut row, &text);
            }
            row
        })
        .collect())
}

/// Read rows from a `.csv`, `.xlsx` or `.json` file, chosen by extension.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_rows_from_path(path: impl AsRef<Path>) -> ThumbResult<Vec<RowRecord>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let file = std::fs::File::open(path)?;
    let rows = match ext.as_deref() {
        Some("csv") => read_csv(std::io::BufReader::new(file))?,
        Some("xlsx") => read_xlsx(std::io::BufReader::new(file))?,
        Some("json") => read_json(std::io::BufReader::new(file))?,
        _ => {
            return Err(ThumbError::decode(format!(
                "unsupported row file '{}': expected .csv, .xlsx or .json",
                path.display()
            )));
        }
    };
    tracing::debug!(rows = rows.len(), "rows decoded");
    Ok(rows)
}

/// Check that `id` is usable as a file name: non-empty, no path separators, no `..`, no
/// leading dot, no control characters.
pub fn validate_row_id(id: &str) -> ThumbResult<()> {
    if id.is_empty() {
        return Err(ThumbError::invalid_row("missing id"));
    }
    if id.starts_with('.')
        || id.contains("..")
        || id.chars().any(|c| matches!(c, '/' | '\\' | ':') || c.is_control())
    {
        return Err(ThumbError::invalid_row(format!(
            "id \"{}\" is not a safe file name",
            id.escape_debug()
        )));
    }
    Ok(())
}

/// A small example batch input in the CSV schema accepted by [`read_csv`].
pub fn sample_csv() -> ThumbResult<String> {
    let rows: [[&str; 4]; 5] = [
        ["quiz_id", "title", "preset", "title_color"],
        ["1", "Adding and Subtracting Decimals: Perfect Quiz for 7th Grade", "blue", ""],
        ["2", "Photosynthesis Basics", "yellow", ""],
        ["3", "World War II: Key Events and Turning Points", "magenta", ""],
        ["4", "Fractions, Ratios and Percentages", "orange", "#3D2B1F"],
    ];

    let mut w = csv::Writer::from_writer(Vec::new());
    for row in rows {
        w.write_record(row)
            .map_err(|e| ThumbError::decode(format!("sample csv: {e}")))?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| ThumbError::decode(format!("sample csv: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ThumbError::decode(format!("sample csv: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/rows.rs"]
mod tests;
