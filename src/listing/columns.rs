// src/listing/columns.rs
// =============================================================================
// Recognises the "size" and "last modified" text that servers print next to
// each link in a listing.
//
// Servers disagree on the layout:
//   Apache:  <td><a>file.txt</a></td><td>2024-01-01 10:00</td><td>1.2K</td>
//   nginx:   <a>file.txt</a>          01-Jan-2024 10:00     1234
//   lighttpd: ... <td>2024-Jan-01 10:00:00</td><td>4.0K</td>
//
// So instead of relying on column positions we look at what each piece of
// text looks like. Anything we can't recognise is ignored.
// =============================================================================

/// Size and date text found next to a link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub size: Option<String>,
    pub last_modified: Option<String>,
}

impl Columns {
    /// Builds columns from the table cells that follow the link's cell
    ///
    /// The first date-like cell wins, and so does the first size-like cell.
    /// Later cells (usually a free-text "Description") are ignored.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = Columns::default();
        let mut size_seen = false;

        for cell in cells {
            let text = cell.as_ref().trim();
            if text.is_empty() {
                continue;
            }

            if columns.last_modified.is_none() && looks_like_date(text) {
                columns.last_modified = Some(text.to_string());
            } else if !size_seen && looks_like_size(text) {
                // "-" still counts as the size column, it just has no value
                size_seen = true;
                columns.size = normalize_size(text);
            }
        }

        columns
    }

    /// Builds columns from the text printed after a link in a <pre> block
    ///
    /// Example: "          01-Jan-2024 10:00     1234"
    /// The last token is the size, everything before it is the date.
    pub fn from_trailing_text(text: &str) -> Self {
        let line = text.lines().next().unwrap_or("");
        let mut tokens: Vec<&str> = line.split_whitespace().collect();

        let mut columns = Columns::default();

        if let Some(last) = tokens.last() {
            if looks_like_size(last) && !looks_like_date(last) {
                columns.size = normalize_size(last);
                tokens.pop();
            }
        }

        let date = tokens.join(" ");
        if looks_like_date(&date) {
            columns.last_modified = Some(date);
        }

        columns
    }
}

// Size units servers are known to print, longest first so "KiB" beats "B"
const SIZE_UNITS: [&str; 14] = [
    "bytes", "kib", "mib", "gib", "tib", "kb", "mb", "gb", "tb", "k", "m", "g", "t", "b",
];

/// Returns true for text like "1234", "1.2K", "4.0 KiB", "12 bytes" or "-"
pub fn looks_like_size(text: &str) -> bool {
    let text = text.trim();
    if text == "-" {
        return true;
    }

    let lower = text.to_ascii_lowercase();
    let number = SIZE_UNITS
        .iter()
        .find_map(|unit| lower.strip_suffix(unit))
        .unwrap_or(&lower)
        .trim();

    !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && number.chars().any(|c| c.is_ascii_digit())
}

/// Returns true for text like "2024-01-01", "01-Jan-2024 10:00" or "21.12.2023"
pub fn looks_like_date(text: &str) -> bool {
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    text.contains(':')
        || text.matches('-').count() >= 2
        || text.matches('/').count() >= 2
        || text.matches('.').count() >= 2
}

// The "-" placeholder means "no size", same as an empty cell
fn normalize_size(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text == "-" {
        None
    } else {
        Some(text.to_string())
    }
}
