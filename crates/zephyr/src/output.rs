use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Pretty-printed API payloads.
    #[default]
    Json,
    /// Tables, key-value records and box-drawing trees.
    Text,
}

/// Print a JSON value, pretty-printed.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a listing: the raw items as JSON, or one table row per item as text.
pub fn print_list<T, R, F>(items: &[T], format: Format, to_row: F) -> anyhow::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    match format {
        Format::Json => print_json(items),
        Format::Text => {
            if items.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let rows: Vec<R> = items.iter().map(to_row).collect();
            println!("{}", Table::new(rows));
            Ok(())
        }
    }
}

/// Print a single record: the raw item as JSON, or aligned `Label  value` lines as text.
pub fn print_record<T: Serialize>(
    item: &T,
    format: Format,
    fields: &[(&str, Option<String>)],
) -> anyhow::Result<()> {
    match format {
        Format::Json => print_json(item),
        Format::Text => {
            println!("{}", key_value(fields));
            Ok(())
        }
    }
}

/// Align labels and substitute `N/A` for missing values.
pub fn key_value(fields: &[(&str, Option<String>)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| {
            format!(
                "{:<width$}  {}",
                label,
                value.as_deref().unwrap_or("N/A"),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Log a hint pointing at the next page when the server reports one.
pub fn pagination_hint(has_next: bool, start_at: u32, max_results: u32) {
    if has_next {
        tracing::info!(
            "More results available. Use --start-at {} to get next page",
            start_at + max_results
        );
    }
}

/// Render an optional value for a table cell or record line.
pub fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Table cell for an optional value.
pub fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_aligns_labels() {
        let text = key_value(&[
            ("ID", Some("7".to_string())),
            ("Name", Some("Staging".to_string())),
            ("Description", None),
        ]);
        assert_eq!(
            text,
            "ID           7\nName         Staging\nDescription  N/A"
        );
    }

    #[test]
    fn cell_defaults_to_na() {
        assert_eq!(cell(None::<i64>), "N/A");
        assert_eq!(cell(Some(3)), "3");
        assert_eq!(opt(Some("x")), Some("x".to_string()));
    }
}
