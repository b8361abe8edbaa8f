use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::models::Page;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(fields)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(fields);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a single record: pretty JSON, or `label: value` lines in text mode
pub fn output_record<T: Serialize>(output_format: &OutputFormat, record: &T) -> anyhow::Result<()> {
    let value = serde_json::to_value(record)?;
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => match &value {
            Value::Object(fields) => {
                for (key, field) in fields {
                    if field.is_array() || field.is_object() {
                        continue;
                    }
                    println!("{:<24} {}", format!("{}:", key), display_value(field));
                }
            }
            other => println!("{}", display_value(other)),
        },
    }
    Ok(())
}

/// Output a page as a table of `columns` (JSON mode prints the whole page)
pub fn output_page<T: Serialize>(
    output_format: &OutputFormat,
    page: &Page<T>,
    columns: &[&str],
    empty_message: &str,
) -> anyhow::Result<()> {
    if let OutputFormat::Json = output_format {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.content.is_empty() {
        println!("{}", empty_message);
        return Ok(());
    }

    let rows = page
        .content
        .iter()
        .map(|item| {
            let value = serde_json::to_value(item)?;
            Ok(columns
                .iter()
                .map(|c| value.get(*c).map(display_value).unwrap_or_default())
                .collect::<Vec<_>>())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    print_table(columns, &rows);
    println!(
        "\nPage {} of {} ({} total)",
        page.page + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    Ok(())
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("{}", table_line(&header, &widths));
    println!("{}", table_line(&separator, &widths));
    for row in rows {
        println!("{}", table_line(row, &widths));
    }
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Scalar rendering for text output; arrays are comma-joined
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
