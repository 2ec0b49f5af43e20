use serde_json::Value;

use crate::cli::OutputFormat;

/// Print a response body in the requested format
pub fn output_value(output_format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => print_text(value, 0),
    }
    Ok(())
}

fn print_text(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, item) in map {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        println!("{}{}:", pad, key);
                        print_text(item, indent + 1);
                    }
                    other => println!("{}{}: {}", pad, key, scalar(other)),
                }
            }
        }
        Value::Array(items) if items.is_empty() => println!("{}(none)", pad),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_text(item, indent);
            }
        }
        other => println!("{}{}", pad, scalar(other)),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// `page` / `pageSize` query pairs for list endpoints
pub fn page_query(page: Option<u32>, page_size: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(page_size) = page_size {
        query.push(("pageSize", page_size.to_string()));
    }
    query
}
