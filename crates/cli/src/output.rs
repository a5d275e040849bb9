use crate::error::CliError;
use model::{core::value::Value, records::dataset::Dataset};

/// Fixed-width table with a display cap. The full dataset is what the filter
/// produced; the cap only limits what gets printed.
pub fn print_table(dataset: &Dataset, limit: usize) {
    let shown = dataset.row_count().min(limit);

    let mut widths: Vec<usize> = dataset.columns().iter().map(|c| c.name.len()).collect();
    for row in 0..shown {
        for (col, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(dataset.value(row, col).render().len());
        }
    }

    let header = dataset
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c.name, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    for row in 0..shown {
        let line = widths
            .iter()
            .enumerate()
            .map(|(col, w)| format!("{:<w$}", dataset.value(row, col).render(), w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{line}");
    }

    if shown < dataset.row_count() {
        println!("({} of {} rows shown)", shown, dataset.row_count());
    } else {
        println!("({} rows)", dataset.row_count());
    }
}

pub fn print_json(dataset: &Dataset, limit: usize) -> Result<(), CliError> {
    let shown = dataset.row_count().min(limit);
    let mut rows = Vec::with_capacity(shown);
    for row in 0..shown {
        let mut object = serde_json::Map::new();
        for (col, column) in dataset.columns().iter().enumerate() {
            object.insert(column.name.clone(), cell_to_json(dataset.value(row, col)));
        }
        rows.push(serde_json::Value::Object(object));
    }
    let json = serde_json::to_string_pretty(&rows)?;
    println!("{json}");
    Ok(())
}

fn cell_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(v) => serde_json::Value::from(*v),
        Value::Float(v) => serde_json::Value::from(*v),
        Value::Boolean(v) => serde_json::Value::from(*v),
        Value::String(v) => serde_json::Value::from(v.clone()),
        Value::Date(v) => serde_json::Value::from(v.to_string()),
        Value::Timestamp(v) => serde_json::Value::from(v.to_rfc3339()),
        Value::Null => serde_json::Value::Null,
    }
}
