use connectors::csv::source::{self, CsvOptions};
use engine_filter::condition::{FilterCondition, FilterOperator, Operand};
use model::{core::value::Value, records::dataset::Dataset};
use std::io::Write;
use tempfile::NamedTempFile;

/// Three-row fixture shared across the scenario tests.
pub const PEOPLE_CSV: &str = "\
age,name,joined
25,Alice,2023-01-10
40,Bob,2024-06-01
17,Cara,
";

pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file
}

pub fn load_fixture(content: &str) -> Dataset {
    let file = write_csv(content);
    source::load(file.path(), &CsvOptions::default()).expect("load fixture csv")
}

pub fn condition(column: &str, operator: FilterOperator, operand: Operand) -> FilterCondition {
    FilterCondition::new(column, operator, operand).expect("valid test condition")
}

pub fn scalar_int(v: i64) -> Operand {
    Operand::Scalar(Value::Int(v))
}

pub fn scalar_str(v: &str) -> Operand {
    Operand::Scalar(Value::String(v.to_string()))
}

/// The `name` column of every row, in dataset order.
pub fn names(dataset: &Dataset) -> Vec<String> {
    let col = dataset.column_index("name").expect("name column");
    (0..dataset.row_count())
        .map(|row| dataset.value(row, col).render())
        .collect()
}
