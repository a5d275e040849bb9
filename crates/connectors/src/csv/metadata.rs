use csv::StringRecord;
use model::core::data_type::DataType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CsvColumnMetadata {
    pub name: String,
    pub data_type: DataType,
    pub ordinal: usize,
}

pub fn normalize_col_name(name: &str) -> String {
    name.replace(" ", "_")
        .replace("-", "_")
        .replace(".", "_")
        .replace("(", "_")
        .replace(")", "_")
        .replace(",", "_")
        .to_lowercase()
}

/// Infer a type tag per column by walking every record through the promotion
/// chain. A column starts at the narrowest tag and only widens.
pub fn infer_columns(headers: &[String], records: &[StringRecord]) -> Vec<CsvColumnMetadata> {
    headers
        .iter()
        .enumerate()
        .map(|(ordinal, name)| {
            let mut data_type = DataType::default();
            for record in records {
                data_type = data_type.promote(record.get(ordinal).unwrap_or(""));
            }
            CsvColumnMetadata {
                name: normalize_col_name(name),
                data_type,
                ordinal,
            }
        })
        .collect()
}
