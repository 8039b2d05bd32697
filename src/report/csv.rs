use crate::model::record::Dataset;
use crate::report::{CSV_BOM, format_score, format_value};

/// Filtered dataset as UTF-8 CSV with a leading byte-order mark so
/// spreadsheet tools pick the right encoding.
pub fn render_dataset_csv(dataset: &Dataset) -> Result<Vec<u8>, csv::Error> {
    let schema = &dataset.schema;
    let mut buf = CSV_BOM.to_vec();
    {
        let mut w = csv::WriterBuilder::new().from_writer(&mut buf);

        let attribute_columns = [
            &schema.political_affiliation_column,
            &schema.role_column,
            &schema.age_column,
            &schema.remarks_column,
        ];
        let mut header = vec![schema.name_column.clone(), schema.department_column.clone()];
        header.extend(attribute_columns.iter().filter_map(|c| (*c).clone()));
        header.extend(dataset.extra_columns.iter().cloned());
        header.extend(schema.dimensions.iter().cloned());
        header.push(schema.composite_column.clone());
        w.write_record(&header)?;

        for record in &dataset.records {
            let attrs = &record.attributes;
            let mut row = vec![record.name.clone(), record.department.clone()];
            if schema.political_affiliation_column.is_some() {
                row.push(attrs.political_affiliation.clone().unwrap_or_default());
            }
            if schema.role_column.is_some() {
                row.push(attrs.role.clone().unwrap_or_default());
            }
            if schema.age_column.is_some() {
                row.push(attrs.age.map(format_value).unwrap_or_default());
            }
            if schema.remarks_column.is_some() {
                row.push(attrs.remarks.clone().unwrap_or_default());
            }
            for column in &dataset.extra_columns {
                let value = attrs
                    .extra
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default();
                row.push(value);
            }
            row.extend(record.scores.iter().map(|v| format_value(*v)));
            row.push(format_score(record.composite));
            w.write_record(&row)?;
        }
        w.flush()?;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/csv.rs"]
mod tests;
