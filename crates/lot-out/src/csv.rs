//! CSV export: fixed 19-column layout, every field quoted

use lot_core::TraceabilityRecord;

use crate::view::RecordView;

pub const CSV_HEADER: [&str; 19] = [
    "LOT_ID",
    "CATCH_DATE",
    "SPECIES_FAO",
    "SPECIES_NAME",
    "PRODUCTION_AREA_TYPE",
    "FAO_ZONE",
    "AREA_DESCRIPTION",
    "QUANTITY_TYPE",
    "NET_WEIGHT_KG",
    "UNIT_COUNT",
    "GEAR_CATEGORY",
    "CFR_NUMBER",
    "LOGBOOK_NUMBER",
    "UNDERSIZED_PRESENT",
    "UNDERSIZED_WEIGHT_KG",
    "UNDERSIZED_UNIT_COUNT",
    "PRODUCT_FORM",
    "PURPOSE_PHASE",
    "DESTINATION",
];

/// Double-quote a field, doubling any quotes inside it.
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(quote).collect::<Vec<_>>().join(",")
}

pub fn header_line() -> String {
    line(CSV_HEADER)
}

/// One data row, columns in [`CSV_HEADER`] order. Null values are empty.
pub fn row(record: &TraceabilityRecord) -> String {
    let v = RecordView::from(record);
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();

    let fields: [String; 19] = [
        v.lot_id.clone(),
        v.catch_date.clone(),
        v.fao_code.clone(),
        v.local_name.clone(),
        v.area_type.clone(),
        v.fao_zone.clone(),
        v.zone_description.clone(),
        v.quantity_type.clone(),
        opt(&v.net_weight_kg),
        opt(&v.unit_count),
        v.gear.clone(),
        v.cfr_number.clone(),
        v.logbook_number.clone(),
        v.undersized_present.clone(),
        opt(&v.undersized_weight_kg),
        opt(&v.undersized_unit_count),
        opt(&v.product_form),
        opt(&v.purpose_phase),
        opt(&v.destination),
    ];
    line(fields.iter().map(String::as_str))
}

/// Header plus one row
pub fn format_csv(record: &TraceabilityRecord) -> String {
    format!("{}\n{}", header_line(), row(record))
}

/// Header plus one row per record
pub fn format_batch_csv(records: &[TraceabilityRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header_line());
    lines.extend(records.iter().map(row));
    lines.join("\n")
}

/// Split one CSV line, honouring quotes. Used to read exports back.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => fields.push(std::mem::take(&mut current)),
            (other, _) => current.push(other),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_doubles_quotes() {
        assert_eq!(quote(r#"Lubin "veliki""#), r#""Lubin ""veliki""""#);
        assert_eq!(quote(""), r#""""#);
    }

    #[test]
    fn test_header_has_nineteen_columns() {
        assert_eq!(split_line(&header_line()), CSV_HEADER.to_vec());
    }

    #[test]
    fn test_split_respects_quoting() {
        assert_eq!(
            split_line(r#""a,b","c ""d""","""#),
            vec!["a,b", r#"c "d""#, ""]
        );
    }
}
