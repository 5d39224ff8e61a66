use super::model::{AccidentTable, CellValue, Record, REGION_TYPE_COLUMN};

/// Select records matching an optional region-type filter.
///
/// `None` or an empty string means no filtering: every record is returned.
/// Otherwise only records whose `region_type` is byte-equal to the given
/// value are kept. Source order is preserved either way, and a value absent
/// from the dataset simply yields an empty result.
pub fn filter_by_region_type<'a>(
    table: &'a AccidentTable,
    region_type: Option<&str>,
) -> Vec<&'a Record> {
    let wanted = match region_type {
        Some(v) if !v.is_empty() => v,
        _ => return table.records.iter().collect(),
    };

    table
        .records
        .iter()
        .filter(|record| {
            matches!(record.get(REGION_TYPE_COLUMN), Some(CellValue::String(t)) if t == wanted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_table;
    use crate::data::model::REGION_NAME_COLUMN;

    const SAMPLE: &str = "\
State/UT/City,region_type,Total Traffic Accidents - Cases
delhi,State,5000
chandigarh,UT,800
mumbai,City,4200
agra,City,900
";

    fn table() -> AccidentTable {
        read_table(SAMPLE.as_bytes()).unwrap()
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get(REGION_NAME_COLUMN).unwrap().to_text().unwrap())
            .collect()
    }

    #[test]
    fn no_filter_returns_every_record_in_order() {
        let table = table();

        let all = filter_by_region_type(&table, None);
        assert_eq!(all.len(), table.len());
        assert_eq!(names(&all), vec!["delhi", "chandigarh", "mumbai", "agra"]);

        // Empty string is treated the same as an absent parameter.
        let all = filter_by_region_type(&table, Some(""));
        assert_eq!(all.len(), table.len());
    }

    #[test]
    fn filter_is_exact_match_only() {
        let table = table();

        let cities = filter_by_region_type(&table, Some("City"));
        assert_eq!(names(&cities), vec!["mumbai", "agra"]);

        // Case-sensitive: "city" is not "City".
        assert!(filter_by_region_type(&table, Some("city")).is_empty());
        // No substring matching either.
        assert!(filter_by_region_type(&table, Some("Cit")).is_empty());
    }

    #[test]
    fn unknown_value_yields_empty_result() {
        let table = table();
        assert!(filter_by_region_type(&table, Some("Village")).is_empty());
    }

    #[test]
    fn distinct_filters_partition_the_table() {
        let table = table();

        let mut total = 0;
        for region_type in &table.region_types {
            let subset = filter_by_region_type(&table, Some(region_type.as_str()));
            assert!(!subset.is_empty());
            total += subset.len();
        }
        assert_eq!(total, table.len());
    }
}
