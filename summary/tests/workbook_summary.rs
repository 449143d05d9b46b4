use std::fs;
use std::path::PathBuf;

use netscrape_core::{AggregationConfig, SummaryRow};
use netscrape_summary::{SummaryError, Workbook, summarize_workbook};

fn count(switch: &str, key: &str, count: usize) -> SummaryRow {
    SummaryRow::Count {
        switch: switch.to_string(),
        key: Some(key.to_string()),
        count,
    }
}

#[test]
fn test_workbook_fixture_speed_and_type_tables() {
    let workbook = load("workbook.yaml");
    let tables = summarize_workbook(&workbook, &AggregationConfig::default()).unwrap();

    // The prefix filter reads Name, not Port: Po1 named "uplink-dist2" is
    // counted, while Gi1/0/6 named "Port-channel member" is not.
    assert_eq!(
        tables.speed,
        vec![
            count("acc-sw3", "a-1000", 2),
            count("acc-sw3", "a-100", 1),
            count("acc-sw3", "10G", 1),
            count("acc-sw3", "a-10G", 1),
            SummaryRow::Separator,
            count("legacy-export", "a-100", 2),
        ]
    );
    // legacy-export has no Type column, so the type table holds one block.
    assert_eq!(
        tables.types,
        vec![
            count("acc-sw3", "10/100/1000BaseTX", 3),
            count("acc-sw3", "SFP-10GBase-SR", 1),
            count("acc-sw3", "", 1),
        ]
    );

    let sheets = tables.to_sheets();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[1].name, "Type Summary");
}

#[test]
fn test_custom_filters_from_config() {
    let workbook = load("workbook.yaml");
    let config = AggregationConfig {
        excluded_name_prefixes: vec!["uplink".to_string()],
        ..AggregationConfig::default()
    };
    let tables = summarize_workbook(&workbook, &config).unwrap();
    assert!(
        tables
            .speed
            .iter()
            .all(|row| !matches!(row, SummaryRow::Count { key: Some(key), .. } if key == "10G"))
    );
}

#[test]
fn test_workbook_without_eligible_sheets() {
    let yaml = "sheets:\n  - name: a\n    columns: [Info]\n    rows: [[No data parsed]]\n";
    let workbook: Workbook = serde_yaml::from_str(yaml).unwrap();
    let err = summarize_workbook(&workbook, &AggregationConfig::default()).unwrap_err();
    assert_eq!(err, SummaryError::NoValidData);
    assert!(err.to_string().starts_with("No valid data found"));
}

fn load(name: &str) -> Workbook {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = fs::read_to_string(path).expect("fixture file must be readable");
    serde_yaml::from_str(&text).expect("fixture workbook must parse")
}
