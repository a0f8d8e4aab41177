//! Integration tests for reading datasets and persisting pipeline outputs.

use dq_core::RawRule;
use dq_engine::{CellValue, QualityPipeline};
use dq_io::{
    CLEANED_FILE, KPI_SUMMARY_FILE, KPIS_FILE, PROFILE_FILE, VIOLATIONS_FILE, persist_outputs,
    read_csv_dataset, read_csv_str,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn rule(id: &str, column: &str, rule_type: &str, param1: Option<&str>) -> RawRule {
    RawRule {
        rule_id: Some(id.to_string()),
        column_name: Some(column.to_string()),
        rule_type: Some(rule_type.to_string()),
        param1: param1.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_persist_outputs_writes_all_files() {
    let dataset = read_csv_str("id,age,city\n1,34,Rome\n2,-3,\n3,150,Milan\n").unwrap();
    let rules = vec![
        rule("age_min", "age", "MIN", Some("0")),
        rule("age_max", "age", "MAX", Some("120")),
        rule("city_nn", "city", "NOT_NULL", None),
    ];
    let outcome = QualityPipeline::new().run(&dataset, &rules);
    let dir = tempdir().unwrap();

    let paths = persist_outputs(dir.path(), &outcome).unwrap();

    assert_eq!(paths.cleaned, dir.path().join(CLEANED_FILE));
    for name in [
        CLEANED_FILE,
        VIOLATIONS_FILE,
        PROFILE_FILE,
        KPIS_FILE,
        KPI_SUMMARY_FILE,
    ] {
        assert!(dir.path().join(name).is_file(), "missing {}", name);
    }

    let cleaned = read_csv_dataset(&paths.cleaned).unwrap();
    assert_eq!(
        cleaned.column("age").unwrap(),
        &[CellValue::Int(34), CellValue::Int(0), CellValue::Int(120)]
    );
    assert_eq!(cleaned.get(1, "city"), Some(&CellValue::from("UNKNOWN")));

    let violations = read_csv_dataset(&paths.violations).unwrap();
    assert_eq!(violations.len(), 3);
    assert_eq!(
        violations.column("rule_id").unwrap(),
        &[
            CellValue::from("age_min"),
            CellValue::from("age_max"),
            CellValue::from("city_nn")
        ]
    );
    assert_eq!(
        violations.column("row_index").unwrap(),
        &[CellValue::Int(1), CellValue::Int(2), CellValue::Int(1)]
    );

    let kpis = read_csv_dataset(&paths.kpis).unwrap();
    assert_eq!(kpis.len(), 3);
    assert_eq!(kpis.get(1, "violation_count"), Some(&CellValue::Int(2)));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.kpi_summary).unwrap()).unwrap();
    assert_eq!(summary["total_violations"], 3);
    assert_eq!(summary["stats"]["rules_evaluated"], 3);
    assert!(summary["skipped_rules"].as_array().unwrap().is_empty());
}

#[test]
fn test_no_violations_still_writes_header() {
    let dataset = read_csv_str("id\n1\n").unwrap();
    let outcome = QualityPipeline::new().run(&dataset, &[]);
    let dir = tempdir().unwrap();

    let paths = persist_outputs(&dir.path().join("out"), &outcome).unwrap();

    let content = std::fs::read_to_string(&paths.violations).unwrap();
    assert_eq!(
        content.lines().next(),
        Some("row_index,rule_id,column_name,severity,description,reason,value")
    );
}

#[test]
fn test_read_missing_file_fails() {
    let dir = tempdir().unwrap();
    let result = read_csv_dataset(&dir.path().join("nope.csv"));
    assert!(matches!(result, Err(dq_io::IoError::FileError(_))));
}
