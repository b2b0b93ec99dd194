//! File-level tests for saved series.

use tn_results::{ResultsError, TimeSeries, read_csv, read_json, write_csv, write_json};

fn sample() -> TimeSeries {
    let mut s = TimeSeries::new(vec!["Battery".into(), "Board".into()]);
    s.push(3.0, vec![300.0, 290.0]).unwrap();
    s.push(6.0, vec![299.5, 290.5]).unwrap();
    s.push(9.0, vec![299.0, 291.0]).unwrap();
    s
}

#[test]
fn saved_csv_loads_back() {
    let path = std::env::temp_dir().join("tn_results_saved_csv.csv");
    let series = sample();
    write_csv(&path, &series).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4, "header plus one row per step");
    assert_eq!(read_csv(&path).unwrap(), series);
}

#[test]
fn saved_json_loads_back() {
    let path = std::env::temp_dir().join("tn_results_saved_json.json");
    let series = sample();
    write_json(&path, &series).unwrap();
    assert_eq!(read_json(&path).unwrap(), series);
}

#[test]
fn unwritable_path_is_io_error() {
    let path = std::env::temp_dir()
        .join("tn_results_no_such_dir")
        .join("nested")
        .join("out.csv");
    assert!(matches!(write_csv(&path, &sample()), Err(ResultsError::Io(_))));
}

#[test]
fn malformed_value_is_reported_with_line() {
    let path = std::env::temp_dir().join("tn_results_malformed.csv");
    std::fs::write(&path, "time,A\n1,300\n2,warm\n").unwrap();
    match read_csv(&path) {
        Err(ResultsError::Malformed { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected malformed error, got {other:?}"),
    }
}
