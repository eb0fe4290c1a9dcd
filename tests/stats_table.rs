use partisan_bars::{Dataset, Record, stats, table};

fn sample() -> Dataset {
    Dataset::new(vec![
        Record::new("D", 40.0, 1, 0),
        Record::new("A", 10.0, 2, 3),
        Record::new("C", 30.0, 0, 4),
        Record::new("B", 20.0, 5, 5),
    ])
    .unwrap()
}

#[test]
fn summary_of_incomes_and_delegations() {
    let s = stats::summary(&sample());
    assert_eq!(s.count, 4);
    assert_eq!(s.min, 10.0);
    assert_eq!(s.max, 40.0);
    assert_eq!(s.mean, 25.0);
    assert_eq!(s.median, 25.0);
    assert_eq!(s.democratic_reps, 8);
    assert_eq!(s.republican_reps, 12);
}

#[test]
fn odd_count_median_is_middle_value() {
    let ds = Dataset::new(vec![
        Record::new("A", 5.0, 1, 0),
        Record::new("B", 1.0, 1, 0),
        Record::new("C", 3.0, 1, 0),
    ])
    .unwrap();
    assert_eq!(stats::summary(&ds).median, 3.0);
}

#[test]
fn table_rows_follow_dataset_order() {
    let rows = table::table_rows(&sample());
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["D", "A", "C", "B"]);
    assert_eq!(rows[0].median_income, "$40");
}

#[test]
fn text_table_has_header_and_aligned_columns() {
    let ds = Dataset::new(vec![
        Record::new("Georgia", 52_977.0, 5, 9),
        Record::new("Ohio", 52_407.0, 4, 12),
    ])
    .unwrap();
    let text = table::render_text(&table::table_rows(&ds));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("State"));
    assert!(lines[0].contains("Median income"));
    assert!(lines[1].starts_with("Georgia"));
    assert!(lines[1].contains("$52,977"));
    assert!(lines.iter().all(|l| l.chars().count() == lines[0].chars().count()));
}
