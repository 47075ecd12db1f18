use chrono::NaiveDate;
use class_tracker_bot::bot::commands::check::{
    group_by_user, render_report, CLASS_ALLOWANCE, NO_CLASSES_MESSAGE,
};
use class_tracker_bot::database::models::AttendanceRecord;

fn record(id: i64, user_id: i64, username: &str, date: &str) -> AttendanceRecord {
    AttendanceRecord {
        id,
        user_id,
        username: username.to_string(),
        class_date: date.parse().unwrap(),
    }
}

/// Rows as the store hands them out: ascending by date, then id.
fn store_order(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records.sort_by_key(|r| (r.class_date, r.id));
    records
}

#[test]
fn test_empty_store_message_is_fixed() {
    assert_eq!(NO_CLASSES_MESSAGE, "No classes recorded");
}

#[test]
fn test_per_user_sections_list_all_dates_ascending() {
    // Three dates for ada, two for bob, inserted interleaved
    let records = store_order(vec![
        record(1, 1, "ada", "2024-02-01"),
        record(2, 2, "bob", "2024-01-15"),
        record(3, 1, "ada", "2024-01-01"),
        record(4, 2, "bob", "2024-03-01"),
        record(5, 1, "ada", "2024-03-20"),
    ]);

    let groups = group_by_user(&records);
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].username, "ada");
    assert_eq!(
        groups[0].dates,
        vec![
            "2024-01-01".parse::<NaiveDate>().unwrap(),
            "2024-02-01".parse().unwrap(),
            "2024-03-20".parse().unwrap(),
        ]
    );

    assert_eq!(groups[1].username, "bob");
    assert_eq!(
        groups[1].dates,
        vec![
            "2024-01-15".parse::<NaiveDate>().unwrap(),
            "2024-03-01".parse().unwrap(),
        ]
    );
}

#[test]
fn test_groups_ordered_by_descending_count() {
    let records = store_order(vec![
        record(1, 1, "ada", "2024-01-01"),
        record(2, 2, "bob", "2024-01-02"),
        record(3, 2, "bob", "2024-01-03"),
        record(4, 3, "eve", "2024-01-04"),
        record(5, 3, "eve", "2024-01-05"),
        record(6, 3, "eve", "2024-01-06"),
    ]);

    let groups = group_by_user(&records);
    let names: Vec<&str> = groups.iter().map(|g| g.username.as_str()).collect();
    assert_eq!(names, vec!["eve", "bob", "ada"]);
}

#[test]
fn test_tied_groups_keep_enumeration_order() {
    // Both users have two records; ada's earliest row enumerates first
    let records = store_order(vec![
        record(1, 1, "ada", "2024-01-01"),
        record(2, 2, "bob", "2024-01-02"),
        record(3, 1, "ada", "2024-01-03"),
        record(4, 2, "bob", "2024-01-04"),
    ]);

    let groups = group_by_user(&records);
    assert_eq!(groups[0].username, "ada");
    assert_eq!(groups[1].username, "bob");
}

#[test]
fn test_total_is_the_largest_group_count() {
    // 3 + 2 = 5 rows, but the report total is the top group's 3
    let records = store_order(vec![
        record(1, 1, "ada", "2024-01-01"),
        record(2, 1, "ada", "2024-01-02"),
        record(3, 1, "ada", "2024-01-03"),
        record(4, 2, "bob", "2024-01-01"),
        record(5, 2, "bob", "2024-01-02"),
    ]);

    let report = render_report(&group_by_user(&records));
    assert!(report.contains("Classes taken: 3"));
    assert!(!report.contains("Classes taken: 5"));
}

#[test]
fn test_credits_left_is_allowance_minus_total() {
    let cases = vec![1usize, 4, 25, 100, 120];
    for count in cases {
        let records: Vec<AttendanceRecord> = (0..count)
            .map(|i| record(i as i64 + 1, 1, "ada", "2024-05-01"))
            .collect();

        let report = render_report(&group_by_user(&records));
        assert!(report.contains(&format!("Classes taken: {count}")));
        assert!(report.contains(&format!(
            "Credits left: {}",
            CLASS_ALLOWANCE - count as i64
        )));
    }
}

#[test]
fn test_duplicate_dates_count_as_separate_classes() {
    let records = store_order(vec![
        record(1, 1, "ada", "2024-05-01"),
        record(2, 1, "ada", "2024-05-01"),
    ]);

    let groups = group_by_user(&records);
    assert_eq!(groups[0].dates.len(), 2);

    let report = render_report(&groups);
    assert!(report.contains("Classes taken: 2"));
    assert!(report.contains("ada (2 classes):\n2024-05-01\n2024-05-01\n"));
}

#[test]
fn test_report_header_comes_before_user_sections() {
    let records = vec![record(1, 1, "ada", "2024-05-01")];
    let report = render_report(&group_by_user(&records));

    let header_pos = report.find("Classes taken:").unwrap();
    let credits_pos = report.find("Credits left:").unwrap();
    let section_pos = report.find("ada (").unwrap();
    assert!(header_pos < credits_pos);
    assert!(credits_pos < section_pos);
}
