use chrono::NaiveDate;
use schedule_etl::core::formatter;
use schedule_etl::ScheduleParser;

// Trimmed-down version of a real export: headers carry trailing detail
// after the colon, blocks share type lines, stray notes are interleaved.
const EXPORT: &str = "\
Course list export 2025

(מבוא למערכות מידע: 3 נ\"ז
הרצאה
א 09:00 11:00 Smith Room101
ב 09:00 11:00 Smith Room101
תרגול
ג 12:00 14:00 Cohen Room102

(אלגוריתמים: 4 נ\"ז
הרצאה
ד 10:00 12:00 Levi Room201
מעבדה
ה 16:00 19:00 Mizrahi Lab2

(סדנת לילה: 2 נ\"ז
ו 23:00 02:00 Barak Lab1
";

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
}

#[test]
fn test_full_export_structure() {
    let courses = ScheduleParser::with_anchor(anchor()).parse(EXPORT).unwrap();

    assert_eq!(courses.len(), 3);

    let titles: Vec<&str> = courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["מבוא למערכות מידע", "אלגוריתמים", "סדנת לילה"]);
    let ids: Vec<usize> = courses.iter().map(|c| c.id).collect();
    assert_eq!(ids, [0, 1, 2]);

    assert_eq!(courses[0].lectures.len(), 3);
    assert_eq!(courses[1].lectures.len(), 2);
    assert_eq!(courses[2].lectures.len(), 1);

    // per-course lecture numbering
    assert_eq!(
        courses[0]
            .lectures
            .iter()
            .map(|l| l.id)
            .collect::<Vec<_>>(),
        [0, 1, 2]
    );

    // types follow the most recent type line, across block boundaries too:
    // the last block has no type line and inherits מעבדה
    assert_eq!(courses[0].lectures[0].kind, "הרצאה");
    assert_eq!(courses[0].lectures[2].kind, "תרגול");
    assert_eq!(courses[1].lectures[1].kind, "מעבדה");
    assert_eq!(courses[2].lectures[0].kind, "מעבדה");

    let days: Vec<&str> = courses[0]
        .lectures
        .iter()
        .map(|l| l.day.as_str())
        .collect();
    assert_eq!(days, ["Sunday", "Monday", "Tuesday"]);
}

#[test]
fn test_all_lectures_share_the_anchor_date() {
    let courses = ScheduleParser::with_anchor(anchor()).parse(EXPORT).unwrap();

    for course in &courses {
        for lecture in &course.lectures {
            assert_eq!(lecture.start_date.date(), anchor());
        }
    }

    // the only overnight range ends the day after the anchor
    let night = &courses[2].lectures[0];
    assert_eq!(night.end_date.date(), anchor().succ_opt().unwrap());
    assert!(night.end_date > night.start_date);
}

#[test]
fn test_lecture_wire_format() {
    let courses = ScheduleParser::with_anchor(anchor()).parse(EXPORT).unwrap();
    let json = serde_json::to_value(&courses[0].lectures[0]).unwrap();

    assert_eq!(json["title"], "מבוא למערכות מידע");
    assert_eq!(json["startDate"], "2025-03-02T09:00:00");
    assert_eq!(json["endDate"], "2025-03-02T11:00:00");
    assert_eq!(json["type"], "הרצאה");
    assert_eq!(json["day"], "Sunday");
    assert_eq!(json["lecturer"], "Smith");
    assert_eq!(json["location"], "Room101");
    assert_eq!(json["id"], 0);
}

#[test]
fn test_flattened_events_keep_source_order() {
    let courses = ScheduleParser::with_anchor(anchor()).parse(EXPORT).unwrap();
    let events = formatter::flatten_events(&courses);

    assert_eq!(events.len(), 6);
    assert_eq!(
        events.iter().map(|e| e.id).collect::<Vec<_>>(),
        [0, 1, 2, 3, 4, 5]
    );
    assert_eq!(events[5].title, "סדנת לילה");
    assert_eq!(events[5].kind.as_deref(), Some("מעבדה"));
}
