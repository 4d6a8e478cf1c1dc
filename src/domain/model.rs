use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One course block from the schedule text, in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub id: usize,
    pub lectures: Vec<Lecture>,
}

/// One scheduled occurrence belonging to exactly one course.
///
/// Timestamps are local wall-clock, anchored to the parse invocation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    pub title: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDateTime,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDateTime,
    pub id: usize,
    pub location: String,
    pub lecturer: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub day: String,
}

/// Calendar-event record handed to downstream renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDateTime,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDateTime,
    pub id: usize,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

/// One row of the tabular schedule export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvScheduleRow {
    pub course_number: String,
    pub course_name: String,
    pub course_type: String,
    pub lecturer_name: String,
    pub course_class_number: String,
    pub day: String,
    pub time: String,
}

/// Raw input handed from extract to transform.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleSource {
    Text(String),
    Csv(String),
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub courses: Vec<Course>,
    pub events: Vec<CalendarEvent>,
    pub events_json: String,
    pub appointments_js: String,
}
