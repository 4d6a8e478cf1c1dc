use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::domain::model::{CalendarEvent, Course};
use crate::utils::error::Result;

/// Flattens parsed courses into one event per lecture, ids sequential
/// across the whole output.
pub fn flatten_events(courses: &[Course]) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    for course in courses {
        for lecture in &course.lectures {
            events.push(CalendarEvent {
                title: lecture.title.clone(),
                start_date: lecture.start_date,
                end_date: lecture.end_date,
                id: events.len(),
                location: lecture.location.clone(),
                lecturer: Some(lecture.lecturer.clone()),
                kind: Some(lecture.kind.clone()),
                day: Some(lecture.day.clone()),
            });
        }
    }
    events
}

pub fn events_json(events: &[CalendarEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Renders the `appointments` module consumed by the scheduler frontend.
pub fn appointments_module(events: &[CalendarEvent]) -> String {
    let mut js = String::from("export const appointments = [\n");
    for event in events {
        js.push_str("  {\n");
        js.push_str(&format!("    title: \"{}\",\n", escape_js(&event.title)));
        js.push_str(&format!(
            "    startDate: {},\n",
            js_date(&event.start_date)
        ));
        js.push_str(&format!("    endDate: {},\n", js_date(&event.end_date)));
        js.push_str(&format!("    id: {},\n", event.id));
        js.push_str(&format!(
            "    location: \"{}\"\n",
            escape_js(&event.location)
        ));
        js.push_str("  },\n");
    }
    js.push_str("];\n");
    js
}

// JS Date months are zero-based; minutes carry no leading zero ("00" prints
// as 0), which is what the scheduler expects.
fn js_date(ts: &NaiveDateTime) -> String {
    format!(
        "new Date({}, {}, {}, {}, {})",
        ts.year(),
        ts.month0(),
        ts.day(),
        ts.hour(),
        ts.minute()
    )
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
