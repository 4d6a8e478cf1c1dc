use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::domain::model::{CalendarEvent, CsvScheduleRow};
use crate::utils::error::{EtlError, Result};

/// Remaps tabular schedule rows into calendar events.
///
/// Rows have no date of their own; each row is placed one day after the
/// previous one, starting at the base date.
#[derive(Debug, Clone)]
pub struct CsvConverter {
    base_date: NaiveDate,
}

impl CsvConverter {
    pub fn new() -> Self {
        Self {
            base_date: Local::now().date_naive(),
        }
    }

    pub fn with_base_date(base_date: NaiveDate) -> Self {
        Self { base_date }
    }

    pub fn convert(&self, csv_text: &str) -> Result<Vec<CalendarEvent>> {
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let mut events = Vec::new();

        for (idx, row) in reader.deserialize::<CsvScheduleRow>().enumerate() {
            let row = row?;
            // data line number: header row is line 1
            let line_no = idx + 2;
            let (start, end) = split_time_range(&row.time, line_no)?;
            let date = self.base_date + Duration::days(idx as i64);

            events.push(CalendarEvent {
                title: format!("{} - {}", row.course_name, row.course_type),
                start_date: date.and_time(start),
                end_date: date.and_time(end),
                id: idx,
                location: format!("Room {}", row.course_class_number),
                lecturer: Some(row.lecturer_name),
                kind: Some(row.course_type),
                day: Some(row.day),
            });
        }

        Ok(events)
    }
}

impl Default for CsvConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn split_time_range(value: &str, line_no: usize) -> Result<(NaiveTime, NaiveTime)> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| EtlError::MalformedRowError {
            line: value.to_string(),
            line_no,
            reason: "time range must be HH:MM-HH:MM".to_string(),
        })?;

    Ok((
        parse_time(start.trim(), line_no)?,
        parse_time(end.trim(), line_no)?,
    ))
}

fn parse_time(value: &str, line_no: usize) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|source| EtlError::TimeFormatError {
        value: value.to_string(),
        line_no,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "course_number,course_name,course_type,lecturer_name,course_class_number,day,time\n";

    fn converter() -> CsvConverter {
        CsvConverter::with_base_date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    #[test]
    fn test_convert_remaps_fields() {
        let csv_text = format!(
            "{}{}",
            HEADER, "10016,מבוא לתכנות,הרצאה,Dr. Levi,305,Sunday,10:00-12:00\n"
        );
        let events = converter().convert(&csv_text).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.title, "מבוא לתכנות - הרצאה");
        assert_eq!(event.location, "Room 305");
        assert_eq!(event.id, 0);
        assert_eq!(event.lecturer.as_deref(), Some("Dr. Levi"));
        assert_eq!(event.day.as_deref(), Some("Sunday"));
        assert_eq!(
            event.start_date,
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_rows_advance_one_day_each() {
        let csv_text = format!(
            "{}{}{}",
            HEADER,
            "1,A,הרצאה,X,1,Sunday,08:00-09:00\n",
            "2,B,תרגול,Y,2,Monday,08:00-09:00\n"
        );
        let events = converter().convert(&csv_text).unwrap();
        assert_eq!(events[0].start_date.date(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(events[1].start_date.date(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
        assert_eq!(events[1].id, 1);
    }

    #[test]
    fn test_missing_dash_is_malformed() {
        let csv_text = format!("{}{}", HEADER, "1,A,הרצאה,X,1,Sunday,08:00 09:00\n");
        assert!(matches!(
            converter().convert(&csv_text).unwrap_err(),
            EtlError::MalformedRowError { .. }
        ));
    }

    #[test]
    fn test_bad_time_half_is_time_format_error() {
        let csv_text = format!("{}{}", HEADER, "1,A,הרצאה,X,1,Sunday,08:00-late\n");
        match converter().convert(&csv_text).unwrap_err() {
            EtlError::TimeFormatError { value, line_no, .. } => {
                assert_eq!(value, "late");
                assert_eq!(line_no, 2);
            }
            other => panic!("expected TimeFormatError, got {:?}", other),
        }
    }
}
