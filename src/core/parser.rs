use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::domain::model::{Course, Lecture};
use crate::utils::error::{EtlError, Result};

/// Fixed day-token table, Sunday through Friday.
const DAY_TABLE: [(char, &str); 6] = [
    ('א', "Sunday"),
    ('ב', "Monday"),
    ('ג', "Tuesday"),
    ('ד', "Wednesday"),
    ('ה', "Thursday"),
    ('ו', "Friday"),
];

/// Maps a single-character day token to its canonical weekday name.
pub fn weekday_name(token: &str) -> Option<&'static str> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    DAY_TABLE
        .iter()
        .find(|(t, _)| *t == first)
        .map(|(_, name)| *name)
}

/// Session kind declared by a type line, applying to subsequent rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    Lecture,
    Exercise,
    Lab,
}

impl SessionType {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "הרצאה" => Some(Self::Lecture),
            "תרגול" => Some(Self::Exercise),
            "מעבדה" => Some(Self::Lab),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Lecture => "הרצאה",
            Self::Exercise => "תרגול",
            Self::Lab => "מעבדה",
        }
    }

    /// The label stored on lectures: the token, lowercased.
    pub fn label(&self) -> String {
        self.token().to_lowercase()
    }
}

/// Classification of one trimmed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Blank,
    Header { title: &'a str },
    TypeDecl(SessionType),
    DataRow(&'a str),
    Stray,
}

fn is_header(line: &str) -> bool {
    line.starts_with('(')
}

fn is_data_row(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| ('א'..='ת').contains(&c))
}

/// Course title: everything before the first colon, leading paren removed.
fn header_title(line: &str) -> &str {
    let stripped = line.strip_prefix('(').unwrap_or(line);
    stripped.split(':').next().unwrap_or(stripped).trim()
}

/// Classifies a line, in precedence order: blank, header, type
/// declaration, data row. Anything else is stray and skipped.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        LineKind::Blank
    } else if is_header(line) {
        LineKind::Header {
            title: header_title(line),
        }
    } else if let Some(kind) = SessionType::from_token(line) {
        LineKind::TypeDecl(kind)
    } else if is_data_row(line) {
        LineKind::DataRow(line)
    } else {
        LineKind::Stray
    }
}

/// Accumulator threaded over the line fold.
///
/// A new header does not reset `current_type`; a block that omits its own
/// type line inherits the previous block's.
#[derive(Debug, Default, Clone, Copy)]
struct ParserState {
    current_course: Option<usize>,
    current_type: Option<SessionType>,
}

/// Parses raw schedule text into courses.
///
/// All timestamps within one parse share a single anchor date, captured
/// when the parser is constructed.
#[derive(Debug, Clone)]
pub struct ScheduleParser {
    anchor: NaiveDate,
}

impl ScheduleParser {
    pub fn new() -> Self {
        Self {
            anchor: Local::now().date_naive(),
        }
    }

    pub fn with_anchor(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn parse(&self, input: &str) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = Vec::new();
        let mut state = ParserState::default();

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            match classify_line(raw.trim()) {
                LineKind::Blank | LineKind::Stray => {}
                LineKind::Header { title } => {
                    courses.push(Course {
                        title: title.to_string(),
                        id: courses.len(),
                        lectures: Vec::new(),
                    });
                    state.current_course = Some(courses.len() - 1);
                }
                LineKind::TypeDecl(kind) => state.current_type = Some(kind),
                LineKind::DataRow(row) => {
                    let course_idx =
                        state
                            .current_course
                            .ok_or_else(|| EtlError::MalformedRowError {
                                line: row.to_string(),
                                line_no,
                                reason: "data row before any course header".to_string(),
                            })?;
                    let kind = state
                        .current_type
                        .ok_or_else(|| EtlError::MalformedRowError {
                            line: row.to_string(),
                            line_no,
                            reason: "data row before any session type line".to_string(),
                        })?;
                    let lecture = self.build_lecture(row, line_no, &courses[course_idx], kind)?;
                    courses[course_idx].lectures.push(lecture);
                }
            }
        }

        Ok(courses)
    }

    fn build_lecture(
        &self,
        row: &str,
        line_no: usize,
        course: &Course,
        kind: SessionType,
    ) -> Result<Lecture> {
        let fields: Vec<&str> = row.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(EtlError::MalformedRowError {
                line: row.to_string(),
                line_no,
                reason: format!("expected 5 fields, found {}", fields.len()),
            });
        }

        let (day_token, start, end, lecturer, location) =
            (fields[0], fields[1], fields[2], fields[3], fields[4]);

        let day = weekday_name(day_token).ok_or_else(|| EtlError::UnknownDayTokenError {
            token: day_token.to_string(),
            line: row.to_string(),
            line_no,
        })?;

        let start_time = parse_time(start, line_no)?;
        let end_time = parse_time(end, line_no)?;

        let start_date = self.anchor.and_time(start_time);
        let mut end_date = self.anchor.and_time(end_time);
        // a range ending past midnight rolls the end date forward one day
        if end_time < start_time {
            end_date += Duration::days(1);
        }

        Ok(Lecture {
            title: course.title.clone(),
            start_date,
            end_date,
            id: course.lectures.len(),
            location: location.to_string(),
            lecturer: lecturer.to_string(),
            kind: kind.label(),
            day: day.to_string(),
        })
    }
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_time(value: &str, line_no: usize) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|source| EtlError::TimeFormatError {
        value: value.to_string(),
        line_no,
        source,
    })
}
