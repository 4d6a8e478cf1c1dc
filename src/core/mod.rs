pub mod csv_convert;
pub mod etl;
pub mod formatter;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{
    CalendarEvent, Course, CsvScheduleRow, Lecture, ScheduleSource, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
