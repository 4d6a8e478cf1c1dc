use std::io::Write;

use reqwest::Client;
use zip::write::{FileOptions, ZipWriter};

use crate::core::csv_convert::CsvConverter;
use crate::core::formatter;
use crate::core::parser::ScheduleParser;
use crate::core::{ConfigProvider, Pipeline, ScheduleSource, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};

pub struct SchedulePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> SchedulePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SchedulePipeline<S, C> {
    async fn extract(&self) -> Result<ScheduleSource> {
        if let Some(csv_file) = self.config.csv_file() {
            tracing::debug!("Reading CSV export: {}", csv_file);
            let bytes = self.storage.read_file(csv_file).await?;
            return Ok(ScheduleSource::Csv(decode_utf8(bytes)?));
        }

        if let Some(endpoint) = self.config.endpoint() {
            tracing::debug!("Fetching schedule text from: {}", endpoint);
            let response = self.client.get(endpoint).send().await?;
            tracing::debug!("Response status: {}", response.status());
            let text = response.error_for_status()?.text().await?;
            return Ok(ScheduleSource::Text(text));
        }

        let path =
            self.config
                .schedule_file()
                .ok_or_else(|| EtlError::MissingConfigError {
                    field: "schedule_file".to_string(),
                })?;
        tracing::debug!("Reading schedule text: {}", path);
        let bytes = self.storage.read_file(path).await?;
        Ok(ScheduleSource::Text(decode_utf8(bytes)?))
    }

    async fn transform(&self, source: ScheduleSource) -> Result<TransformResult> {
        let (courses, events) = match source {
            ScheduleSource::Text(text) => {
                // anchor date is captured here, once per run
                let parser = ScheduleParser::new();
                let courses = parser.parse(&text)?;
                let events = formatter::flatten_events(&courses);
                (courses, events)
            }
            ScheduleSource::Csv(csv_text) => {
                let events = CsvConverter::new().convert(&csv_text)?;
                (Vec::new(), events)
            }
        };

        let events_json = formatter::events_json(&events)?;
        let appointments_js = formatter::appointments_module(&events);

        Ok(TransformResult {
            courses,
            events,
            events_json,
            appointments_js,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();

        self.storage
            .write_file(
                &format!("{}/events.json", output_path),
                result.events_json.as_bytes(),
            )
            .await?;
        self.storage
            .write_file(
                &format!("{}/appointments.js", output_path),
                result.appointments_js.as_bytes(),
            )
            .await?;

        if self.config.bundle_outputs() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                zip.start_file::<_, ()>("events.json", FileOptions::default())?;
                zip.write_all(result.events_json.as_bytes())?;

                zip.start_file::<_, ()>("appointments.js", FileOptions::default())?;
                zip.write_all(result.appointments_js.as_bytes())?;

                if !result.courses.is_empty() {
                    zip.start_file::<_, ()>("courses.json", FileOptions::default())?;
                    let json = serde_json::to_string_pretty(&result.courses)?;
                    zip.write_all(json.as_bytes())?;
                }

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
            self.storage
                .write_file(&format!("{}/schedule_output.zip", output_path), &zip_data)
                .await?;
        }

        Ok(output_path.to_string())
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        EtlError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
