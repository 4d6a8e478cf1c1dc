use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting schedule ETL process");

        tracing::info!("Extracting source data...");
        let source = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        tracing::info!("Transforming schedule...");
        let result = self.pipeline.transform(source).await?;
        tracing::info!(
            "Transformed {} courses into {} events",
            result.courses.len(),
            result.events.len()
        );
        self.monitor.log_stats("Transform");

        tracing::info!("Loading outputs...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
