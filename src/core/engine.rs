use crate::core::{Certificate, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline phase by phase, logging progress and resource usage.
pub struct MedalEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MedalEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting certificate run");
        if self.monitor.is_enabled() {
            self.monitor.log_stats("Start");
        }

        tracing::info!("📥 Reading names...");
        let recipients = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} names", recipients.len());
        self.monitor.log_stats("Extract");

        tracing::info!("🔄 Declining names...");
        let certificates = self.pipeline.transform(recipients).await?;
        tracing::info!("🔄 Declined {} names", certificates.len());
        self.monitor.log_stats("Transform");

        tracing::info!("📝 Rendering certificates...");
        let output_path = self.pipeline.load(certificates).await?;
        tracing::info!("📁 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }

    /// Extract and transform only; nothing is written.
    pub async fn preview(&self) -> Result<Vec<Certificate>> {
        let recipients = self.pipeline.extract().await?;
        let certificates = self.pipeline.transform(recipients).await?;
        self.monitor.log_final_stats();
        Ok(certificates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Recipient;
    use crate::declension;
    use std::sync::Mutex;

    struct FakePipeline {
        names: Vec<&'static str>,
        loaded: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl Pipeline for FakePipeline {
        async fn extract(&self) -> Result<Vec<Recipient>> {
            Ok(self
                .names
                .iter()
                .enumerate()
                .map(|(i, n)| Recipient {
                    index: i + 1,
                    nominative: n.to_string(),
                })
                .collect())
        }

        async fn transform(&self, recipients: Vec<Recipient>) -> Result<Vec<Certificate>> {
            Ok(recipients
                .into_iter()
                .map(|recipient| Certificate {
                    declined: declension::decline(&recipient.nominative),
                    file_name: format!("{:03}.docx", recipient.index),
                    recipient,
                })
                .collect())
        }

        async fn load(&self, certificates: Vec<Certificate>) -> Result<String> {
            let mut loaded = self.loaded.lock().unwrap();
            loaded.extend(certificates.into_iter().map(|c| c.declined.dative));
            Ok("out".to_string())
        }
    }

    fn fake(names: Vec<&'static str>) -> FakePipeline {
        FakePipeline {
            names,
            loaded: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_run_passes_every_phase() {
        let engine = MedalEngine::new(fake(vec!["Гуров Денис Сергійович", "Олександр"]));

        let output = engine.run().await.unwrap();

        assert_eq!(output, "out");
        assert_eq!(
            *engine.pipeline().loaded.lock().unwrap(),
            vec!["Гурову Денису Сергійовичу", "Олександрові"]
        );
    }

    #[tokio::test]
    async fn test_preview_does_not_load() {
        let engine = MedalEngine::new_with_monitoring(fake(vec!["Бойко Марія Іванівна"]), true);

        let certificates = engine.preview().await.unwrap();

        assert_eq!(certificates.len(), 1);
        assert_eq!(certificates[0].declined.dative, "Бойку Марії Іванівні");
        assert!(engine.pipeline().loaded.lock().unwrap().is_empty());
    }
}
