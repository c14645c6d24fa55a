use crate::adapters::docx::{merge_documents, DocxTemplate, Placeholders, RenderedDocument};
use crate::adapters::spreadsheet::{self, SourceFormat};
use crate::core::{Certificate, ConfigProvider, Pipeline, Recipient, Storage};
use crate::declension::{self, FullName};
use crate::domain::model::{Manifest, OutputMode};
use crate::utils::error::{MedalError, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Reads names, declines them and renders one certificate per name.
pub struct MedalPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MedalPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn render_all(
        &self,
        template: Arc<DocxTemplate>,
        certificates: &[Certificate],
    ) -> Result<Vec<RenderedDocument>> {
        let placeholders = Placeholders::compile(self.config.placeholders())?;
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency().max(1)));
        let mut tasks = JoinSet::new();

        for (slot, certificate) in certificates.iter().enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| MedalError::processing(e.to_string()))?;
            let template = Arc::clone(&template);
            let replacements = placeholders.with_value(certificate.declined.dative.clone());

            tasks.spawn_blocking(move || {
                let _permit = permit;
                template.render(&replacements).map(|doc| (slot, doc))
            });
        }

        let mut rendered: Vec<Option<RenderedDocument>> = (0..certificates.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (slot, document) = joined??;
            rendered[slot] = Some(document);
        }

        Ok(rendered.into_iter().flatten().collect())
    }

    async fn write_merged(&self, documents: Vec<Vec<u8>>) -> Result<String> {
        let merged = tokio::task::spawn_blocking(move || merge_documents(&documents)).await??;

        let output = self.config.output_file();
        if let Some(parent) = Path::new(output).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(output, &merged).await?;
        tracing::debug!("Merged document written ({} bytes)", merged.len());
        Ok(output.to_string())
    }

    /// Merges every `.docx` already in the output directory, by file name.
    pub async fn merge_existing(&self) -> Result<String> {
        let files = self.storage.list_files("docx").await?;
        if files.is_empty() {
            return Err(MedalError::processing(format!(
                "No .docx files found in directory: {}",
                self.config.out_dir()
            )));
        }

        tracing::info!("Merging {} documents from {}", files.len(), self.config.out_dir());
        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            documents.push(self.storage.read_file(file).await?);
        }
        self.write_merged(documents).await
    }
}

/// `{index:03}_{label}.docx`, label being the surname, else the given name,
/// else the index.
pub fn certificate_file_name(index: usize, name: &FullName) -> String {
    let label = match name.label() {
        Some(label) => sanitize_file_label(label),
        None => index.to_string(),
    };
    format!("{:03}_{}.docx", index, label)
}

fn sanitize_file_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MedalPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Recipient>> {
        let path = self.config.names_path();
        let format = SourceFormat::from_path(path)?;

        tracing::debug!("Reading names from: {}", path);
        let bytes = tokio::fs::read(path).await?;
        let names = spreadsheet::read_names(format, &bytes, self.config.sheet())?;

        if names.is_empty() {
            return Err(MedalError::processing(format!("No names found in {}", path)));
        }

        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, nominative)| Recipient {
                index: i + 1,
                nominative,
            })
            .collect())
    }

    async fn transform(&self, recipients: Vec<Recipient>) -> Result<Vec<Certificate>> {
        let mut certificates = Vec::with_capacity(recipients.len());

        for recipient in recipients {
            let declined = declension::decline(&recipient.nominative);

            if declined.nominative.discarded > 0 {
                tracing::warn!(
                    "Row {}: '{}' has {} extra word(s) after the patronymic; they are left out",
                    recipient.index,
                    recipient.nominative,
                    declined.nominative.discarded
                );
            }
            tracing::debug!(
                "{} -> {} ({})",
                recipient.nominative,
                declined.dative,
                declined.gender
            );

            let file_name = certificate_file_name(recipient.index, &declined.nominative);
            certificates.push(Certificate {
                recipient,
                declined,
                file_name,
            });
        }

        Ok(certificates)
    }

    async fn load(&self, certificates: Vec<Certificate>) -> Result<String> {
        let template_path = self.config.template_path();
        tracing::debug!("Loading template: {}", template_path);
        let template_bytes = tokio::fs::read(template_path).await?;
        let template = Arc::new(DocxTemplate::from_bytes(&template_bytes)?);

        let rendered = self.render_all(template, &certificates).await?;

        if rendered.iter().all(|doc| doc.paragraphs_changed == 0) {
            tracing::warn!(
                "None of the placeholders [{}] was found in {}",
                self.config.placeholders().join(", "),
                template_path
            );
        }

        for (certificate, document) in certificates.iter().zip(&rendered) {
            self.storage
                .write_file(&certificate.file_name, &document.bytes)
                .await?;
        }
        tracing::info!(
            "Wrote {} certificate(s) to {}",
            rendered.len(),
            self.storage.location("")
        );

        if self.config.write_manifest() {
            let manifest = Manifest::new(template_path, self.config.names_path(), &certificates);
            let json = serde_json::to_string_pretty(&manifest)?;
            self.storage.write_file(MANIFEST_FILE, json.as_bytes()).await?;
        }

        match self.config.output_mode() {
            OutputMode::Separate => Ok(self.config.out_dir().to_string()),
            OutputMode::Single => {
                let documents = rendered.into_iter().map(|doc| doc.bytes).collect();
                self.write_merged(documents).await
            }
        }
    }
}
