use crate::domain::model::{Certificate, OutputMode, Recipient};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// File names (not paths) with the given extension, sorted.
    fn list_files(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    /// Where a relative path ends up, for log messages.
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn template_path(&self) -> &str;
    fn names_path(&self) -> &str;
    fn sheet(&self) -> Option<&str>;
    fn placeholders(&self) -> &[String];
    fn output_mode(&self) -> OutputMode;
    fn out_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn concurrency(&self) -> usize;
    fn write_manifest(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Recipient>>;
    async fn transform(&self, recipients: Vec<Recipient>) -> Result<Vec<Certificate>>;
    async fn load(&self, certificates: Vec<Certificate>) -> Result<String>;
}
