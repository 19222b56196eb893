use crate::model::FetchError;

#[async_trait::async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
