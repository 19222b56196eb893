pub mod line;

pub use line::LineNotifier;

use crate::model::NotifyError;

#[async_trait::async_trait]
pub trait Notify: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}
