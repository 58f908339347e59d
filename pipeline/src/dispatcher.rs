//! Report Dispatcher: writes artifacts and pushes reports and notices to requesters.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use analysis::AnalysisFailure;
use digest_core::{Bot, Chat};
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, instrument};

use crate::artifacts::ArtifactStore;
use crate::error::ConversationError;
use crate::notices;

#[derive(Clone)]
pub struct ReportDispatcher {
    bot: Arc<dyn Bot>,
    artifacts: Arc<ArtifactStore>,
}

impl ReportDispatcher {
    pub fn new(bot: Arc<dyn Bot>, artifacts: Arc<ArtifactStore>) -> Self {
        Self { bot, artifacts }
    }

    /// Exclusive access to one conversation's artifact pair for a whole write-analyze-deliver cycle.
    pub async fn lock_conversation(&self, title: &str) -> OwnedMutexGuard<()> {
        self.artifacts.lock(title).await
    }

    /// Writes the raw input, awaits `analysis`, then writes the report. Returns the report path.
    ///
    /// The raw file is kept even when the analysis fails.
    #[instrument(skip(self, raw, analysis), fields(conversation = %title))]
    pub async fn write_artifact<F>(
        &self,
        title: &str,
        raw: &str,
        analysis: F,
    ) -> Result<PathBuf, ConversationError>
    where
        F: Future<Output = Result<String, AnalysisFailure>>,
    {
        self.artifacts.write_raw(title, raw).await?;
        let report = analysis.await?;
        let path = self.artifacts.write_analysis(title, &report).await?;
        Ok(path)
    }

    /// Sends the report file to `destination`. Not retried.
    #[instrument(skip(self, destination, artifact), fields(requester = destination.id))]
    pub async fn deliver(
        &self,
        destination: &Chat,
        artifact: &Path,
    ) -> Result<(), ConversationError> {
        match self.bot.send_document(destination, artifact).await {
            Ok(()) => {
                info!(path = %artifact.display(), "Report delivered");
                Ok(())
            }
            Err(e) => {
                error!(path = %artifact.display(), error = %e, "Report delivery failed");
                Err(ConversationError::Delivery(e))
            }
        }
    }

    pub async fn notify_failure(&self, destination: &Chat, title: &str) {
        self.notify(destination, &notices::conversation_failed(title)).await;
    }

    pub async fn send_summary(&self, destination: &Chat) {
        self.notify(destination, notices::RUN_SUMMARY).await;
    }

    /// Sends a text notice; failures are logged and swallowed.
    pub async fn notify(&self, destination: &Chat, text: &str) {
        if let Err(e) = self.bot.send_message(destination, text).await {
            error!(requester = destination.id, error = %e, "Failed to send notice");
        }
    }
}
