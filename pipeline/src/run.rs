//! One Processing run: query the window, aggregate, then analyze and deliver each conversation.

use std::sync::Arc;

use analysis::ConversationAnalyzer;
use digest_core::{Chat, Window};
use storage::MessageStore;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::aggregator::{aggregate, ConversationWindow, GroupBy};
use crate::dispatcher::ReportDispatcher;
use crate::error::{ConversationError, RunError};
use crate::notices;

/// Outcome of a completed run. Failed conversations were already reported to the requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub window: Window,
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

impl RunReport {
    pub fn conversations(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Shared entry point for interactive requests and the sweep.
pub struct Pipeline {
    store: Arc<dyn MessageStore>,
    analyzer: ConversationAnalyzer,
    dispatcher: ReportDispatcher,
    group_by: GroupBy,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn MessageStore>,
        analyzer: ConversationAnalyzer,
        dispatcher: ReportDispatcher,
        group_by: GroupBy,
    ) -> Self {
        Self {
            store,
            analyzer,
            dispatcher,
            group_by,
        }
    }

    /// Runs the pipeline for `requester` over `window`.
    ///
    /// Conversations are processed one after another; a conversation's failure is reported and
    /// skipped. The summary notice is sent after every run that got past the query. A query
    /// failure is reported and aborts the run.
    #[instrument(skip(self, requester), fields(requester = requester.id, window = %window))]
    pub async fn run(&self, requester: &Chat, window: Window) -> Result<RunReport, RunError> {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, "step: run started");

        let rows = match self.store.query_by_window(window.day_count()).await {
            Ok(rows) => rows,
            Err(e) => {
                error!(run_id = %run_id, error = %e, "step: query failed, aborting run");
                self.dispatcher.notify(requester, notices::QUERY_FAILED).await;
                return Err(RunError::Persistence(e));
            }
        };

        let conversations = ConversationWindow::from_groups(aggregate(&rows, self.group_by));
        info!(
            run_id = %run_id,
            rows = rows.len(),
            conversations = conversations.len(),
            "step: window aggregated"
        );

        let mut report = RunReport {
            run_id,
            window,
            delivered: Vec::new(),
            failed: Vec::new(),
        };

        for conversation in &conversations {
            match self.process(requester, conversation).await {
                Ok(()) => report.delivered.push(conversation.title.clone()),
                Err(e) => {
                    warn!(
                        run_id = %run_id,
                        conversation = %conversation.title,
                        error = %e,
                        "step: conversation skipped"
                    );
                    self.dispatcher
                        .notify_failure(requester, &conversation.title)
                        .await;
                    report.failed.push(conversation.title.clone());
                }
            }
        }

        self.dispatcher.send_summary(requester).await;
        info!(
            run_id = %run_id,
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "step: run finished"
        );
        Ok(report)
    }

    async fn process(
        &self,
        requester: &Chat,
        conversation: &ConversationWindow,
    ) -> Result<(), ConversationError> {
        let title = conversation.title.as_str();
        let raw = conversation.text();
        let _guard = self.dispatcher.lock_conversation(title).await;

        let path = self
            .dispatcher
            .write_artifact(title, &raw, self.analyzer.analyze(title, &raw))
            .await?;
        self.dispatcher.deliver(requester, &path).await
    }
}
