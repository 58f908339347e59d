//! Conversation analyzer: one report per conversation, built from one or more model calls.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{analysis_messages, ANALYST_SYSTEM_PROMPT};
use tracing::{info, instrument, warn};

use crate::error::AnalysisFailure;
use crate::policy::AnalysisPolicy;
use crate::segment::split_segments;

/// Analyzes aggregated conversation text through an [`LlmClient`].
#[derive(Clone)]
pub struct ConversationAnalyzer {
    llm: Arc<dyn LlmClient>,
    policy: AnalysisPolicy,
}

impl ConversationAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, policy: AnalysisPolicy) -> Self {
        Self {
            llm,
            policy,
        }
    }

    /// Returns the model's report for `text`, verbatim when the text fits in one call.
    ///
    /// Oversized text is split; the per-part reports are joined under `## Part i of n` headings
    /// with a trailing note naming any failed parts. Fails only when every part fails.
    #[instrument(skip(self, text), fields(conversation = %title, chars = text.len()))]
    pub async fn analyze(&self, title: &str, text: &str) -> Result<String, AnalysisFailure> {
        let segments = split_segments(
            text,
            self.policy.segment_max_chars,
            self.policy.segment_overlap_chars,
        );

        if segments.len() == 1 {
            let messages = analysis_messages(ANALYST_SYSTEM_PROMPT, text, None);
            return self
                .call_with_retry(messages)
                .await
                .map_err(|cause| self.failure(title, cause));
        }

        let total = segments.len();
        info!(parts = total, "step: conversation split into parts");

        let mut reports: Vec<(usize, String)> = Vec::with_capacity(total);
        let mut failed: Vec<usize> = Vec::new();
        let mut last_cause = String::new();
        for (index, segment) in segments.iter().enumerate() {
            let part = index + 1;
            let messages = analysis_messages(ANALYST_SYSTEM_PROMPT, segment, Some((part, total)));
            match self.call_with_retry(messages).await {
                Ok(report) => reports.push((part, report)),
                Err(cause) => {
                    warn!(part = part, total = total, cause = %cause, "Part analysis failed");
                    failed.push(part);
                    last_cause = cause;
                }
            }
        }

        if reports.is_empty() {
            return Err(self.failure(
                title,
                format!("all {} parts failed; last error: {}", total, last_cause),
            ));
        }

        Ok(join_parts(&reports, &failed, total))
    }

    fn failure(&self, title: &str, cause: String) -> AnalysisFailure {
        warn!(conversation = %title, cause = %cause, "Analysis failed");
        AnalysisFailure::new(title, cause)
    }

    async fn call_with_retry(&self, messages: Vec<prompt::ChatMessage>) -> Result<String, String> {
        let mut attempt = 0u32;
        loop {
            match self.call_once(messages.clone()).await {
                Ok(report) => return Ok(report),
                Err(cause) if attempt < self.policy.max_retries => {
                    attempt += 1;
                    let delay = self.policy.backoff_delay(attempt);
                    warn!(
                        attempt = attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        cause = %cause,
                        "Analysis call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(cause) => return Err(cause),
            }
        }
    }

    async fn call_once(&self, messages: Vec<prompt::ChatMessage>) -> Result<String, String> {
        let reply = tokio::time::timeout(
            self.policy.timeout,
            self.llm.get_llm_response_with_messages(messages),
        )
        .await;
        match reply {
            Err(_) => Err(format!("timed out after {}s", self.policy.timeout.as_secs())),
            Ok(Err(e)) => Err(format!("{:#}", e)),
            Ok(Ok(content)) if content.trim().is_empty() => {
                Err("empty response content".to_string())
            }
            Ok(Ok(content)) => Ok(content),
        }
    }
}

fn join_parts(reports: &[(usize, String)], failed: &[usize], total: usize) -> String {
    let mut out = reports
        .iter()
        .map(|(part, report)| format!("## Part {} of {}\n\n{}", part, total, report.trim_end()))
        .collect::<Vec<_>>()
        .join("\n\n");
    if !failed.is_empty() {
        let parts = failed
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "\n\nNote: part(s) {} of {} could not be analyzed.",
            parts, total
        ));
    }
    out
}
