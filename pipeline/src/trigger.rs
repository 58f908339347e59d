//! Trigger Surface: the interactive window menu and its selections.

use std::sync::Arc;

use async_trait::async_trait;
use digest_core::{Bot, Chat, DigestError, HandlerError, SelectionHandler, User, WindowChoice};
use tracing::{info, instrument, warn};

use crate::notices;
use crate::run::Pipeline;
use crate::session::SessionRegistry;

/// Presents the window menu and turns selections into pipeline runs.
pub struct TriggerSurface {
    pipeline: Arc<Pipeline>,
    bot: Arc<dyn Bot>,
    sessions: SessionRegistry,
    admin_ids: Vec<i64>,
    admins_only: bool,
}

impl TriggerSurface {
    pub fn new(
        pipeline: Arc<Pipeline>,
        bot: Arc<dyn Bot>,
        admin_ids: Vec<i64>,
        admins_only: bool,
    ) -> Self {
        Self {
            pipeline,
            bot,
            sessions: SessionRegistry::new(),
            admin_ids,
            admins_only,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Whether `user_id` may use the menu.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        !self.admins_only || self.admin_ids.contains(&user_id)
    }

    /// Sends the three-choice menu to `requester`.
    #[instrument(skip(self, requester, user), fields(requester = requester.id, user_id = user.id))]
    pub async fn present_menu(&self, requester: &Chat, user: &User) -> digest_core::Result<()> {
        if !self.is_allowed(user.id) {
            warn!("Menu requested by non-administrator");
            return Err(DigestError::Handler(HandlerError::Unauthorized));
        }
        self.bot
            .send_window_menu(requester, notices::MENU_PROMPT, &WindowChoice::ALL)
            .await?;
        let state = self.sessions.await_choice(requester.id);
        info!(state = ?state, "step: window menu sent");
        Ok(())
    }
}

#[async_trait]
impl SelectionHandler for TriggerSurface {
    #[instrument(skip(self, requester, user), fields(requester = requester.id, user_id = user.id))]
    async fn on_selection(
        &self,
        requester: &Chat,
        user: &User,
        payload: &str,
    ) -> digest_core::Result<()> {
        let Some(choice) = WindowChoice::from_payload(payload) else {
            warn!(payload = %payload, "Unknown menu selection ignored");
            return Ok(());
        };
        if !self.is_allowed(user.id) {
            warn!("Menu selection by non-administrator ignored");
            return Err(DigestError::Handler(HandlerError::Unauthorized));
        }
        if !self.sessions.begin_processing(requester.id) {
            info!("Selection while a run is in progress");
            self.bot.send_message(requester, notices::ALREADY_RUNNING).await?;
            return Ok(());
        }

        let window = choice.window();
        info!(window = %window, "step: window selected");
        if let Err(e) = self
            .bot
            .send_message(requester, &notices::start_notice(window))
            .await
        {
            warn!(error = %e, "Failed to send start notice");
        }

        let result = self.pipeline.run(requester, window).await;
        self.sessions.finish(requester.id);

        match result {
            Ok(report) => info!(
                run_id = %report.run_id,
                delivered = report.delivered.len(),
                failed = report.failed.len(),
                "step: interactive run finished"
            ),
            Err(e) => warn!(error = %e, "Interactive run aborted"),
        }
        Ok(())
    }
}
