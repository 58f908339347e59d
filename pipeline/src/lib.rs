//! # pipeline
//!
//! The aggregate → analyze → deliver pipeline and the three entry points that feed it.
//!
//! - [`aggregate`]: groups window rows into conversations.
//! - [`ArtifactStore`] / [`ReportDispatcher`]: artifact files and delivery to the requester.
//! - [`Pipeline::run`]: one run for one requester and window.
//! - [`run_sweep`] / [`SweepSchedule`]: the daily administrator sweep.
//! - [`SessionRegistry`] / [`TriggerSurface`]: the interactive window menu.

mod aggregator;
mod artifacts;
mod dispatcher;
mod error;
pub mod notices;
mod run;
mod schedule;
mod session;
mod sweep;
mod trigger;

pub use aggregator::{aggregate, ConversationWindow, GroupBy};
pub use artifacts::{safe_file_stem, ArtifactStore, ANALYSIS_SUFFIX, RAW_SUFFIX};
pub use dispatcher::ReportDispatcher;
pub use error::{ConversationError, RunError, StorageError};
pub use run::{Pipeline, RunReport};
pub use schedule::{run_daily, SweepSchedule};
pub use session::{SessionRegistry, SessionState};
pub use sweep::{run_sweep, SweepOutcome, SWEEP_WINDOW};
pub use trigger::TriggerSurface;
