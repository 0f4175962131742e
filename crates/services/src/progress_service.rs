use std::sync::Arc;

use progress_core::GATE_REJECTED_NOTICE;
use progress_core::model::{PhaseId, ProgressSnapshot, TaskId};
use progress_core::progression;
use progress_core::rehydrate;
use storage::{Loaded, ProgressStore};
use tracing::{debug, info, warn};

use crate::error::ToggleError;
use crate::facts::FactSource;
use crate::trigger::{CompletionTrigger, FetchTicket, TriggerState};

/// Text shown while the celebratory fact is being fetched.
pub const LOADING_MESSAGE: &str = "Loading...";

//
// ─── MODAL ─────────────────────────────────────────────────────────────────────
//

/// The single message overlay the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Hidden,
    /// An out-of-order toggle was rejected.
    GateNotice,
    /// Every phase is complete and the fact is on its way.
    Loading,
    /// Every phase is complete; the fetched (or fallback) fact.
    Fact(String),
}

impl Modal {
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Modal::Hidden => None,
            Modal::GateNotice => Some(GATE_REJECTED_NOTICE),
            Modal::Loading => Some(LOADING_MESSAGE),
            Modal::Fact(text) => Some(text),
        }
    }

    /// Dismissing this modal resets all progress.
    #[must_use]
    pub fn is_completion(&self) -> bool {
        matches!(self, Modal::Loading | Modal::Fact(_))
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Owns the in-memory snapshot and wires the model, store and trigger together.
///
/// Every mutation is written through to the store. Storage failures are logged
/// and the in-memory snapshot stays authoritative.
pub struct ProgressService {
    snapshot: ProgressSnapshot,
    store: ProgressStore,
    facts: Arc<dyn FactSource>,
    trigger: CompletionTrigger,
    modal: Modal,
}

impl ProgressService {
    /// Rehydrate from the store and persist the merged snapshot.
    ///
    /// Returns a ticket if the restored progress is already complete.
    pub async fn start(
        defaults: &ProgressSnapshot,
        store: ProgressStore,
        facts: Arc<dyn FactSource>,
    ) -> (Self, Option<FetchTicket>) {
        let loaded = match store.load().await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(error = %err, key = store.key(), "could not read saved progress; starting fresh");
                Loaded::Absent
            }
        };
        if let Loaded::Malformed(reason) = &loaded {
            warn!(%reason, key = store.key(), "saved progress is not valid JSON; ignoring it");
        }

        let merged = rehydrate::merge(defaults, loaded.value());
        if merged.malformed {
            warn!(key = store.key(), "saved progress is not a list of phases; ignoring it");
        }
        debug!(
            restored = merged.restored_phases,
            discarded = merged.discarded_phases,
            completed_tasks = merged.snapshot.completed_task_count(),
            "rehydrated progress"
        );

        let mut service = Self {
            snapshot: merged.snapshot,
            store,
            facts,
            trigger: CompletionTrigger::new(),
            modal: Modal::Hidden,
        };
        service.persist().await;
        let ticket = service.observe_completion();
        (service, ticket)
    }

    #[must_use]
    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    #[must_use]
    pub fn trigger_state(&self) -> TriggerState {
        self.trigger.state()
    }

    #[must_use]
    pub fn can_toggle(&self, phase: PhaseId, task: TaskId) -> bool {
        progression::can_toggle(&self.snapshot, phase, task)
    }

    #[must_use]
    pub fn is_all_complete(&self) -> bool {
        progression::is_all_complete(&self.snapshot)
    }

    /// Toggle a task if the phase gate allows it.
    ///
    /// A gate rejection raises the notice modal and leaves state untouched.
    /// On the transition into "all complete" the loading modal is shown and a
    /// ticket is returned; redeem it with [`Self::redeem`]. Progress is frozen
    /// until the completion modal is dismissed.
    ///
    /// # Errors
    ///
    /// Returns `ToggleError::CelebrationPending` while the completion modal is
    /// up, and `ToggleError::Progression` for gate rejections and unknown ids.
    pub async fn toggle_task(
        &mut self,
        phase: PhaseId,
        task: TaskId,
    ) -> Result<Option<FetchTicket>, ToggleError> {
        if self.modal.is_completion() {
            debug!(%phase, %task, "toggle ignored until the celebration is dismissed");
            return Err(ToggleError::CelebrationPending);
        }
        if let Err(err) = progression::check_toggle(&self.snapshot, phase, task) {
            if err.is_gate_rejection() {
                info!(%phase, %task, "toggle rejected by phase gate");
                self.modal = Modal::GateNotice;
            }
            return Err(err.into());
        }

        self.snapshot = progression::toggle_task(&self.snapshot, phase, task)?;
        if self.modal == Modal::GateNotice {
            self.modal = Modal::Hidden;
        }
        debug!(
            %phase,
            %task,
            completed_tasks = self.snapshot.completed_task_count(),
            "task toggled"
        );

        self.persist().await;
        Ok(self.observe_completion())
    }

    /// Fetch the celebratory fact for a completion edge and show it.
    ///
    /// Returns `None` without fetching when the ticket went stale (the modal
    /// was dismissed in the meantime).
    pub async fn redeem(&mut self, ticket: FetchTicket) -> Option<&str> {
        if !self.trigger.is_current(&ticket) {
            debug!("skipping fact fetch for a dismissed celebration");
            return None;
        }

        let fact = self.facts.fetch_fact().await;
        if !self.trigger.resolve(ticket) {
            return None;
        }
        self.modal = Modal::Fact(fact);
        self.modal.message()
    }

    /// Close the modal. Closing the completion modal resets every task.
    ///
    /// Returns true when progress was reset.
    pub async fn dismiss(&mut self) -> bool {
        let reset = self.modal.is_completion();
        self.modal = Modal::Hidden;
        if !reset {
            return false;
        }

        self.snapshot = progression::reset_all(&self.snapshot);
        self.trigger.dismiss();
        info!("progress reset after celebration");
        self.persist().await;
        true
    }

    fn observe_completion(&mut self) -> Option<FetchTicket> {
        let ticket = self
            .trigger
            .observe(progression::is_all_complete(&self.snapshot));
        if ticket.is_some() {
            info!("all phases complete");
            self.modal = Modal::Loading;
        }
        ticket
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.snapshot).await {
            warn!(error = %err, key = self.store.key(), "could not save progress");
        }
    }
}
