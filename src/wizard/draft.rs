use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::wizard::steps::{ContactDetails, ProjectDetails, ServiceSelection, WizardStep};

/// Version stamp for the serialized draft; bumped whenever the shape
/// changes so a stale draft is discarded instead of misread.
pub const DRAFT_VERSION: u32 = 2;

/// The whole in-progress wizard state as one aggregate, persisted on every
/// step so a reload resumes where the visitor left off. Uploaded photos are
/// deliberately absent: they do not survive a reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub version: u32,
    /// Bit N-1 set means step N has passed its gate at least once.
    pub completed_steps: u8,
    pub service: ServiceSelection,
    pub details: ProjectDetails,
    pub description: String,
    pub contact: ContactDetails,
}

impl QuoteDraft {
    pub fn new() -> Self {
        QuoteDraft {
            version: DRAFT_VERSION,
            completed_steps: 0,
            service: ServiceSelection::default(),
            details: ProjectDetails::default(),
            description: String::new(),
            contact: ContactDetails::default(),
        }
    }

    pub fn mark_complete(&mut self, step: WizardStep) {
        self.completed_steps |= step.bit();
    }

    pub fn is_complete(&self, step: WizardStep) -> bool {
        self.completed_steps & step.bit() != 0
    }

    /// Where a resumed session should land.
    pub fn first_incomplete_step(&self) -> WizardStep {
        WizardStep::ALL
            .into_iter()
            .find(|step| !self.is_complete(*step))
            .unwrap_or(WizardStep::Review)
    }
}

impl Default for QuoteDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("draft serialization error: {0}")]
    Serialization(String),

    #[error("draft storage error: {0}")]
    Storage(String),
}

/// Where the draft aggregate lives between visits (browser local storage in
/// the real client). Writes are last-write-wins; a single active visitor is
/// assumed.
pub trait DraftStore: Send + Sync {
    fn load(&self) -> Result<Option<QuoteDraft>, DraftError>;
    fn save(&self, draft: &QuoteDraft) -> Result<(), DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

impl<T: DraftStore + ?Sized> DraftStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<QuoteDraft>, DraftError> {
        (**self).load()
    }

    fn save(&self, draft: &QuoteDraft) -> Result<(), DraftError> {
        (**self).save(draft)
    }

    fn clear(&self) -> Result<(), DraftError> {
        (**self).clear()
    }
}

/// In-memory stand-in holding the same JSON blob a browser would.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized form, mainly for tests.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<QuoteDraft>, DraftError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| DraftError::Storage("draft slot poisoned".to_string()))?;
        let Some(raw) = slot.as_ref() else {
            return Ok(None);
        };
        let draft: QuoteDraft =
            serde_json::from_str(raw).map_err(|e| DraftError::Serialization(e.to_string()))?;
        if draft.version != DRAFT_VERSION {
            // A draft from an older site build is discarded, not migrated.
            return Ok(None);
        }
        Ok(Some(draft))
    }

    fn save(&self, draft: &QuoteDraft) -> Result<(), DraftError> {
        let raw =
            serde_json::to_string(draft).map_err(|e| DraftError::Serialization(e.to_string()))?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| DraftError::Storage("draft slot poisoned".to_string()))?;
        *slot = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), DraftError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| DraftError::Storage("draft slot poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
