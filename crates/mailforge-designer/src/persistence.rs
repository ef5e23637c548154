//! Persistence adapter between the editor and the remote campaign store.
//!
//! The store itself is an external service; [`CampaignStore`] is the seam
//! it plugs into. [`DesignPersistence`] creates the campaign on the first
//! save and updates it afterwards. Only one save may be in flight: a save
//! requested while another is pending is suppressed, not queued.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use mailforge_core::{CampaignId, CampaignStatus, EventBus, PersistenceError};

use crate::designer_state::{DesignerOptions, DesignerState};
use crate::serialization::PersistedDesign;

/// Name given to a campaign created by the first save.
pub const DEFAULT_CAMPAIGN_NAME: &str = "Untitled Campaign";

/// A campaign as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: CampaignId,
    pub name: String,
    #[serde(flatten)]
    pub design: PersistedDesign,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Remote entity store for campaigns.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Creates a campaign and returns the stored record with its new id.
    async fn create(
        &self,
        name: &str,
        design: PersistedDesign,
    ) -> Result<CampaignRecord, PersistenceError>;

    /// Overwrites the design fields of an existing campaign.
    async fn update(
        &self,
        id: &CampaignId,
        design: PersistedDesign,
    ) -> Result<CampaignRecord, PersistenceError>;

    async fn get(&self, id: &CampaignId) -> Result<CampaignRecord, PersistenceError>;
}

/// Store kept in process memory, used by tests and the demo binary.
#[derive(Debug, Default)]
pub struct InMemoryCampaignStore {
    records: RwLock<HashMap<CampaignId, CampaignRecord>>,
    failure: RwLock<Option<String>>,
    writes: AtomicUsize,
}

impl InMemoryCampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with `message` until cleared.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    pub fn clear_failure(&self) {
        *self.failure.write() = None;
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of successful create and update calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), PersistenceError> {
        match self.failure.read().as_ref() {
            Some(message) => Err(PersistenceError::Store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CampaignStore for InMemoryCampaignStore {
    async fn create(
        &self,
        name: &str,
        design: PersistedDesign,
    ) -> Result<CampaignRecord, PersistenceError> {
        self.check_failure()?;
        let now = Utc::now();
        let record = CampaignRecord {
            id: CampaignId::generate(),
            name: name.to_string(),
            design,
            created_at: now,
            updated_at: now,
        };
        self.records.write().insert(record.id.clone(), record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record)
    }

    async fn update(
        &self,
        id: &CampaignId,
        design: PersistedDesign,
    ) -> Result<CampaignRecord, PersistenceError> {
        self.check_failure()?;
        let mut records = self.records.write();
        let record = records
            .get_mut(id)
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))?;
        record.design = design;
        record.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(record.clone())
    }

    async fn get(&self, id: &CampaignId) -> Result<CampaignRecord, PersistenceError> {
        self.check_failure()?;
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| PersistenceError::NotFound(id.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save; the store assigned this id.
    Created(CampaignId),
    Updated(CampaignId),
    /// Another save was still pending; nothing was sent.
    Suppressed,
}

impl SaveOutcome {
    pub fn campaign_id(&self) -> Option<&CampaignId> {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => Some(id),
            SaveOutcome::Suppressed => None,
        }
    }
}

/// Clears the pending flag when the save future finishes or is dropped.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct DesignPersistence {
    store: Arc<dyn CampaignStore>,
    pending: AtomicBool,
}

impl DesignPersistence {
    pub fn new(store: Arc<dyn CampaignStore>) -> Self {
        Self {
            store,
            pending: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<dyn CampaignStore> {
        &self.store
    }

    pub fn is_saving(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    fn begin(&self) -> Option<PendingGuard<'_>> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard(&self.pending))
    }

    /// Writes `design` to the store.
    ///
    /// Without a `campaign_id` a new campaign is created with status
    /// `designing`; otherwise the existing record is updated.
    pub async fn save(
        &self,
        campaign_id: Option<&CampaignId>,
        mut design: PersistedDesign,
    ) -> Result<SaveOutcome, PersistenceError> {
        let Some(_guard) = self.begin() else {
            tracing::debug!("Save suppressed: another save is pending");
            return Ok(SaveOutcome::Suppressed);
        };

        match campaign_id {
            None => {
                design.status = CampaignStatus::Designing;
                let record = self.store.create(DEFAULT_CAMPAIGN_NAME, design).await?;
                tracing::info!("Created campaign {}", record.id);
                Ok(SaveOutcome::Created(record.id))
            }
            Some(id) => {
                let record = self.store.update(id, design).await?;
                tracing::info!("Saved campaign {}", record.id);
                Ok(SaveOutcome::Updated(record.id))
            }
        }
    }

    /// Fetches a campaign and opens it in a new editor session.
    pub async fn load(
        &self,
        id: &CampaignId,
        options: DesignerOptions,
        bus: Arc<EventBus>,
    ) -> Result<DesignerState, PersistenceError> {
        let record = self.store.get(id).await?;
        tracing::info!(
            "Loaded campaign {} ({} elements)",
            record.id,
            record.design.design_data.elements.len()
        );
        DesignerState::from_record(record, options, bus)
    }
}

impl std::fmt::Debug for DesignPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignPersistence")
            .field("pending", &self.is_saving())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::model::ElementType;
    use tokio::sync::Notify;

    fn design() -> PersistedDesign {
        let mut canvas = Canvas::new();
        canvas.add_element(ElementType::Text);
        PersistedDesign::from_canvas(&canvas, CampaignStatus::Draft)
    }

    /// Store whose `create` waits until released.
    struct GatedStore {
        inner: InMemoryCampaignStore,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CampaignStore for GatedStore {
        async fn create(
            &self,
            name: &str,
            design: PersistedDesign,
        ) -> Result<CampaignRecord, PersistenceError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.create(name, design).await
        }

        async fn update(
            &self,
            id: &CampaignId,
            design: PersistedDesign,
        ) -> Result<CampaignRecord, PersistenceError> {
            self.inner.update(id, design).await
        }

        async fn get(&self, id: &CampaignId) -> Result<CampaignRecord, PersistenceError> {
            self.inner.get(id).await
        }
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let store = Arc::new(InMemoryCampaignStore::new());
        let persistence = DesignPersistence::new(store.clone());

        let outcome = persistence.save(None, design()).await.unwrap();
        let SaveOutcome::Created(id) = outcome else {
            panic!("expected create, got {:?}", outcome);
        };
        let record = store.get(&id).await.unwrap();
        assert_eq!(record.name, DEFAULT_CAMPAIGN_NAME);
        assert_eq!(record.design.status, CampaignStatus::Designing);

        let outcome = persistence.save(Some(&id), design()).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Updated(id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 2);
        assert!(!persistence.is_saving());
    }

    #[tokio::test]
    async fn test_second_save_is_suppressed_while_pending() {
        let store = Arc::new(GatedStore {
            inner: InMemoryCampaignStore::new(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let persistence = DesignPersistence::new(store.clone());

        let first = persistence.save(None, design());
        let second = async {
            store.entered.notified().await;
            let outcome = persistence.save(None, design()).await;
            store.release.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, Ok(SaveOutcome::Created(_))));
        assert_eq!(second.unwrap(), SaveOutcome::Suppressed);
        assert_eq!(store.inner.len(), 1);
        assert!(!persistence.is_saving());
    }

    #[tokio::test]
    async fn test_failure_releases_guard() {
        let store = Arc::new(InMemoryCampaignStore::new());
        let persistence = DesignPersistence::new(store.clone());

        store.fail_with("network unreachable");
        let err = persistence.save(None, design()).await.unwrap_err();
        assert!(matches!(err, PersistenceError::Store(_)));
        assert!(!persistence.is_saving());

        store.clear_failure();
        assert!(persistence.save(None, design()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_campaign() {
        let persistence = DesignPersistence::new(Arc::new(InMemoryCampaignStore::new()));
        let err = persistence
            .save(Some(&CampaignId::from("missing")), design())
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound(_)));
    }
}
