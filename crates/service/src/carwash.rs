use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::storage::CarWashRepository;

/// Application service owning every workflow over the car wash store.
///
/// Mutating workflows hold the write side of `gate` from their first lookup
/// to their last write, so two payments for one record cannot both pass the
/// unpaid check. Reads and reports share the read side.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::carwash::CarWashService;
/// use service::storage::memory::MemoryRepository;
///
/// let svc = CarWashService::new(Arc::new(MemoryRepository::new()));
/// let unpaid = tokio_test::block_on(svc.list_unpaid()).unwrap();
/// assert!(unpaid.is_empty());
/// ```
pub struct CarWashService {
    repo: Arc<dyn CarWashRepository>,
    gate: RwLock<()>,
}

impl CarWashService {
    pub fn new(repo: Arc<dyn CarWashRepository>) -> Self {
        Self { repo, gate: RwLock::new(()) }
    }

    pub(crate) fn repo(&self) -> &dyn CarWashRepository { self.repo.as_ref() }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, ()> { self.gate.read().await }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, ()> { self.gate.write().await }
}
