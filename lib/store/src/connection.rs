//! Process-wide, single-flight connection setup.
//!
//! The first caller starts initialization; callers arriving while it is in
//! flight await the same pending result. Success is cached for the life of
//! the manager. Failure is recorded and the next call starts over.

use crate::error::{Result, StoreError};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

type Pending<C> = Shared<BoxFuture<'static, Result<Arc<C>>>>;
type Initializer<C> = Box<dyn Fn() -> BoxFuture<'static, Result<Arc<C>>> + Send + Sync>;

pub enum ConnectionState<C> {
    Uninitialized,
    Initializing { generation: u64, pending: Pending<C> },
    Ready(Arc<C>),
    Failed(StoreError),
}

pub struct ConnectionManager<C> {
    state: Mutex<ConnectionState<C>>,
    generation: AtomicU64,
    init: Initializer<C>,
}

impl<C: Send + Sync + 'static> ConnectionManager<C> {
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<C>>> + Send + 'static,
    {
        Self {
            state: Mutex::new(ConnectionState::Uninitialized),
            generation: AtomicU64::new(0),
            init: Box::new(move || init().boxed()),
        }
    }

    /// The ready handle, initializing it first if needed
    pub async fn get(&self) -> Result<Arc<C>> {
        let (generation, pending) = {
            let mut state = self.state.lock();
            match &*state {
                ConnectionState::Ready(handle) => return Ok(handle.clone()),
                ConnectionState::Initializing { generation, pending } => (*generation, pending.clone()),
                ConnectionState::Uninitialized | ConnectionState::Failed(_) => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
                    info!("Initializing store connection (attempt #{})", generation);
                    let pending = (self.init)().shared();
                    *state = ConnectionState::Initializing {
                        generation,
                        pending: pending.clone(),
                    };
                    (generation, pending)
                }
            }
        };

        let outcome = pending.await;

        let mut state = self.state.lock();
        let current = matches!(
            &*state,
            ConnectionState::Initializing { generation: g, .. } if *g == generation
        );
        if current {
            *state = match &outcome {
                Ok(handle) => {
                    info!("Store connection ready");
                    ConnectionState::Ready(handle.clone())
                }
                Err(e) => {
                    warn!("Store connection failed: {}", e);
                    ConnectionState::Failed(e.clone())
                }
            };
        }
        outcome
    }

    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), ConnectionState::Ready(_))
    }

    /// The last initialization error, if the latest attempt failed
    pub fn last_error(&self) -> Option<StoreError> {
        match &*self.state.lock() {
            ConnectionState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_initialization() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let manager = ConnectionManager::new(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(Arc::new(n))
            }
        });

        let handles = join_all((0..8).map(|_| manager.get())).await;
        assert!(handles.iter().all(|h| h.as_deref() == Ok(&0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(manager.is_ready());

        // Cached afterwards
        assert_eq!(*manager.get().await.unwrap(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_resets_for_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let manager = ConnectionManager::new(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(StoreError::Http("refused".to_string()))
                } else {
                    Ok(Arc::new("connected"))
                }
            }
        });

        assert_eq!(
            manager.get().await.unwrap_err(),
            StoreError::Http("refused".to_string())
        );
        assert!(!manager.is_ready());
        assert!(manager.last_error().is_some());

        assert_eq!(*manager.get().await.unwrap(), "connected");
        assert!(manager.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
