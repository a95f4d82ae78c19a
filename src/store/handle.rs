use crate::model::{Category, Transaction};
use crate::store::{Action, Store};
use crate::Result;
use anyhow::{anyhow, Context};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

const QUEUE_DEPTH: usize = 64;

type Job = Box<dyn FnOnce(&mut Store) + Send>;

/// A queued request for the task that owns the store.
enum Command {
    /// Apply an action and reply with the resulting store version.
    Dispatch(Action, oneshot::Sender<u64>),
    /// Run arbitrary code against the store. The job carries its own reply channel.
    Run(Job),
}

/// A cloneable handle to a [`Store`] owned by a dedicated tokio task.
///
/// Commands are applied one at a time in the order they were queued, so every caller observes its
/// own writes and no caller ever sees a partially applied update.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<Command>,
}

/// A consistent copy of the store's state taken between two commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u64,
    pub selected_category: Option<Category>,
    pub search_query: String,
    pub total: usize,
    pub visible: Vec<Transaction>,
}

impl StoreHandle {
    /// Moves `store` into a new task. Must be called from within a tokio runtime.
    pub fn spawn(store: Store) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        tokio::spawn(run(store, rx));
        Self { tx }
    }

    /// Applies `action` and returns the store version after it.
    pub async fn dispatch(&self, action: Action) -> Result<u64> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Dispatch(action, reply)).await?;
        rx.await.context("The store task dropped a dispatch reply")
    }

    /// Runs `f` with exclusive access to the store and returns its result.
    pub async fn with<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Store) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job: Job = Box::new(move |store| {
            let _ = reply.send(f(store));
        });
        self.send(Command::Run(job)).await?;
        rx.await.context("The store task dropped a reply")
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.with(|store| Snapshot {
            version: store.version(),
            selected_category: store.selected_category(),
            search_query: store.search_query().to_string(),
            total: store.transactions().len(),
            visible: store.visible().into_iter().cloned().collect(),
        })
        .await
    }

    pub async fn get(&self, id: impl Into<String>) -> Result<Option<Transaction>> {
        let id = id.into();
        self.with(move |store| store.get(&id).cloned()).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| anyhow!("The store task is no longer running"))
    }
}

async fn run(mut store: Store, mut rx: mpsc::Receiver<Command>) {
    debug!("Store task started");
    while let Some(command) = rx.recv().await {
        match command {
            Command::Dispatch(action, reply) => {
                trace!("Store task applying {action:?}");
                store.dispatch(action);
                let _ = reply.send(store.version());
            }
            Command::Run(job) => job(&mut store),
        }
    }
    debug!("Store task stopped, all handles dropped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SEED_LEN;
    use crate::test::record;

    #[tokio::test]
    async fn test_dispatch_then_snapshot_reads_own_writes() {
        let handle = StoreHandle::spawn(Store::new());
        let v1 = handle
            .dispatch(Action::Prepend(record("h", "Handle Mart", "Groceries")))
            .await
            .unwrap();
        let v2 = handle
            .dispatch(Action::SetCategoryFilter(Some(Category::Groceries)))
            .await
            .unwrap();
        assert!(v2 > v1);

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.version, v2);
        assert_eq!(snapshot.total, SEED_LEN + 1);
        assert_eq!(snapshot.visible.len(), 4);
        assert_eq!(snapshot.visible[0].merchant, "Handle Mart");
    }

    #[tokio::test]
    async fn test_concurrent_prepends_are_serialized() {
        let handle = StoreHandle::spawn(Store::with_seed(Vec::new()));
        let mut tasks = Vec::new();
        for i in 0..20 {
            let h = handle.clone();
            tasks.push(tokio::spawn(async move {
                h.dispatch(Action::Prepend(record(&i.to_string(), "M", "Dining")))
                    .await
                    .unwrap()
            }));
        }
        let mut versions = Vec::new();
        for task in tasks {
            versions.push(task.await.unwrap());
        }
        versions.sort_unstable();
        assert_eq!(versions, (1..=20).collect::<Vec<u64>>());
        assert_eq!(handle.snapshot().await.unwrap().total, 20);
    }

    #[tokio::test]
    async fn test_get() {
        let handle = StoreHandle::spawn(Store::new());
        assert_eq!(handle.get("9").await.unwrap().unwrap().merchant, "Bolt");
        assert!(handle.get("nope").await.unwrap().is_none());
    }
}
