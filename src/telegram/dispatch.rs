//! Update dispatching
//!
//! Every user gets a worker task fed by its own channel, so one user's
//! events are handled in arrival order while different users proceed
//! concurrently. Hand-off never waits: a user whose backlog is full loses
//! the update instead of stalling the caller. Idle workers shut down and
//! are started again on the next update.

use super::types::Update;
use super::ChatTransport;
use crate::catalog::RecipeCatalog;
use crate::favorites::{FavoriteStore, UserId};
use crate::router::{Outbound, Router};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Per-user backlog; updates beyond it are dropped
const WORKER_QUEUE: usize = 32;

/// A worker with nothing to do for this long shuts down
const WORKER_IDLE: Duration = Duration::from_secs(600);

type WorkerMap = Mutex<HashMap<UserId, mpsc::Sender<Update>>>;
type Workers = Arc<WorkerMap>;

/// Anything that accepts inbound updates (polling loop, webhook)
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn dispatch(&self, update: Update);
}

pub struct Dispatcher<T, C, F>
where
    T: ChatTransport + 'static,
    C: RecipeCatalog + 'static,
    F: FavoriteStore + 'static,
{
    router: Arc<Router<C, F>>,
    transport: Arc<T>,
    workers: Workers,
    idle_timeout: Duration,
}

impl<T, C, F> Dispatcher<T, C, F>
where
    T: ChatTransport + 'static,
    C: RecipeCatalog + 'static,
    F: FavoriteStore + 'static,
{
    pub fn new(router: Arc<Router<C, F>>, transport: Arc<T>) -> Self {
        Self {
            router,
            transport,
            workers: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout: WORKER_IDLE,
        }
    }

    #[cfg(test)]
    fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    fn spawn_worker(&self, user: UserId) -> mpsc::Sender<Update> {
        let (tx, rx) = mpsc::channel::<Update>(WORKER_QUEUE);
        tokio::spawn(run_worker(
            self.router.clone(),
            self.transport.clone(),
            self.workers.clone(),
            user,
            rx,
            self.idle_timeout,
        ));
        tx
    }

    /// Queue `update` on the user's worker, starting one if needed. Never waits.
    fn hand_off(&self, user: UserId, update: Update) {
        // Hand-off and worker retirement both happen under this lock
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        let update = match workers.get(&user) {
            Some(tx) => match tx.try_send(update) {
                Ok(()) => return,
                Err(TrySendError::Full(update)) => {
                    tracing::warn!(
                        user_id = user,
                        update_id = update.update_id,
                        "User worker backlog full, dropping update"
                    );
                    return;
                }
                Err(TrySendError::Closed(update)) => update,
            },
            None => update,
        };

        let tx = self.spawn_worker(user);
        if let Err(e) = tx.try_send(update) {
            tracing::error!(user_id = user, error = %e, "Dropping update, fresh user worker unavailable");
        }
        workers.insert(user, tx);
    }
}

#[async_trait]
impl<T, C, F> UpdateHandler for Dispatcher<T, C, F>
where
    T: ChatTransport + 'static,
    C: RecipeCatalog + 'static,
    F: FavoriteStore + 'static,
{
    async fn dispatch(&self, update: Update) {
        let Some(user) = update.sender_id() else {
            tracing::debug!(update_id = update.update_id, "Skipping update without sender");
            return;
        };

        self.hand_off(user, update);
    }
}

async fn run_worker<T, C, F>(
    router: Arc<Router<C, F>>,
    transport: Arc<T>,
    workers: Workers,
    user: UserId,
    mut rx: mpsc::Receiver<Update>,
    idle_timeout: Duration,
) where
    T: ChatTransport + 'static,
    C: RecipeCatalog + 'static,
    F: FavoriteStore + 'static,
{
    tracing::debug!(user_id = user, "Starting user worker");
    loop {
        let update = match tokio::time::timeout(idle_timeout, rx.recv()).await {
            Ok(Some(update)) => update,
            Ok(None) => break,
            Err(_) => match retire_if_idle(&workers, user, &mut rx) {
                Some(update) => update,
                None => break,
            },
        };
        process_update(&router, &*transport, user, update).await;
    }
}

/// Unregister the worker unless an update slipped in after the idle timeout.
///
/// `dispatch` sends while holding the same lock, so once the entry is gone
/// no update can reach this channel any more.
fn retire_if_idle(workers: &WorkerMap, user: UserId, rx: &mut mpsc::Receiver<Update>) -> Option<Update> {
    let mut workers = workers.lock().unwrap_or_else(PoisonError::into_inner);
    if let Ok(update) = rx.try_recv() {
        return Some(update);
    }
    workers.remove(&user);
    tracing::debug!(user_id = user, "Retiring idle user worker");
    None
}

async fn process_update<T, C, F>(router: &Router<C, F>, transport: &T, user: UserId, update: Update)
where
    T: ChatTransport + ?Sized,
    C: RecipeCatalog,
    F: FavoriteStore,
{
    tracing::debug!(user_id = user, update_id = update.update_id, "Handling update");

    if let Some(query) = update.callback_query {
        let reply = router
            .handle_callback(user, query.data.as_deref().unwrap_or_default())
            .await;

        if let Err(e) = transport.answer_callback(&query.id, &reply.ack).await {
            tracing::warn!(user_id = user, error = %e, "Failed to answer callback query");
        }
        match query.message {
            Some(message) => deliver(transport, message.chat.id, &reply.messages).await,
            None if !reply.messages.is_empty() => {
                tracing::warn!(user_id = user, "Callback without originating chat, replies dropped");
            }
            None => {}
        }
        return;
    }

    let Some(message) = update.message else {
        return;
    };
    let chat_id = message.chat.id;

    let replies = match message.text.as_deref() {
        Some(text) => {
            if router.chat_state(user).is_awaiting_query() {
                if let Err(e) = transport.typing(chat_id).await {
                    tracing::debug!(chat_id, error = %e, "Failed to send typing indicator");
                }
            }
            let username = message.from.as_ref().and_then(|u| u.username.as_deref()).unwrap_or_default();
            tracing::debug!(user_id = user, username = %username, "Text message");
            router.handle_message(user, text).await
        }
        None => router.handle_non_text(user),
    };
    deliver(transport, chat_id, &replies).await;
}

async fn deliver<T: ChatTransport + ?Sized>(transport: &T, chat_id: i64, messages: &[Outbound]) {
    for message in messages {
        if let Err(e) = transport.send(chat_id, message).await {
            tracing::warn!(chat_id, error = %e, "Failed to deliver message");
        }
    }
}
