//! Ordered recipient mailbox
//!
//! One sorted collection per recipient, keyed `message:<recipient>`. Each
//! member is a JSON [`Message`] whose score is its `start_time`, so range
//! reads by score are reads by time.
//!
//! Members sharing a score come back in whatever order the store keeps them
//! (Redis: byte order of the member payload). Nothing here re-sorts ties.

use osdk_domain::constants::MAILBOX_KEY_PREFIX;
use osdk_domain::error::{Error, Result};
use osdk_domain::ports::providers::{CacheBackend, MemberSwap, RemoteStore, ScoreBound};
use osdk_domain::value_objects::Message;
use std::sync::Arc;
use tracing::{debug, error};

/// Per-recipient time-ordered message store on a [`RemoteStore`]
#[derive(Clone, Debug)]
pub struct OrderedMailbox {
    store: Arc<dyn RemoteStore>,
}

impl OrderedMailbox {
    /// Create a mailbox over a remote store handle
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Create a mailbox over the remote store behind a cache backend
    pub fn from_backend(backend: &dyn CacheBackend) -> Result<Self> {
        backend.remote_store().map(Self::new).ok_or_else(|| {
            Error::invalid_argument(format!(
                "backend '{}' has no remote store for mailboxes",
                backend.backend_name()
            ))
        })
    }

    /// Remote key of a recipient's collection
    pub fn mailbox_key(recipient_id: &str) -> String {
        format!("{MAILBOX_KEY_PREFIX}{recipient_id}")
    }

    /// The underlying remote store
    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Insert a message stamped with the current time
    pub async fn insert(
        &self,
        recipient_id: &str,
        content: &str,
        from: &str,
        read: bool,
    ) -> Result<Message> {
        self.insert_at(recipient_id, content, from, read, now_unix())
            .await
    }

    /// Insert a message with an explicit start time
    pub async fn insert_at(
        &self,
        recipient_id: &str,
        content: &str,
        from: &str,
        read: bool,
        start_time: i64,
    ) -> Result<Message> {
        let message = Message::new(content, start_time, read, from);
        let payload = message.encode()?;
        self.store
            .zadd(&Self::mailbox_key(recipient_id), &payload, message.score())
            .await?;
        debug!(recipient = recipient_id, start_time, "Inserted mailbox message");
        Ok(message)
    }

    /// All messages with `start_time <= as_of`, ascending
    ///
    /// A single undecodable member fails the whole call.
    pub async fn range_up_to(&self, recipient_id: &str, as_of: i64) -> Result<Vec<Message>> {
        Ok(self
            .fetch_up_to(recipient_id, as_of)
            .await?
            .into_iter()
            .map(|(_, message)| message)
            .collect())
    }

    /// All messages due by now, ascending
    pub async fn messages(&self, recipient_id: &str) -> Result<Vec<Message>> {
        self.range_up_to(recipient_id, now_unix()).await
    }

    /// Flip every due unread message to read, returning how many changed
    ///
    /// Each unread member is swapped for its read copy on the store, keeping
    /// its original score, in one atomic call. A member that a concurrent
    /// prune or delete removed after the snapshot stays removed and is not
    /// counted. Messages inserted after the snapshot are left unread. A
    /// failed swap is reported as `PartialRewrite`.
    pub async fn mark_all_read(&self, recipient_id: &str) -> Result<u64> {
        let snapshot = self.fetch_up_to(recipient_id, now_unix()).await?;

        let mut swaps = Vec::new();
        for (payload, message) in snapshot {
            if message.read {
                continue;
            }
            let read = message.as_read();
            swaps.push(MemberSwap::new(payload, read.encode()?, read.score()));
        }

        if swaps.is_empty() {
            return Ok(0);
        }

        let key = Self::mailbox_key(recipient_id);
        let applied = match self.store.zswap(&key, &swaps).await {
            Ok(applied) => applied,
            Err(e) => {
                error!(recipient = recipient_id, error = %e, "Mailbox read-status rewrite failed");
                return Err(Error::partial_rewrite(recipient_id, e));
            }
        };

        debug!(
            recipient = recipient_id,
            count = applied,
            requested = swaps.len(),
            "Marked mailbox messages read"
        );
        Ok(applied)
    }

    /// Remove every message due by now
    pub async fn prune(&self, recipient_id: &str) -> Result<u64> {
        self.prune_up_to(recipient_id, now_unix()).await
    }

    /// Remove every message with `start_time <= as_of`
    pub async fn prune_up_to(&self, recipient_id: &str, as_of: i64) -> Result<u64> {
        let key = Self::mailbox_key(recipient_id);
        let removed = self
            .store
            .zrem_range_by_score(&key, ScoreBound::NegInfinity, ScoreBound::at(as_of))
            .await?;
        debug!(mailbox = %key, removed, "Pruned mailbox");
        Ok(removed)
    }

    /// Delete a recipient's whole collection
    pub async fn delete(&self, recipient_id: &str) -> Result<bool> {
        self.store.del(&Self::mailbox_key(recipient_id)).await
    }

    async fn fetch_up_to(&self, recipient_id: &str, as_of: i64) -> Result<Vec<(String, Message)>> {
        let members = self
            .store
            .zrange_by_score(
                &Self::mailbox_key(recipient_id),
                ScoreBound::NegInfinity,
                ScoreBound::at(as_of),
            )
            .await?;

        members
            .into_iter()
            .map(|payload| {
                let message = Message::decode(&payload)?;
                Ok((payload, message))
            })
            .collect()
    }
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
