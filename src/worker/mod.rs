//! Background compute channel for the transform engine.
//!
//! A dedicated OS thread owns the job queue so a large transform (tens of
//! thousands of records) never stalls the async runtime. Every job carries
//! its own one-shot reply sender, so a response can only ever reach the call
//! that issued it - there is no shared response slot to misdeliver under
//! concurrent requests.
//!
//! If the worker thread is gone, `process` falls back to computing the job
//! inline in the caller rather than returning nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::engine;
use crate::models::{GroupBy, Processed, RawUser};

struct Job {
    id: u64,
    users: Vec<RawUser>,
    group_by: GroupBy,
    filter_term: String,
    reply: oneshot::Sender<Processed>,
}

/// Handle to the background transform worker.
/// Clone is cheap; all clones feed the same worker thread.
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<Job>,
    next_id: Arc<AtomicU64>,
}

impl WorkerHandle {
    /// Spawn the worker thread and return a handle to it.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("userdex-transform".to_string())
            .spawn(move || worker_loop(rx))
            .ok();

        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Run one transform on the worker thread and await its result.
    ///
    /// Falls back to inline computation if the worker cannot be reached, so
    /// the caller always gets an answer.
    pub async fn process(
        &self,
        users: &[RawUser],
        group_by: GroupBy,
        filter_term: &str,
    ) -> Processed {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = oneshot::channel();
        let job = Job {
            id,
            users: users.to_vec(),
            group_by,
            filter_term: filter_term.to_string(),
            reply: reply_tx,
        };

        if self.tx.send(job).is_err() {
            warn!(job = id, "transform worker unavailable, computing inline");
            return engine::process_users(users, group_by, filter_term);
        }

        match reply_rx.await {
            Ok(result) => result,
            Err(_) => {
                warn!(job = id, "transform worker dropped the reply, computing inline");
                engine::process_users(users, group_by, filter_term)
            }
        }
    }

    #[cfg(test)]
    fn detached() -> Self {
        // Receiver dropped immediately: every send fails.
        let (tx, _rx) = mpsc::unbounded_channel();
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

fn worker_loop(mut rx: mpsc::UnboundedReceiver<Job>) {
    debug!("transform worker started");
    while let Some(job) = rx.blocking_recv() {
        debug!(job = job.id, records = job.users.len(), "processing transform job");
        let result = engine::process_users(&job.users, job.group_by, &job.filter_term);
        // The caller may have gone away; nothing to do if the reply fails.
        let _ = job.reply.send(result);
    }
    debug!("transform worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawUser;

    fn records() -> Vec<RawUser> {
        vec![
            RawUser::sample("Bob", "Martin", "bob@example.com", "US", "u1"),
            RawUser::sample("Alice", "Smith", "alice@example.com", "FR", "u2"),
        ]
    }

    #[tokio::test]
    async fn worker_answers_each_request() {
        let worker = WorkerHandle::spawn();
        let result = worker.process(&records(), GroupBy::Nationality, "").await;
        let titles: Vec<&str> = result.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["FR", "US"]);
    }

    #[tokio::test]
    async fn concurrent_requests_get_their_own_results() {
        let worker = WorkerHandle::spawn();
        let users = records();

        let (filtered, grouped) = tokio::join!(
            worker.process(&users, GroupBy::Nationality, "bob"),
            worker.process(&users, GroupBy::Alphabetic, ""),
        );

        assert_eq!(filtered.all_users.len(), 1);
        assert_eq!(filtered.all_users[0].firstname, "Bob");

        assert_eq!(grouped.all_users.len(), 2);
        let titles: Vec<&str> = grouped.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn detached_worker_falls_back_inline() {
        let worker = WorkerHandle::detached();
        let result = worker.process(&records(), GroupBy::Nationality, "").await;
        assert_eq!(result.all_users.len(), 2);
        assert_eq!(result.groups.len(), 2);
    }
}
