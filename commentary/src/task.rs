use std::sync::Arc;
use std::time::Duration;

use degen_protocol::{CommentaryRequest, FALLBACK_COMMENT};
use futures_channel::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::*;

/// A comment for the game identified by `generation`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentaryEvent {
    pub generation: u64,
    pub text: String,
}

/// Handle to a detached commentary fetch. Dropping it leaves the fetch running.
#[derive(Debug)]
pub struct CommentaryTask {
    generation: u64,
    handle: JoinHandle<()>,
}

impl CommentaryTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abandons the fetch, nothing is published.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the fetch to publish or be aborted.
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                log::error!("Commentary task for generation {} failed: {}", self.generation, err);
            }
        }
    }
}

/// Fetches a comment in the background and publishes it to `sink`.
///
/// The caller never awaits the fetch. A fetch that outlives `timeout` publishes [`FALLBACK_COMMENT`] instead, and a
/// closed sink silently drops the result.
pub fn spawn_commentary<S: CommentarySource>(
    source: Arc<S>,
    generation: u64,
    request: CommentaryRequest,
    timeout: Duration,
    sink: UnboundedSender<CommentaryEvent>,
) -> CommentaryTask {
    let handle = tokio::spawn(async move {
        let text = match tokio::time::timeout(timeout, source.comment(request)).await {
            Ok(text) => text,
            Err(_) => {
                log::warn!("Commentary timed out after {:?}", timeout);
                FALLBACK_COMMENT.to_owned()
            }
        };

        if sink
            .unbounded_send(CommentaryEvent { generation, text })
            .is_err()
        {
            log::debug!("Nobody listening for generation {} commentary", generation);
        }
    });

    CommentaryTask { generation, handle }
}
