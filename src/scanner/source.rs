//! Job Sources
//!
//! A job source produces a lazy, finite, single-pass sequence of repository
//! descriptors. Exactly two variants exist: a line-delimited input stream
//! and a drain of the remote jobs list.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use crate::queue::RedisQueue;

use super::error::ScanResult;
use super::types::RepoDescriptor;

/// Producer of repository descriptors, consumed until `None`
#[async_trait]
pub trait JobSource: Send {
    async fn next_job(&mut self) -> ScanResult<Option<RepoDescriptor>>;
}

/// One descriptor per non-empty trimmed line, in input order, until EOF
pub struct StreamJobSource<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin + Send> StreamJobSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> JobSource for StreamJobSource<R> {
    async fn next_job(&mut self) -> ScanResult<Option<RepoDescriptor>> {
        while let Some(line) = self.lines.next_line().await? {
            let name = line.trim();
            if !name.is_empty() {
                return Ok(Some(RepoDescriptor::new(name)));
            }
        }
        Ok(None)
    }
}

/// Drains the remote jobs list until it is observed empty
///
/// The length check and the pop are two separate commands; concurrent
/// drains of the same list interleave arbitrarily. That is acceptable
/// because reprocessing a repository is safe, merely wasteful.
pub struct QueueJobSource {
    queue: RedisQueue,
}

impl QueueJobSource {
    pub fn new(queue: RedisQueue) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl JobSource for QueueJobSource {
    async fn next_job(&mut self) -> ScanResult<Option<RepoDescriptor>> {
        loop {
            if self.queue.job_count().await? == 0 {
                return Ok(None);
            }
            // Another consumer may have raced us to the head; re-check the
            // length rather than treating the miss as an error.
            if let Some(name) = self.queue.pop_job().await? {
                return Ok(Some(RepoDescriptor::new(name)));
            }
        }
    }
}
