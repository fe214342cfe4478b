//! Redis Queue Client
//!
//! Thin wrapper over two named FIFO lists with push-to-tail, pop-from-head,
//! and length queries. The handle is cheap to clone; clones share one
//! multiplexed connection.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use super::config::QueueConfig;
use super::error::QueueResult;

/// Name of the pending-jobs list
pub const JOBS_LIST: &str = "algostat:jobs";
/// Name of the finished-results list
pub const RESULTS_LIST: &str = "algostat:results";

/// Handle to the remote queue's two lists
#[derive(Clone)]
pub struct RedisQueue {
    conn: MultiplexedConnection,
}

impl RedisQueue {
    /// Connect to the queue described by `config`
    pub async fn connect(config: &QueueConfig) -> QueueResult<Self> {
        let client = redis::Client::open(config.url())?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    /// Append a repository name to the tail of the jobs list
    pub async fn push_job(&mut self, name: &str) -> QueueResult<()> {
        let _: i64 = self.conn.rpush(JOBS_LIST, name).await?;
        Ok(())
    }

    /// Pop the head of the jobs list, `None` when the list is empty
    pub async fn pop_job(&mut self) -> QueueResult<Option<String>> {
        Ok(self.conn.lpop(JOBS_LIST, None).await?)
    }

    /// Current length of the jobs list
    pub async fn job_count(&mut self) -> QueueResult<u64> {
        Ok(self.conn.llen(JOBS_LIST).await?)
    }

    /// Append a rendered result line to the tail of the results list
    pub async fn push_result(&mut self, result: &str) -> QueueResult<()> {
        let _: i64 = self.conn.rpush(RESULTS_LIST, result).await?;
        Ok(())
    }

    /// Pop the head of the results list, `None` when the list is empty
    pub async fn pop_result(&mut self) -> QueueResult<Option<String>> {
        Ok(self.conn.lpop(RESULTS_LIST, None).await?)
    }

    /// Current length of the results list
    pub async fn result_count(&mut self) -> QueueResult<u64> {
        Ok(self.conn.llen(RESULTS_LIST).await?)
    }
}
