//! Result Sinks
//!
//! A result sink consumes one record per analyzed repository. Exactly two
//! variants exist: a line-delimited output stream (flushed per record, so
//! results appear as they complete) and a push onto the remote results list.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::queue::RedisQueue;

use super::error::ScanResult;
use super::types::ResultRecord;

/// Consumer of per-repository result records
#[async_trait]
pub trait ResultSink: Send {
    async fn emit(&mut self, record: &ResultRecord) -> ScanResult<()>;
}

/// Writes one rendered line per record, flushing immediately
pub struct StreamResultSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> StreamResultSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ResultSink for StreamResultSink<W> {
    async fn emit(&mut self, record: &ResultRecord) -> ScanResult<()> {
        let mut line = record.render();
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// Pushes each rendered line onto the tail of the remote results list
pub struct QueueResultSink {
    queue: RedisQueue,
}

impl QueueResultSink {
    pub fn new(queue: RedisQueue) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl ResultSink for QueueResultSink {
    async fn emit(&mut self, record: &ResultRecord) -> ScanResult<()> {
        self.queue.push_result(&record.render()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::vocabulary::index_of;
    use crate::analysis::AlgorithmCounts;

    fn record(name: &str, pairs: &[(&str, u64)]) -> ResultRecord {
        let mut counts = AlgorithmCounts::new();
        for (algo, count) in pairs {
            counts.increment(index_of(algo).unwrap(), *count);
        }
        ResultRecord::from_counts(name, &counts).unwrap()
    }

    #[tokio::test]
    async fn test_stream_sink_writes_one_line_per_record() {
        let mut sink = StreamResultSink::new(Vec::new());
        sink.emit(&record("orgA/repo1", &[("sort", 2), ("find", 1)]))
            .await
            .unwrap();
        sink.emit(&record("orgB/repo2", &[("accumulate", 4)]))
            .await
            .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "orgA/repo1 sort:2 find:1\norgB/repo2 accumulate:4\n");
    }
}
