//! Scanner Pipeline Integration Tests
//!
//! Drives the work coordinator end to end against local git fixtures:
//! acquisition, selection, aggregation, emission, and failure containment.
//! Requires a `git` binary on PATH, like the acquisition service itself.

use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use algostat::core::shutdown::ShutdownCoordinator;
use algostat::scanner::error::ScanResult;
use algostat::scanner::sink::ResultSink;
use algostat::scanner::source::JobSource;
use algostat::scanner::{RepoDescriptor, ResultRecord, WorkCoordinator};

fn run_git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("git must be runnable in tests");
    assert!(status.success(), "git {:?} failed", args);
}

fn fixture_repo(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init", "-q"]);
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    run_git(dir.path(), &["add", "."]);
    run_git(
        dir.path(),
        &[
            "-c",
            "user.name=algostat",
            "-c",
            "user.email=algostat@example.com",
            "commit",
            "-q",
            "-m",
            "fixture",
        ],
    );
    dir
}

fn local_descriptor(name: &str, fixture: &TempDir) -> RepoDescriptor {
    RepoDescriptor::with_remote(name, fixture.path().to_string_lossy().to_string())
}

struct FixedSource {
    jobs: VecDeque<RepoDescriptor>,
}

impl FixedSource {
    fn new(jobs: impl IntoIterator<Item = RepoDescriptor>) -> Box<Self> {
        Box::new(Self {
            jobs: jobs.into_iter().collect(),
        })
    }
}

#[async_trait]
impl JobSource for FixedSource {
    async fn next_job(&mut self) -> ScanResult<Option<RepoDescriptor>> {
        Ok(self.jobs.pop_front())
    }
}

struct CollectSink {
    lines: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ResultSink for CollectSink {
    async fn emit(&mut self, record: &ResultRecord) -> ScanResult<()> {
        self.lines.lock().unwrap().push(record.render());
        Ok(())
    }
}

fn collecting_sink() -> (Box<dyn ResultSink>, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    (
        Box::new(CollectSink {
            lines: lines.clone(),
        }),
        lines,
    )
}

const MATCHING_SOURCE: &str = "#include <algorithm>\n\
    int main() {\n\
        std::sort(v.begin(), v.end());\n\
        sort(w.begin(), w.end());\n\
        auto it = find(v.begin(), v.end(), 3);\n\
    }\n";

#[tokio::test]
async fn test_two_repo_scenario_emits_only_the_matching_one() {
    let repo1 = fixture_repo(&[("main.cpp", MATCHING_SOURCE)]);
    // No qualifying files: a README and a source file without the headers.
    let repo2 = fixture_repo(&[
        ("README.md", "no algorithms here\n"),
        ("plain.cpp", "int sort_order() { return 0; }\n"),
    ]);

    let source = FixedSource::new([
        local_descriptor("orgA/repo1", &repo1),
        local_descriptor("orgA/repo2", &repo2),
    ]);
    let (sink, lines) = collecting_sink();
    let shutdown = ShutdownCoordinator::new();

    let summary = WorkCoordinator::new(2).run(source, sink, &shutdown).await;

    let lines = lines.lock().unwrap();
    assert_eq!(lines.as_slice(), ["orgA/repo1 sort:2 find:1"]);

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 0);
    assert!(!summary.interrupted);
    assert_eq!(summary.totals.get("sort"), 2);
    assert_eq!(summary.totals.get("find"), 1);
}

#[tokio::test]
async fn test_duplicate_jobs_are_reprocessed_independently() {
    let repo = fixture_repo(&[("main.cpp", MATCHING_SOURCE)]);

    let source = FixedSource::new([
        local_descriptor("orgA/repo1", &repo),
        local_descriptor("orgA/repo1", &repo),
    ]);
    let (sink, lines) = collecting_sink();
    let shutdown = ShutdownCoordinator::new();

    let summary = WorkCoordinator::new(1).run(source, sink, &shutdown).await;

    let lines = lines.lock().unwrap();
    assert_eq!(
        lines.as_slice(),
        [
            "orgA/repo1 sort:2 find:1",
            "orgA/repo1 sort:2 find:1"
        ]
    );
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.totals.get("sort"), 4);
}

#[tokio::test]
async fn test_failed_acquisition_does_not_stop_the_run() {
    let good = fixture_repo(&[("main.cpp", MATCHING_SOURCE)]);

    let source = FixedSource::new([
        RepoDescriptor::with_remote("orgB/bad-repo", "/nonexistent/algostat/remote.git"),
        local_descriptor("orgA/repo1", &good),
    ]);
    let (sink, lines) = collecting_sink();
    let shutdown = ShutdownCoordinator::new();

    let summary = WorkCoordinator::new(1).run(source, sink, &shutdown).await;

    // The bad repository contributes nothing; the run continues past it.
    let lines = lines.lock().unwrap();
    assert_eq!(lines.as_slice(), ["orgA/repo1 sort:2 find:1"]);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.totals.get("sort"), 2);
}

/// Source that requests shutdown as soon as the first job has been handed out
struct InterruptingSource {
    jobs: VecDeque<RepoDescriptor>,
    shutdown: ShutdownCoordinator,
    handed_out: bool,
}

#[async_trait]
impl JobSource for InterruptingSource {
    async fn next_job(&mut self) -> ScanResult<Option<RepoDescriptor>> {
        let job = self.jobs.pop_front();
        if !self.handed_out {
            self.handed_out = true;
            self.shutdown.trigger_shutdown();
        }
        Ok(job)
    }
}

#[tokio::test]
async fn test_interruption_flushes_partial_totals_and_stops_pulling() {
    let repo = fixture_repo(&[("main.cpp", MATCHING_SOURCE)]);

    let shutdown = ShutdownCoordinator::new();
    let source = Box::new(InterruptingSource {
        jobs: VecDeque::from([
            local_descriptor("orgA/repo1", &repo),
            local_descriptor("orgA/repo2", &repo),
            local_descriptor("orgA/repo3", &repo),
        ]),
        shutdown: shutdown.clone(),
        handed_out: false,
    });
    let (sink, lines) = collecting_sink();

    let summary = WorkCoordinator::new(1).run(source, sink, &shutdown).await;

    // The in-flight analysis completed; no further jobs were pulled.
    assert!(summary.interrupted);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.totals.get("sort"), 2);
    assert_eq!(lines.lock().unwrap().len(), 1);
}
