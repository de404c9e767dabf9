//! Shared fixtures for skiff-bundler integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use skiff_bundler::stats::ModuleRecord;
use skiff_bundler::{
    BuildEngine, Compilation, EngineError, EngineOutput, StatsDiagnostic, StatsSnapshot,
};

/// What a [`MockEngine`] should do with one configuration.
#[derive(Debug, Clone)]
pub struct MockBuild {
    pub name: String,
    pub delay: Duration,
    pub outcome: MockOutcome,
}

#[derive(Debug, Clone)]
pub enum MockOutcome {
    Stats(Vec<StatsSnapshot>),
    EngineFailure(String),
}

impl MockBuild {
    /// A clean build producing one compilation.
    pub fn ok(name: &str, delay_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::from_millis(delay_ms),
            outcome: MockOutcome::Stats(vec![snapshot(name)]),
        }
    }

    /// A build whose compilation reports `errors`.
    pub fn failing(name: &str, delay_ms: u64, errors: &[&str]) -> Self {
        let mut stats = snapshot(name);
        stats.errors = errors.iter().map(|e| StatsDiagnostic::new(*e)).collect();
        Self {
            name: name.to_string(),
            delay: Duration::from_millis(delay_ms),
            outcome: MockOutcome::Stats(vec![stats]),
        }
    }

    pub fn multi(name: &str, children: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::ZERO,
            outcome: MockOutcome::Stats(children.iter().map(|c| snapshot(c)).collect()),
        }
    }

    pub fn engine_failure(name: &str, delay_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::from_millis(delay_ms),
            outcome: MockOutcome::EngineFailure(format!("{name}: config not found")),
        }
    }

    pub fn with_snapshot(mut self, snapshot: StatsSnapshot) -> Self {
        self.outcome = MockOutcome::Stats(vec![snapshot]);
        self
    }
}

/// Stats for a compilation named `name` writing to `.webpack/<name>`.
pub fn snapshot(name: &str) -> StatsSnapshot {
    StatsSnapshot {
        name: Some(name.to_string()),
        output_path: Some(Path::new(".webpack").join(name)),
        ..Default::default()
    }
}

pub fn module(identifier: &str, raw_request: Option<&str>, issuer: Option<&str>) -> ModuleRecord {
    ModuleRecord {
        identifier: identifier.to_string(),
        raw_request: raw_request.map(str::to_string),
        issuer: issuer.map(str::to_string),
        ..Default::default()
    }
}

/// Engine that sleeps, records what it saw and returns canned stats.
#[derive(Debug, Default)]
pub struct MockEngine {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Configuration names in completion order.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildEngine for MockEngine {
    type Config = MockBuild;
    type Stats = Compilation;

    async fn run(&self, build: &MockBuild) -> Result<EngineOutput<Compilation>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(build.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.lock().unwrap().push(build.name.clone());

        match &build.outcome {
            MockOutcome::EngineFailure(message) => Err(EngineError::Other(message.clone())),
            MockOutcome::Stats(snapshots) => {
                let mut compilations = snapshots
                    .iter()
                    .cloned()
                    .map(|s| Compilation::from_snapshot(s, Path::new(".webpack")))
                    .collect::<Result<Vec<_>, _>>()?;
                if compilations.len() == 1 {
                    Ok(EngineOutput::Single(compilations.remove(0)))
                } else {
                    Ok(EngineOutput::Multi(compilations))
                }
            }
        }
    }
}
