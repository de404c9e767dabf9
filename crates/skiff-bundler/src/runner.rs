//! Concurrent build runner.
//!
//! Every configuration is compiled in its own task. A semaphore bounds how
//! many engine invocations are in flight; results are collected as tasks
//! finish and then reassembled in configuration order, so the output never
//! depends on completion timing.

use std::num::NonZeroUsize;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use skiff_graph::{BuiltinRegistry, NodeBuiltins};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::engine::BuildEngine;
use crate::extract::{BuildResult, Extractor};
use crate::{Error, Result};

/// How many configurations may build at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Concurrency {
    Limited(NonZeroUsize),
    /// Every configuration starts immediately.
    #[default]
    Unbounded,
}

impl Concurrency {
    /// `limited(0)` is treated as unbounded.
    pub fn limited(max: usize) -> Self {
        NonZeroUsize::new(max).map_or(Concurrency::Unbounded, Concurrency::Limited)
    }

    pub fn limit(&self) -> Option<usize> {
        match self {
            Concurrency::Limited(max) => Some(max.get()),
            Concurrency::Unbounded => None,
        }
    }
}

impl From<Option<NonZeroUsize>> for Concurrency {
    fn from(value: Option<NonZeroUsize>) -> Self {
        value.map_or(Concurrency::Unbounded, Concurrency::Limited)
    }
}

/// Receives every completed compilation's raw stats.
///
/// Called from whichever task finished the build, possibly concurrently.
pub trait StatsReporter<S>: Send + Sync {
    fn report(&self, stats: &S);
}

impl<S, F> StatsReporter<S> for F
where
    F: Fn(&S) + Send + Sync,
{
    fn report(&self, stats: &S) {
        self(stats)
    }
}

/// Runs configurations through a [`BuildEngine`] and extracts their results.
pub struct BuildRunner<E: BuildEngine, R = NodeBuiltins> {
    engine: Arc<E>,
    extractor: Arc<Extractor<R>>,
    reporter: Arc<dyn StatsReporter<E::Stats>>,
}

impl<E: BuildEngine> BuildRunner<E, NodeBuiltins> {
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            extractor: Arc::new(Extractor::new()),
            reporter: Arc::new(|_: &E::Stats| {}),
        }
    }
}

impl<E, R> BuildRunner<E, R>
where
    E: BuildEngine,
    R: BuiltinRegistry + 'static,
{
    pub fn reporter(mut self, reporter: Arc<dyn StatsReporter<E::Stats>>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Swap the extractor, e.g. for one with a custom builtin registry.
    pub fn extractor<R2>(self, extractor: Extractor<R2>) -> BuildRunner<E, R2>
    where
        R2: BuiltinRegistry + 'static,
    {
        BuildRunner {
            engine: self.engine,
            extractor: Arc::new(extractor),
            reporter: self.reporter,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Build every configuration and return one [`BuildResult`] per
    /// compilation, in configuration order.
    ///
    /// A failing configuration never cancels its siblings. Once every task
    /// has finished, the first failure in configuration order is returned.
    pub async fn run_all(
        &self,
        configs: Vec<E::Config>,
        concurrency: Concurrency,
    ) -> Result<Vec<BuildResult>> {
        let total = configs.len();
        let semaphore = concurrency.limit().map(|max| Arc::new(Semaphore::new(max)));

        tracing::debug!(
            builds = total,
            concurrency = ?concurrency.limit(),
            "starting builds"
        );

        let mut join_set = JoinSet::new();
        let mut task_index = FxHashMap::default();

        for (index, config) in configs.into_iter().enumerate() {
            let engine = Arc::clone(&self.engine);
            let extractor = Arc::clone(&self.extractor);
            let reporter = Arc::clone(&self.reporter);
            let semaphore = semaphore.clone();

            let handle = join_set.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => Some(
                        semaphore
                            .acquire_owned()
                            .await
                            .expect("semaphore closed unexpectedly"),
                    ),
                    None => None,
                };

                let compilations = engine.run(&config).await?.into_vec();
                // Every compilation is reported, even when a later extraction fails.
                for stats in &compilations {
                    reporter.report(stats);
                }
                compilations
                    .iter()
                    .map(|stats| extractor.extract(stats))
                    .collect::<Result<Vec<_>>>()
            });
            task_index.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<Result<Vec<BuildResult>>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = join_set.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(join_err) => {
                    let id = join_err.id();
                    (id, Err(Error::TaskPanicked(join_err.to_string())))
                }
            };
            let Some(&index) = task_index.get(&id) else {
                continue;
            };
            if let Err(err) = &result {
                tracing::debug!(build = index, error = %err, "build failed");
            }
            slots[index] = Some(result);
        }

        let mut results = Vec::with_capacity(total);
        for slot in slots {
            match slot {
                Some(Ok(builds)) => results.extend(builds),
                Some(Err(err)) => return Err(err),
                None => return Err(Error::TaskPanicked("build task vanished".to_string())),
            }
        }

        tracing::info!(
            builds = total,
            compilations = results.len(),
            failed = results.iter().filter(|r| !r.is_ok()).count(),
            "builds finished"
        );

        Ok(results)
    }
}
