//! Build progress reporting.
//!
//! [`ProgressObserver`] counts module builds of the current top-level job,
//! logs a milestone every [`MILESTONE_INTERVAL`] modules, times each module
//! from start to settle, and announces phase boundaries. Child jobs are
//! ignored so that extracted stylesheets and templates do not inflate counts.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, info};

use crate::lifecycle::{BuildObserver, JobContext, Phase, SettleOutcome};

/// Modules between two progress milestones
pub const MILESTONE_INTERVAL: usize = 100;

/// Module identifiers with these prefixes are synthetic and never counted
const SYNTHETIC_PREFIXES: &[&str] = &["ignored", "external"];

/// Result of reporting a module start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStart {
    /// Child job or synthetic module; nothing recorded
    Skipped,
    /// Counted; carries the 1-based ordinal within the job
    Tracked(usize),
    /// Counted and logged as a milestone
    Milestone(usize),
}

#[derive(Debug)]
struct JobProgress {
    job: u64,
    started: AtomicUsize,
    in_flight: DashMap<String, Instant>,
}

impl JobProgress {
    fn new(job: u64) -> Self {
        Self {
            job,
            started: AtomicUsize::new(0),
            in_flight: DashMap::new(),
        }
    }
}

#[derive(Debug)]
pub struct ProgressObserver {
    root: PathBuf,
    current: RwLock<Option<Arc<JobProgress>>>,
}

impl ProgressObserver {
    /// `root` is stripped from module paths in timing logs.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            current: RwLock::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record that `module` started building.
    pub fn start_module(&self, job: &JobContext, module: &str) -> ModuleStart {
        if job.is_child() || is_synthetic(module) {
            return ModuleStart::Skipped;
        }

        let Some(state) = self.state_for(job) else {
            debug!(job = job.id, "Ignoring module start from a superseded job");
            return ModuleStart::Skipped;
        };
        let ordinal = state.started.fetch_add(1, Ordering::Relaxed) + 1;
        state.in_flight.insert(module.to_string(), Instant::now());

        if ordinal % MILESTONE_INTERVAL == 0 {
            info!(modules = ordinal, "Building module #{}", ordinal);
            ModuleStart::Milestone(ordinal)
        } else {
            ModuleStart::Tracked(ordinal)
        }
    }

    /// Record that `module` finished. Returns the time since its start, or
    /// `None` when the start was never recorded.
    pub fn settle_module(
        &self,
        job: &JobContext,
        module: &str,
        outcome: SettleOutcome,
    ) -> Option<Duration> {
        if job.is_child() {
            return None;
        }

        let state = self.lookup(job)?;
        let (_, started_at) = state.in_flight.remove(module)?;
        let elapsed = started_at.elapsed();

        debug!(
            module = %self.display_name(module),
            elapsed_ms = elapsed.as_millis() as u64,
            failed = outcome == SettleOutcome::Failed,
            "Built module"
        );
        Some(elapsed)
    }

    pub fn phase(&self, job: &JobContext, phase: Phase) {
        if job.is_child() {
            return;
        }

        match phase {
            Phase::Compilation => {
                *self.current.write() = Some(Arc::new(JobProgress::new(job.id)));
                debug!(job = job.id, "Compilation started");
            }
            Phase::Seal => {
                let modules = self.modules_started(job);
                info!(modules, "Sealing {} modules...", modules);
            }
            Phase::Optimize => info!("Optimizing modules, chunks and tree..."),
            Phase::OptimizeChunkOrder => {}
            Phase::OptimizeChunkAssets => info!("Optimizing assets..."),
            Phase::Emit => info!("Emitting output files..."),
            Phase::Done => {
                let mut current = self.current.write();
                if current.as_ref().is_some_and(|state| state.job == job.id) {
                    *current = None;
                }
            }
        }
    }

    /// Modules counted so far for `job` (0 when the job is unknown).
    pub fn modules_started(&self, job: &JobContext) -> usize {
        self.lookup(job)
            .map_or(0, |state| state.started.load(Ordering::Relaxed))
    }

    /// Modules started but not yet settled for `job`.
    pub fn modules_in_flight(&self, job: &JobContext) -> usize {
        self.lookup(job).map_or(0, |state| state.in_flight.len())
    }

    fn lookup(&self, job: &JobContext) -> Option<Arc<JobProgress>> {
        self.current
            .read()
            .as_ref()
            .filter(|state| state.job == job.id)
            .cloned()
    }

    /// State for `job`, created when no job is current. Only
    /// [`Phase::Compilation`] replaces the state of another job; events of any
    /// other job get `None`.
    fn state_for(&self, job: &JobContext) -> Option<Arc<JobProgress>> {
        if let Some(state) = self.lookup(job) {
            return Some(state);
        }

        let mut current = self.current.write();
        match current.as_ref() {
            Some(state) if state.job == job.id => Some(Arc::clone(state)),
            Some(_) => None,
            None => {
                let fresh = Arc::new(JobProgress::new(job.id));
                *current = Some(Arc::clone(&fresh));
                Some(fresh)
            }
        }
    }

    /// Resource path without loader prefixes, relative to the root.
    fn display_name(&self, module: &str) -> String {
        let resource = module.rsplit('!').next().unwrap_or(module);
        let path = Path::new(resource);
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn is_synthetic(module: &str) -> bool {
    module.is_empty()
        || SYNTHETIC_PREFIXES
            .iter()
            .any(|prefix| module.starts_with(prefix))
}

impl BuildObserver for ProgressObserver {
    fn on_module_start(&self, job: &JobContext, module: &str) {
        self.start_module(job, module);
    }

    fn on_module_settle(&self, job: &JobContext, module: &str, outcome: SettleOutcome) {
        self.settle_module(job, module, outcome);
    }

    fn on_phase_boundary(&self, job: &JobContext, phase: Phase) {
        self.phase(job, phase);
    }
}

impl Serialize for ProgressObserver {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProgressObserver", 1)?;
        state.serialize_field("milestoneInterval", &MILESTONE_INTERVAL)?;
        state.end()
    }
}
