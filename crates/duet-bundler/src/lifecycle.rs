//! Compilation lifecycle hooks.
//!
//! The engine reports module and phase events for each compilation job. A
//! [`LifecycleRegistry`] fans those events out to the observers registered by
//! the active plugins, and folds chunk-id tables through the chunk-order
//! hooks in registration order.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::chunk_ids::ChunkIdTable;

/// Identity of a compilation job.
///
/// Child jobs are spawned by the engine for secondary work (extracting
/// stylesheets, compiling HTML templates) and report under their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobContext {
    pub id: u64,
    pub parent: Option<u64>,
}

impl JobContext {
    pub fn top_level(id: u64) -> Self {
        Self { id, parent: None }
    }

    pub fn child(id: u64, parent: u64) -> Self {
        Self {
            id,
            parent: Some(parent),
        }
    }

    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }
}

/// Phase boundaries reported by the engine, in the order they occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// A new compilation job starts
    Compilation,
    /// Module graph is complete and sealed
    Seal,
    /// Module/chunk/tree optimization
    Optimize,
    /// Chunk ids are assigned
    OptimizeChunkOrder,
    /// Asset optimization (minification)
    OptimizeChunkAssets,
    /// Output files are written
    Emit,
    /// The job finished
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Compilation => "compilation",
            Phase::Seal => "seal",
            Phase::Optimize => "optimize",
            Phase::OptimizeChunkOrder => "optimize-chunk-order",
            Phase::OptimizeChunkAssets => "optimize-chunk-assets",
            Phase::Emit => "emit",
            Phase::Done => "done",
        })
    }
}

/// How a module build finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Succeeded,
    Failed,
}

/// A single event delivered by the engine
#[derive(Debug, Clone, Copy)]
pub enum LifecycleEvent<'a> {
    ModuleStart {
        job: JobContext,
        module: &'a str,
    },
    ModuleSettle {
        job: JobContext,
        module: &'a str,
        outcome: SettleOutcome,
    },
    Phase {
        job: JobContext,
        phase: Phase,
    },
}

/// Observer of module and phase events.
///
/// Events may arrive concurrently from several worker threads of the engine.
pub trait BuildObserver: Send + Sync + fmt::Debug {
    fn on_module_start(&self, _job: &JobContext, _module: &str) {}

    fn on_module_settle(&self, _job: &JobContext, _module: &str, _outcome: SettleOutcome) {}

    fn on_phase_boundary(&self, _job: &JobContext, _phase: Phase) {}
}

/// Hook run when the engine assigns chunk ids.
pub trait ChunkOrderHook: Send + Sync + fmt::Debug {
    fn optimize_chunk_order(&self, table: ChunkIdTable) -> ChunkIdTable;
}

/// Observers and chunk-order hooks of one build configuration
#[derive(Debug, Default, Clone)]
pub struct LifecycleRegistry {
    observers: Vec<Arc<dyn BuildObserver>>,
    chunk_order: Vec<Arc<dyn ChunkOrderHook>>,
}

impl LifecycleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_observer(&mut self, observer: Arc<dyn BuildObserver>) {
        self.observers.push(observer);
    }

    pub fn register_chunk_order_hook(&mut self, hook: Arc<dyn ChunkOrderHook>) {
        self.chunk_order.push(hook);
    }

    /// Deliver `event` to every observer, in registration order.
    pub fn dispatch(&self, event: LifecycleEvent<'_>) {
        for observer in &self.observers {
            match event {
                LifecycleEvent::ModuleStart { job, module } => {
                    observer.on_module_start(&job, module)
                }
                LifecycleEvent::ModuleSettle {
                    job,
                    module,
                    outcome,
                } => observer.on_module_settle(&job, module, outcome),
                LifecycleEvent::Phase { job, phase } => observer.on_phase_boundary(&job, phase),
            }
        }
    }

    /// Fold `table` through every chunk-order hook.
    pub fn optimize_chunk_order(&self, table: ChunkIdTable) -> ChunkIdTable {
        self.chunk_order
            .iter()
            .fold(table, |table, hook| hook.optimize_chunk_order(table))
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn chunk_order_hook_count(&self) -> usize {
        self.chunk_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty() && self.chunk_order.is_empty()
    }
}
