//! Component-scoped async tasks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every network call a screen makes belongs to that screen. When the owning
//! component unmounts, in-flight calls are aborted so no signal is written
//! after its owner is gone. Handles of finished tasks are dropped on the next
//! spawn, so a long-lived screen does not accumulate them.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::AbortHandle;
use leptos::prelude::*;

struct TrackedTask {
    handle: AbortHandle,
    done: Arc<AtomicBool>,
}

impl TrackedTask {
    fn is_live(&self) -> bool {
        !self.handle.is_aborted() && !self.done.load(Ordering::Acquire)
    }
}

/// Abort handles for one component, aborted in its `on_cleanup`.
#[derive(Clone, Copy)]
pub struct TaskScope {
    tasks: StoredValue<Vec<TrackedTask>>,
}

impl TaskScope {
    /// Create a scope tied to the current reactive owner.
    pub fn new() -> Self {
        let scope = Self::detached();
        on_cleanup(move || scope.abort_all());
        scope
    }

    fn detached() -> Self {
        Self { tasks: StoredValue::new(Vec::new()) }
    }

    /// Register `fut` and return the future to run in its place.
    fn track<F>(self, fut: F) -> impl Future<Output = ()> + 'static
    where
        F: Future<Output = ()> + 'static,
    {
        let (task, handle) = futures::future::abortable(fut);
        let done = Arc::new(AtomicBool::new(false));
        let finished = Arc::clone(&done);
        self.tasks.try_update_value(|tasks| {
            tasks.retain(TrackedTask::is_live);
            tasks.push(TrackedTask { handle, done });
        });
        async move {
            if task.await.is_ok() {
                finished.store(true, Ordering::Release);
            }
        }
    }

    /// Spawn `fut` on the local executor; it is dropped if the scope is cleaned up first.
    pub fn spawn<F>(self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let task = self.track(fut);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(task);
        #[cfg(not(feature = "hydrate"))]
        drop(task);
    }

    pub fn abort_all(self) {
        self.tasks.try_update_value(|tasks| {
            for task in tasks.drain(..) {
                task.handle.abort();
            }
        });
    }

    #[cfg(test)]
    fn pending(self) -> usize {
        self.tasks.try_with_value(|tasks| tasks.iter().filter(|t| t.is_live()).count()).unwrap_or_default()
    }

    #[cfg(test)]
    fn retained(self) -> usize {
        self.tasks.try_with_value(Vec::len).unwrap_or_default()
    }
}

impl Default for TaskScope {
    fn default() -> Self {
        Self::new()
    }
}
