//! Per-thread script slots with spawn-time inheritance.
//!
//! A [`ScriptSlot`] holds one step supplier per thread. A thread's slots are
//! copied into a child only when the child is spawned through this module
//! ([`spawn`], [`Builder`]) or when a captured [`Inherited`] snapshot is run
//! explicitly. Later changes on either side are not seen by the other.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crate::program::Steps;

static NEXT_SLOT: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static SLOTS: RefCell<HashMap<u64, Steps>> = RefCell::new(HashMap::new());
}

/// One supplier per thread.
#[derive(Debug)]
pub struct ScriptSlot {
    id: u64,
}

impl ScriptSlot {
    pub fn new() -> Self {
        Self {
            id: NEXT_SLOT.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The current thread's supplier, if one was installed or inherited.
    pub fn get(&self) -> Option<Steps> {
        SLOTS.with(|slots| slots.borrow().get(&self.id).cloned())
    }

    pub fn set(&self, steps: Steps) -> Option<Steps> {
        SLOTS.with(|slots| slots.borrow_mut().insert(self.id, steps))
    }

    pub fn clear(&self) -> Option<Steps> {
        SLOTS.with(|slots| slots.borrow_mut().remove(&self.id))
    }
}

impl Default for ScriptSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a thread's slots, to be installed in a child thread.
#[derive(Debug, Clone, Default)]
pub struct Inherited {
    slots: HashMap<u64, Steps>,
}

/// Captures the current thread's slots.
pub fn capture() -> Inherited {
    Inherited {
        slots: SLOTS.with(|slots| slots.borrow().clone()),
    }
}

impl Inherited {
    /// Replaces the current thread's slots with this snapshot.
    pub fn install(self) {
        SLOTS.with(|slots| *slots.borrow_mut() = self.slots);
    }

    /// Runs `f` with this snapshot installed, restoring the previous slots
    /// afterwards, even if `f` panics.
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<HashMap<u64, Steps>>);

        impl Drop for Restore {
            fn drop(&mut self) {
                if let Some(previous) = self.0.take() {
                    // The thread-local may already be gone during thread teardown.
                    let _ = SLOTS.try_with(|slots| *slots.borrow_mut() = previous);
                }
            }
        }

        let previous = SLOTS.with(|slots| std::mem::replace(&mut *slots.borrow_mut(), self.slots));
        let _restore = Restore(Some(previous));
        f()
    }
}

/// Spawns a thread that inherits the caller's slots as they are now.
pub fn spawn<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let inherited = capture();
    thread::spawn(move || inherited.run(f))
}

/// [`std::thread::Builder`] that passes the caller's slots to the child.
#[derive(Debug)]
pub struct Builder {
    inner: thread::Builder,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            inner: thread::Builder::new(),
        }
    }

    pub fn name(self, name: String) -> Self {
        Self {
            inner: self.inner.name(name),
        }
    }

    pub fn stack_size(self, size: usize) -> Self {
        Self {
            inner: self.inner.stack_size(size),
        }
    }

    pub fn spawn<F, T>(self, f: F) -> io::Result<JoinHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let inherited = capture();
        self.inner.spawn(move || inherited.run(f))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
