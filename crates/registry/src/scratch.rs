//! Per-worker scratch arrays for sweeps over the whole block id space.
//!
//! Until content is frozen the block id space can still grow, so every
//! request gets a fresh array. After the freeze each worker keeps one buffer
//! and hands it out again, zeroed, on the next request.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

thread_local! {
    static POOLED: RefCell<Option<Vec<i32>>> = const { RefCell::new(None) };
}

/// A zeroed `i32` per block id. Derefs to a slice.
///
/// A pooled buffer goes back to its worker's pool when dropped, so the guard
/// cannot leave the thread it was taken on.
pub struct ScratchBuffer {
    data: Vec<i32>,
    pooled: bool,
    _not_send: PhantomData<*const ()>,
}

impl ScratchBuffer {
    /// Whether this buffer came from (and will return to) the worker pool.
    pub fn is_pooled(&self) -> bool {
        self.pooled
    }
}

impl Deref for ScratchBuffer {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.data
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        if !self.pooled {
            return;
        }
        let data = std::mem::take(&mut self.data);
        // try_with: the pool may already be gone during thread teardown.
        let _ = POOLED.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.is_none() {
                *pool = Some(data);
            }
        });
    }
}

/// Hand out a zeroed buffer of `len` slots.
pub(crate) fn take(frozen: bool, len: usize) -> ScratchBuffer {
    if !frozen {
        return ScratchBuffer {
            data: vec![0; len],
            pooled: false,
            _not_send: PhantomData,
        };
    }

    let data = match POOLED.with(|pool| pool.borrow_mut().take()) {
        Some(mut data) => {
            data.clear();
            data.resize(len, 0);
            data
        }
        None => vec![0; len],
    };
    ScratchBuffer {
        data,
        pooled: true,
        _not_send: PhantomData,
    }
}
