use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// User callbacks run under catch_unwind, so a poisoned lock still guards a
// consistent value.

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
