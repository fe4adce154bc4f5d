//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A small route enum for tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Settings,
    Profile(u32),
    Login,
    Help,
}

/// Shared, clonable log for capturing calls from inside closures.
#[derive(Clone)]
pub struct Recorder<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> Recorder<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, value: T) {
        self.inner.borrow_mut().push(value);
    }

    pub fn take(&self) -> Vec<T> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}
