//! Thread-safe shared handles.
//!
//! Clone views of a node alias one store through these handles: a CPD edit
//! made through any view is visible through every other view.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use cbn_core::errors::{CbnError, CbnResult};
use cbn_core::models::{Assignment, CpdRow, NodeKind};

use crate::network::CausalBayesianNetwork;

/// An `Arc<RwLock<T>>` whose lock poisoning surfaces as
/// [`CbnError::Concurrency`].
#[derive(Debug, Default)]
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Acquire a read lock.
    pub fn read(&self) -> CbnResult<RwLockReadGuard<'_, T>> {
        self.inner
            .read()
            .map_err(|e| CbnError::Concurrency(e.to_string()))
    }

    /// Acquire a write lock.
    pub fn write(&self) -> CbnResult<RwLockWriteGuard<'_, T>> {
        self.inner
            .write()
            .map_err(|e| CbnError::Concurrency(e.to_string()))
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// The store shared by every view of a document.
pub type SharedNetwork = Shared<CausalBayesianNetwork>;

/// Per-node kind tags shared by every view of a document.
pub type SharedKinds = Shared<BTreeMap<String, NodeKind>>;

impl SharedNetwork {
    pub fn query(&self, name: &str, evidence: &Assignment) -> CbnResult<f64> {
        self.read()?.query(name, evidence)
    }

    pub fn intervention(
        &self,
        name: &str,
        interventions: &Assignment,
        evidence: &Assignment,
    ) -> CbnResult<f64> {
        self.read()?.intervention(name, interventions, evidence)
    }

    pub fn cpd_rows(&self, name: &str) -> CbnResult<Vec<CpdRow>> {
        self.read()?.cpd_rows(name)
    }

    pub fn marginal_probabilities(&self) -> CbnResult<BTreeMap<String, f64>> {
        self.read()?.marginal_probabilities()
    }
}

impl From<CausalBayesianNetwork> for SharedNetwork {
    fn from(network: CausalBayesianNetwork) -> Self {
        Self::new(network)
    }
}
