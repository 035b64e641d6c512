//! Diagram documents over a shared network.
//!
//! A document pairs a [`SharedNetwork`] with per-node diagram positions and
//! kind tags. One node may be drawn several times (instances); every
//! instance reads the same variable. Documents holding clones of each
//! other's nodes alias one store and one kind map, while positions stay
//! per document.

use std::collections::BTreeMap;

use cbn_core::config::DocumentConfig;
use cbn_core::errors::{CbnResult, GraphError};
use cbn_core::models::NodeKind;
use tracing::{debug, warn};

use crate::network::CausalBayesianNetwork;
use crate::shared::{SharedKinds, SharedNetwork};

/// Diagram coordinates of one node instance.
pub type Position = (f64, f64);

/// A named causal Bayesian network diagram.
#[derive(Debug, Clone)]
pub struct CausalBayesianNetworkDoc {
    name: String,
    network: SharedNetwork,
    kinds: SharedKinds,
    positions: BTreeMap<String, Vec<Position>>,
    config: DocumentConfig,
}

impl CausalBayesianNetworkDoc {
    /// An empty document with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, DocumentConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: DocumentConfig) -> Self {
        Self {
            name: name.into(),
            network: SharedNetwork::default(),
            kinds: SharedKinds::default(),
            positions: BTreeMap::new(),
            config,
        }
    }

    /// Assemble a document from already-validated parts.
    pub fn from_parts(
        name: impl Into<String>,
        network: CausalBayesianNetwork,
        kinds: BTreeMap<String, NodeKind>,
        positions: BTreeMap<String, Vec<Position>>,
        config: DocumentConfig,
    ) -> Self {
        Self {
            name: name.into(),
            network: SharedNetwork::new(network),
            kinds: SharedKinds::new(kinds),
            positions,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the (possibly aliased) store.
    pub fn network(&self) -> &SharedNetwork {
        &self.network
    }

    pub fn kinds(&self) -> &SharedKinds {
        &self.kinds
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn positions(&self) -> &BTreeMap<String, Vec<Position>> {
        &self.positions
    }

    /// Drawn instances of `name`.
    pub fn instances(&self, name: &str) -> &[Position] {
        self.positions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kind tag of `name`, falling back to the configured default.
    pub fn kind(&self, name: &str) -> CbnResult<NodeKind> {
        Ok(self
            .kinds
            .read()?
            .get(name)
            .cloned()
            .unwrap_or_else(|| NodeKind::from(self.config.default_kind.as_str())))
    }

    /// Whether `other` shares this document's store.
    pub fn shares_network_with(&self, other: &Self) -> bool {
        self.network.ptr_eq(&other.network)
    }

    /// Place a new root variable with the default prior.
    pub fn add_variable(
        &mut self,
        name: &str,
        kind: Option<NodeKind>,
        position: Position,
    ) -> CbnResult<()> {
        {
            let mut network = self.network.write()?;
            if network.contains(name) {
                return Err(GraphError::DuplicateNode {
                    name: name.to_string(),
                }
                .into());
            }
            network.add_root(name, self.config.default_prior)?;
        }
        let kind = kind.unwrap_or_else(|| NodeKind::from(self.config.default_kind.as_str()));
        debug!(doc = %self.name, node = name, %kind, "add variable");
        self.kinds.write()?.insert(name.to_string(), kind);
        self.positions.insert(name.to_string(), vec![position]);
        Ok(())
    }

    /// Draw a causal edge, enforcing the relationship rules of node kinds.
    ///
    /// Returns `false` when the edge already exists.
    pub fn connect(&mut self, source: &str, target: &str) -> CbnResult<bool> {
        if source == target {
            return Err(GraphError::InvalidRelationship {
                from: source.to_string(),
                to: target.to_string(),
                reason: "a node cannot connect to itself".to_string(),
            }
            .into());
        }
        let from_kind = self.kind(source)?;
        let to_kind = self.kind(target)?;
        if let Some(reason) = from_kind.edge_violation(&to_kind) {
            warn!(from = source, to = target, reason, "relationship rejected");
            return Err(GraphError::InvalidRelationship {
                from: source.to_string(),
                to: target.to_string(),
                reason: reason.to_string(),
            }
            .into());
        }
        self.network.write()?.add_edge(source, target)
    }

    /// Remove `name` from the model, the kind map, and this diagram.
    /// Returns the children whose CPD was cleared.
    pub fn delete_node(&mut self, name: &str) -> CbnResult<Vec<String>> {
        let affected = self.network.write()?.remove_node(name)?;
        self.kinds.write()?.remove(name);
        self.positions.remove(name);
        Ok(affected)
    }

    /// Remove one drawn instance of `name`. The variable stays in the model.
    pub fn remove_instance(&mut self, name: &str, index: usize) -> CbnResult<Position> {
        let list = self
            .positions
            .get_mut(name)
            .filter(|list| index < list.len())
            .ok_or_else(|| GraphError::UnknownInstance {
                name: name.to_string(),
                index,
            })?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.positions.remove(name);
        }
        Ok(removed)
    }

    /// Rename a variable in the model, the kind map, and this diagram.
    pub fn rename_node(&mut self, old: &str, new: &str) -> CbnResult<()> {
        if old == new {
            return self.network.read()?.require(old).map_err(Into::into);
        }
        self.network.write()?.rename_node(old, new)?;
        {
            let mut kinds = self.kinds.write()?;
            if let Some(kind) = kinds.remove(old) {
                kinds.insert(new.to_string(), kind);
            }
        }
        if let Some(list) = self.positions.remove(old) {
            self.positions.insert(new.to_string(), list);
        }
        Ok(())
    }

    /// Move one drawn instance of `name`.
    pub fn move_instance(&mut self, name: &str, index: usize, position: Position) -> CbnResult<()> {
        let slot = self
            .positions
            .get_mut(name)
            .and_then(|list| list.get_mut(index))
            .ok_or_else(|| GraphError::UnknownInstance {
                name: name.to_string(),
                index,
            })?;
        *slot = position;
        Ok(())
    }

    /// Paste a clone of instance `index` of `name` from `source`.
    ///
    /// This document starts aliasing the source's store and kinds, so every
    /// later CPD or structure edit is visible through both. The clone is
    /// drawn at the source instance shifted by the configured offset.
    /// Returns the new instance index.
    pub fn clone_from(&mut self, source: &Self, name: &str, index: usize) -> CbnResult<usize> {
        source.network.read()?.require(name)?;
        let origin = source.instance_position(name, index)?;
        if !self.network.ptr_eq(&source.network) {
            if !self.network.read()?.is_empty() {
                warn!(doc = %self.name, from = %source.name, "clone replaces this document's store");
            }
            self.network = source.network.clone();
        }
        if !self.kinds.ptr_eq(&source.kinds) {
            self.kinds = source.kinds.clone();
        }
        self.push_clone(name, origin)
    }

    /// Paste a clone of instance `index` of `name` within this document.
    pub fn clone_instance(&mut self, name: &str, index: usize) -> CbnResult<usize> {
        self.network.read()?.require(name)?;
        let origin = self.instance_position(name, index)?;
        self.push_clone(name, origin)
    }

    /// Position of an instance; a node never drawn sits at the origin.
    fn instance_position(&self, name: &str, index: usize) -> CbnResult<Position> {
        match self.positions.get(name) {
            Some(list) if !list.is_empty() => list.get(index).copied().ok_or_else(|| {
                GraphError::UnknownInstance {
                    name: name.to_string(),
                    index,
                }
                .into()
            }),
            _ if index == 0 => Ok((0.0, 0.0)),
            _ => Err(GraphError::UnknownInstance {
                name: name.to_string(),
                index,
            }
            .into()),
        }
    }

    fn push_clone(&mut self, name: &str, origin: Position) -> CbnResult<usize> {
        let [dx, dy] = self.config.clone_offset;
        let list = self.positions.entry(name.to_string()).or_default();
        list.push((origin.0 + dx, origin.1 + dy));
        let index = list.len() - 1;
        debug!(doc = %self.name, node = name, index, "clone instance");
        Ok(index)
    }
}
