//! The graph & CPD store: node set, ordered parent lists, and CPDs.
//!
//! Every structural edit is checked against the DAG invariant before it is
//! applied, and every probability is range-checked on write. A rejected edit
//! leaves the store unchanged.

use std::collections::{HashMap, HashSet};

use cbn_core::config::EngineConfig;
use cbn_core::errors::{CbnResult, CpdError, GraphError};
use cbn_core::models::cpd::{self, Cpd};
use cbn_core::models::Combination;
use tracing::debug;

use crate::graph::{dag_enforcement, IndexedGraph};

/// A causal Bayesian network over binary variables.
#[derive(Debug, Clone, Default)]
pub struct CausalBayesianNetwork {
    /// Variable names in registration order.
    nodes: Vec<String>,
    /// child → ordered parents. Roots have no entry.
    parents: HashMap<String, Vec<String>>,
    /// Explicit CPDs. A missing entry selects the default policy.
    cpds: HashMap<String, Cpd>,
    config: EngineConfig,
}

impl CausalBayesianNetwork {
    /// Create an empty network with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with custom limits.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Rebuild a network from raw parts (e.g. a saved document), validating
    /// names, parent lists, acyclicity, and every CPD.
    pub fn from_parts(
        nodes: Vec<String>,
        parents: HashMap<String, Vec<String>>,
        cpds: HashMap<String, Cpd>,
        config: EngineConfig,
    ) -> CbnResult<Self> {
        let mut seen = HashSet::new();
        for name in &nodes {
            if !seen.insert(name.as_str()) {
                return Err(GraphError::DuplicateNode { name: name.clone() }.into());
            }
        }
        for (child, child_parents) in &parents {
            if !seen.contains(child.as_str()) {
                return Err(GraphError::UnknownNode {
                    name: child.clone(),
                }
                .into());
            }
            check_parent_list(child, child_parents, |p| seen.contains(p))?;
        }
        for name in cpds.keys() {
            if !seen.contains(name.as_str()) {
                return Err(GraphError::UnknownNode { name: name.clone() }.into());
            }
        }

        let parents: HashMap<String, Vec<String>> =
            parents.into_iter().filter(|(_, p)| !p.is_empty()).collect();
        let network = Self {
            nodes,
            parents,
            cpds,
            config,
        };

        let indexed = network.indexed();
        if let Some(scc) = dag_enforcement::find_cycles(&indexed).first() {
            let mut names: Vec<&str> = scc.iter().map(|&idx| indexed.name(idx)).collect();
            names.sort_unstable();
            return Err(GraphError::CycleDetected {
                path: names.join(" -> "),
            }
            .into());
        }
        for (name, cpd) in &network.cpds {
            cpd.validate(name, network.parents(name).len())?;
        }
        Ok(network)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    // --- Reads ---

    /// Variable names in registration order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ordered parents of `name`; empty for roots and unknown names.
    pub fn parents(&self, name: &str) -> &[String] {
        self.parents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The explicit CPD of `name`, if one is stored.
    pub fn cpd(&self, name: &str) -> Option<&Cpd> {
        self.cpds.get(name)
    }

    pub fn is_root(&self, name: &str) -> bool {
        self.parents(name).is_empty()
    }

    /// Nodes without parents, in registration order.
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| self.is_root(n))
            .map(String::as_str)
            .collect()
    }

    /// Nodes listing `name` as a parent, in registration order.
    pub fn children(&self, name: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| self.parents(n).iter().any(|p| p == name))
            .map(String::as_str)
            .collect()
    }

    /// `P(name = true | combination)` with the default identity/AND policy
    /// for non-roots without a CPD and `0.0` for roots without a prior.
    pub fn conditional(&self, name: &str, combination: &[bool]) -> f64 {
        match self.cpds.get(name) {
            Some(cpd) => cpd.probability(combination),
            None if self.is_root(name) => 0.0,
            None => cpd::default_conditional(combination),
        }
    }

    /// All nodes, parents before children.
    pub fn topological_order(&self) -> CbnResult<Vec<String>> {
        let indexed = self.indexed();
        dag_enforcement::topological_order(&indexed)
            .map(|order| {
                order
                    .into_iter()
                    .map(|idx| indexed.name(idx).to_string())
                    .collect()
            })
            .map_err(|idx| {
                GraphError::CycleDetected {
                    path: indexed.name(idx).to_string(),
                }
                .into()
            })
    }

    /// Fail with [`GraphError::UnknownNode`] if `name` is not registered.
    pub fn require(&self, name: &str) -> Result<(), GraphError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                name: name.to_string(),
            })
        }
    }

    // --- Writes ---

    /// Register `name` with ordered `parents` and an optional CPD.
    ///
    /// Without a CPD the default policy applies at read time. Re-adding an
    /// existing name replaces its parents and CPD and keeps its position.
    pub fn add_node(&mut self, name: &str, parents: &[&str], cpd: Option<Cpd>) -> CbnResult<()> {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        check_parent_list(name, &parents, |p| self.contains(p))?;
        // A new node has no children yet, so only re-registration can close a cycle.
        if self.contains(name) {
            self.check_acyclic(name, &parents)?;
        }
        if let Some(cpd) = &cpd {
            cpd.validate(name, parents.len())?;
        }

        if !self.contains(name) {
            self.nodes.push(name.to_string());
        }
        debug!(node = name, parents = ?parents, explicit_cpd = cpd.is_some(), "add node");
        self.store_parents(name, parents);
        match cpd {
            Some(cpd) => self.cpds.insert(name.to_string(), cpd),
            None => self.cpds.remove(name),
        };
        Ok(())
    }

    /// Register a root with a prior.
    pub fn add_root(&mut self, name: &str, prior: f64) -> CbnResult<()> {
        self.add_node(name, &[], Some(Cpd::Prior(prior)))
    }

    /// Replace the parent list of `child`. A changed list clears its CPD.
    pub fn set_parents(&mut self, child: &str, parents: &[&str]) -> CbnResult<()> {
        self.require(child)?;
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        check_parent_list(child, &parents, |p| self.contains(p))?;
        self.check_acyclic(child, &parents)?;
        if self.parents(child) != parents.as_slice() {
            debug!(node = child, parents = ?parents, "set parents, cpd cleared");
            self.store_parents(child, parents);
            self.cpds.remove(child);
        }
        Ok(())
    }

    /// Append `parent` to the parents of `child`.
    ///
    /// Returns `false` if the edge already exists. A new edge clears the
    /// child's CPD.
    pub fn add_edge(&mut self, parent: &str, child: &str) -> CbnResult<bool> {
        self.require(parent)?;
        self.require(child)?;
        if self.parents(child).iter().any(|p| p == parent) {
            return Ok(false);
        }
        let indexed = self.indexed();
        if let (Some(src), Some(dst)) = (indexed.get_node(parent), indexed.get_node(child)) {
            if let Some(path) = dag_enforcement::cycle_path(&indexed, src, dst) {
                debug!(parent, child, %path, "edge rejected");
                return Err(GraphError::CycleDetected { path }.into());
            }
        }
        self.parents
            .entry(child.to_string())
            .or_default()
            .push(parent.to_string());
        self.cpds.remove(child);
        debug!(parent, child, "add edge, cpd cleared");
        Ok(true)
    }

    /// Remove `parent` from the parents of `child`. A removed edge clears
    /// the child's CPD.
    pub fn remove_edge(&mut self, parent: &str, child: &str) -> CbnResult<bool> {
        self.require(child)?;
        let Some(list) = self.parents.get_mut(child) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|p| p != parent);
        if list.len() == before {
            return Ok(false);
        }
        if list.is_empty() {
            self.parents.remove(child);
        }
        self.cpds.remove(child);
        debug!(parent, child, "remove edge, cpd cleared");
        Ok(true)
    }

    /// Store a CPD, or clear it with `None`.
    pub fn set_cpd(&mut self, name: &str, cpd: Option<Cpd>) -> CbnResult<()> {
        self.require(name)?;
        match cpd {
            Some(cpd) => {
                cpd.validate(name, self.parents(name).len())?;
                self.cpds.insert(name.to_string(), cpd);
            }
            None => {
                self.cpds.remove(name);
            }
        }
        Ok(())
    }

    /// Set the prior of a root.
    pub fn set_prior(&mut self, name: &str, prior: f64) -> CbnResult<()> {
        self.set_cpd(name, Some(Cpd::Prior(prior)))
    }

    /// Set one table entry, creating the table if the node had none.
    ///
    /// Creating a table replaces the default policy: unlisted combinations
    /// then read as `0.0`.
    pub fn set_conditional(
        &mut self,
        name: &str,
        combination: Combination,
        probability: f64,
    ) -> CbnResult<()> {
        self.require(name)?;
        let width = self.parents(name).len();
        if combination.len() != width {
            return Err(CpdError::CombinationWidth {
                node: name.to_string(),
                expected: width,
                actual: combination.len(),
            }
            .into());
        }
        cpd::check_probability(name, probability)?;
        if width == 0 {
            self.cpds.insert(name.to_string(), Cpd::Prior(probability));
            return Ok(());
        }
        match self.cpds.get_mut(name) {
            Some(Cpd::Table(table)) => {
                table.insert(combination, probability);
            }
            _ => {
                self.cpds
                    .insert(name.to_string(), Cpd::table([(combination, probability)]));
            }
        }
        Ok(())
    }

    /// Drop the CPD of `name`, restoring the default policy.
    pub fn clear_cpd(&mut self, name: &str) -> CbnResult<()> {
        self.set_cpd(name, None)
    }

    /// Remove `name` and every edge touching it. Children that lose a parent
    /// have their CPD cleared; their names are returned.
    pub fn remove_node(&mut self, name: &str) -> CbnResult<Vec<String>> {
        self.require(name)?;
        self.nodes.retain(|n| n != name);
        self.parents.remove(name);
        self.cpds.remove(name);

        let mut affected = Vec::new();
        for (child, list) in self.parents.iter_mut() {
            let before = list.len();
            list.retain(|p| p != name);
            if list.len() != before {
                affected.push(child.clone());
            }
        }
        self.parents.retain(|_, list| !list.is_empty());
        for child in &affected {
            self.cpds.remove(child);
        }
        affected.sort_unstable();
        debug!(node = name, affected = ?affected, "remove node");
        Ok(affected)
    }

    /// Rename `old` to `new` everywhere it appears.
    pub fn rename_node(&mut self, old: &str, new: &str) -> CbnResult<()> {
        self.require(old)?;
        if old == new {
            return Ok(());
        }
        if self.contains(new) {
            return Err(GraphError::DuplicateNode {
                name: new.to_string(),
            }
            .into());
        }
        for n in self.nodes.iter_mut().filter(|n| n.as_str() == old) {
            *n = new.to_string();
        }
        if let Some(list) = self.parents.remove(old) {
            self.parents.insert(new.to_string(), list);
        }
        for list in self.parents.values_mut() {
            for p in list.iter_mut().filter(|p| p.as_str() == old) {
                *p = new.to_string();
            }
        }
        if let Some(cpd) = self.cpds.remove(old) {
            self.cpds.insert(new.to_string(), cpd);
        }
        debug!(old, new, "rename node");
        Ok(())
    }

    // --- Internals ---

    pub(crate) fn indexed(&self) -> IndexedGraph {
        IndexedGraph::from_parents(
            self.nodes.iter().map(String::as_str),
            self.parents.iter().map(|(k, v)| (k.as_str(), v.as_slice())),
        )
    }

    /// Reject a parent list for an existing `child` if any parent is the
    /// child itself or one of its descendants.
    fn check_acyclic(&self, child: &str, parents: &[String]) -> CbnResult<()> {
        let mut indexed = self.indexed();
        let dst = indexed.ensure_node(child);
        // Current incoming edges are replaced, so only outgoing reachability matters.
        for parent in parents {
            let src = indexed.ensure_node(parent);
            if let Some(path) = dag_enforcement::cycle_path(&indexed, src, dst) {
                return Err(GraphError::CycleDetected { path }.into());
            }
        }
        Ok(())
    }

    fn store_parents(&mut self, name: &str, parents: Vec<String>) {
        if parents.is_empty() {
            self.parents.remove(name);
        } else {
            self.parents.insert(name.to_string(), parents);
        }
    }
}

/// Parents must be registered and listed once. Self-reference is left to
/// the cycle check.
fn check_parent_list<F>(child: &str, parents: &[String], known: F) -> Result<(), GraphError>
where
    F: Fn(&str) -> bool,
{
    let mut seen = HashSet::new();
    for parent in parents {
        if !known(parent) {
            return Err(GraphError::UnknownNode {
                name: parent.clone(),
            });
        }
        if !seen.insert(parent.as_str()) {
            return Err(GraphError::DuplicateParent {
                child: child.to_string(),
                parent: parent.clone(),
            });
        }
    }
    Ok(())
}
