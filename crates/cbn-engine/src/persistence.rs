//! JSON persistence of documents and projects.
//!
//! A document saves as `{name, nodes, parents, cpds, positions, types}`
//! with table keys written as bitstrings and priors as bare numbers. A
//! project wraps its documents as `{"cbn_docs": [...]}`. Loading re-runs
//! every store check, so a file can never yield a cyclic or out-of-range
//! network. Aliasing between documents is not recorded: every loaded
//! document owns its store.

use std::collections::{BTreeMap, HashMap};

use cbn_core::config::CbnConfig;
use cbn_core::errors::{CbnError, CbnResult, PersistenceError};
use cbn_core::models::{Cpd, NodeKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{CausalBayesianNetworkDoc, Position};
use crate::network::CausalBayesianNetwork;

/// Saved form of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    pub name: String,
    pub nodes: Vec<String>,
    #[serde(default)]
    pub parents: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub cpds: BTreeMap<String, Cpd>,
    #[serde(default)]
    pub positions: BTreeMap<String, Vec<[f64; 2]>>,
    #[serde(default)]
    pub types: BTreeMap<String, NodeKind>,
}

/// Saved form of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub cbn_docs: Vec<DocRecord>,
}

impl DocRecord {
    /// Capture the current state of `doc`.
    pub fn from_doc(doc: &CausalBayesianNetworkDoc) -> CbnResult<Self> {
        let network = doc.network().read()?;
        let nodes = network.nodes().to_vec();
        let parents = nodes
            .iter()
            .map(|n| (n.clone(), network.parents(n).to_vec()))
            .collect();
        let cpds = nodes
            .iter()
            .filter_map(|n| network.cpd(n).map(|cpd| (n.clone(), cpd.clone())))
            .collect();
        // Another document sharing the store may have renamed or deleted a
        // node this document still has positions for.
        let positions = doc
            .positions()
            .iter()
            .filter(|(n, _)| network.contains(n))
            .map(|(n, list)| (n.clone(), list.iter().map(|&(x, y)| [x, y]).collect()))
            .collect();
        let types = doc
            .kinds()
            .read()?
            .iter()
            .filter(|(n, _)| network.contains(n))
            .map(|(n, kind)| (n.clone(), kind.clone()))
            .collect();
        Ok(Self {
            name: doc.name().to_string(),
            nodes,
            parents,
            cpds,
            positions,
            types,
        })
    }

    /// Rebuild a document, validating the record against the store rules.
    pub fn into_doc(self, config: &CbnConfig) -> CbnResult<CausalBayesianNetworkDoc> {
        let name = self.name;
        let malformed = |reason: String| -> CbnError {
            PersistenceError::Malformed {
                document: name.clone(),
                reason,
            }
            .into()
        };

        for key in self.positions.keys().chain(self.types.keys()) {
            if !self.nodes.contains(key) {
                return Err(malformed(format!("entry for unknown node {key}")));
            }
        }

        let parents: HashMap<String, Vec<String>> = self.parents.into_iter().collect();
        let cpds: HashMap<String, Cpd> = self.cpds.into_iter().collect();
        let network =
            CausalBayesianNetwork::from_parts(self.nodes, parents, cpds, config.engine.clone())
                .map_err(|e| malformed(e.to_string()))?;

        let positions: BTreeMap<String, Vec<Position>> = self
            .positions
            .into_iter()
            .map(|(n, list)| (n, list.into_iter().map(|[x, y]| (x, y)).collect()))
            .collect();
        debug!(doc = %name, nodes = network.len(), "loaded document");
        Ok(CausalBayesianNetworkDoc::from_parts(
            name,
            network,
            self.types,
            positions,
            config.document.clone(),
        ))
    }
}

/// Serialize one document as pretty JSON.
pub fn to_json(doc: &CausalBayesianNetworkDoc) -> CbnResult<String> {
    let record = DocRecord::from_doc(doc)?;
    serde_json::to_string_pretty(&record).map_err(|e| PersistenceError::Json(e).into())
}

/// Parse and validate one document.
pub fn from_json(json: &str, config: &CbnConfig) -> CbnResult<CausalBayesianNetworkDoc> {
    let record: DocRecord = serde_json::from_str(json).map_err(PersistenceError::Json)?;
    record.into_doc(config)
}

/// Serialize every document of a project.
pub fn export_project(docs: &[CausalBayesianNetworkDoc]) -> CbnResult<String> {
    let record = ProjectRecord {
        cbn_docs: docs
            .iter()
            .map(DocRecord::from_doc)
            .collect::<CbnResult<Vec<_>>>()?,
    };
    serde_json::to_string_pretty(&record).map_err(|e| PersistenceError::Json(e).into())
}

/// Parse and validate every document of a project.
pub fn import_project(json: &str, config: &CbnConfig) -> CbnResult<Vec<CausalBayesianNetworkDoc>> {
    let record: ProjectRecord = serde_json::from_str(json).map_err(PersistenceError::Json)?;
    debug!(docs = record.cbn_docs.len(), "import project");
    record
        .cbn_docs
        .into_iter()
        .map(|doc| doc.into_doc(config))
        .collect()
}
