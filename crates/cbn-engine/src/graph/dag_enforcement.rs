//! Cycle detection run before every structural edit.
//! Rejects any edge that would close a cycle in the DAG.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use super::indexed::IndexedGraph;

/// Render the cycle that `source → target` would close, e.g. `A -> B -> C -> A`.
/// Returns `None` when the edge is safe.
pub fn cycle_path(graph: &IndexedGraph, source: NodeIndex, target: NodeIndex) -> Option<String> {
    if source == target {
        let name = graph.name(source);
        return Some(format!("{name} -> {name}"));
    }

    // BFS from target back to source, remembering predecessors.
    let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([target]);
    let mut found = false;
    while let Some(node) = queue.pop_front() {
        if node == source {
            found = true;
            break;
        }
        for next in graph.graph.neighbors_directed(node, Direction::Outgoing) {
            if next != target && !predecessor.contains_key(&next) {
                predecessor.insert(next, node);
                queue.push_back(next);
            }
        }
    }
    if !found {
        return None;
    }

    let mut chain = vec![source];
    let mut cursor = source;
    while let Some(&prev) = predecessor.get(&cursor) {
        chain.push(prev);
        cursor = prev;
    }
    // chain runs source ← … ← target; the proposed edge closes it at source.
    chain.reverse();
    let mut names: Vec<&str> = vec![graph.name(source)];
    names.extend(chain.iter().map(|&idx| graph.name(idx)));
    Some(names.join(" -> "))
}

/// Validate the entire graph is a DAG.
/// Returns every strongly connected component that forms a cycle.
pub fn find_cycles(graph: &IndexedGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|&n| graph.graph.contains_edge(n, n))
        })
        .collect()
}

/// Nodes ordered so that every parent precedes its children.
/// Returns the offending node if the graph has a cycle.
pub fn topological_order(graph: &IndexedGraph) -> Result<Vec<NodeIndex>, NodeIndex> {
    toposort(&graph.graph, None).map_err(|cycle| cycle.node_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> IndexedGraph {
        let b = vec!["A".to_string()];
        let c = vec!["B".to_string()];
        IndexedGraph::from_parents(
            ["A", "B", "C"],
            [("B", b.as_slice()), ("C", c.as_slice())],
        )
    }

    #[test]
    fn closing_edge_is_detected_with_path() {
        let graph = chain();
        let a = graph.get_node("A").unwrap();
        let c = graph.get_node("C").unwrap();
        assert_eq!(cycle_path(&graph, c, a).as_deref(), Some("C -> A -> B -> C"));
    }

    #[test]
    fn forward_edge_is_safe() {
        let graph = chain();
        let a = graph.get_node("A").unwrap();
        let c = graph.get_node("C").unwrap();
        assert!(cycle_path(&graph, a, c).is_none());
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let graph = chain();
        let b = graph.get_node("B").unwrap();
        assert_eq!(cycle_path(&graph, b, b).as_deref(), Some("B -> B"));
    }

    #[test]
    fn closing_edge_in_a_diamond_names_one_path() {
        let b = vec!["A".to_string()];
        let c = vec!["A".to_string()];
        let d = vec!["B".to_string(), "C".to_string()];
        let graph = IndexedGraph::from_parents(
            ["A", "B", "C", "D"],
            [("B", b.as_slice()), ("C", c.as_slice()), ("D", d.as_slice())],
        );
        let a = graph.get_node("A").unwrap();
        let d = graph.get_node("D").unwrap();
        let path = cycle_path(&graph, d, a).unwrap();
        assert!(path.starts_with("D -> A -> "), "{path}");
        assert!(path.ends_with(" -> D"), "{path}");
        assert_eq!(path.matches("->").count(), 3);
        assert!(cycle_path(&graph, a, d).is_none());
    }

    #[test]
    fn topological_order_puts_parents_first() {
        let graph = chain();
        let order: Vec<&str> = topological_order(&graph)
            .unwrap()
            .into_iter()
            .map(|idx| graph.name(idx))
            .collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn find_cycles_reports_loops() {
        let a = vec!["B".to_string()];
        let b = vec!["A".to_string()];
        let graph =
            IndexedGraph::from_parents(["A", "B"], [("A", a.as_slice()), ("B", b.as_slice())]);
        assert_eq!(find_cycles(&graph).len(), 1);
        assert!(topological_order(&graph).is_err());
    }
}
