//! Caller-owned algorithm inputs.
//!
//! Inputs are cloned before a run, so the caller's copy stays valid for
//! re-runs (randomize, then reset, then run again).

use serde::{Deserialize, Serialize};

/// Weighted adjacency list with a start node and optional end node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    /// `adjacency[u]` lists `(v, weight)` edges leaving `u`.
    pub adjacency: Vec<Vec<(usize, i64)>>,
    pub start: usize,
    pub end: Option<usize>,
}

impl GraphInput {
    pub fn new(adjacency: Vec<Vec<(usize, i64)>>, start: usize, end: Option<usize>) -> Self {
        Self {
            adjacency,
            start,
            end,
        }
    }

    /// Build an undirected unit-weight graph from an edge list.
    pub fn undirected(nodes: usize, edges: &[(usize, usize)], start: usize) -> Self {
        let mut adjacency = vec![Vec::new(); nodes];
        for &(u, v) in edges {
            if u < nodes && v < nodes {
                adjacency[u].push((v, 1));
                adjacency[v].push((u, 1));
            }
        }
        Self::new(adjacency, start, None)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Input {
    /// Keys to sort.
    Keys { keys: Vec<i64> },
    /// Keys (sorted ascending) and the key to look for.
    Search(SearchInput),
    Graph(GraphInput),
}

impl Input {
    pub fn keys(keys: impl Into<Vec<i64>>) -> Self {
        Input::Keys { keys: keys.into() }
    }

    pub fn search(keys: impl Into<Vec<i64>>, target: i64) -> Self {
        Input::Search(SearchInput {
            keys: keys.into(),
            target,
        })
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Input::Keys { .. } => "keys",
            Input::Search(_) => "search",
            Input::Graph(_) => "graph",
        }
    }

    /// Number of elements or nodes.
    pub fn size(&self) -> usize {
        match self {
            Input::Keys { keys } => keys.len(),
            Input::Search(s) => s.keys.len(),
            Input::Graph(g) => g.node_count(),
        }
    }
}

/// Sorted keys plus the key to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    pub keys: Vec<i64>,
    pub target: i64,
}

impl From<SearchInput> for Input {
    fn from(value: SearchInput) -> Self {
        Input::Search(value)
    }
}

impl From<GraphInput> for Input {
    fn from(value: GraphInput) -> Self {
        Input::Graph(value)
    }
}

impl From<Vec<i64>> for Input {
    fn from(keys: Vec<i64>) -> Self {
        Input::Keys { keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_ignores_out_of_range_edges() {
        let g = GraphInput::undirected(3, &[(0, 1), (1, 2), (2, 7)], 0);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.adjacency[1], vec![(0, 1), (2, 1)]);
    }

    #[test]
    fn size_counts_elements_or_nodes() {
        assert_eq!(Input::keys(vec![3, 1, 2]).size(), 3);
        assert_eq!(Input::search(vec![1, 2], 2).size(), 2);
        let g: Input = GraphInput::undirected(5, &[], 0).into();
        assert_eq!(g.size(), 5);
        assert_eq!(g.shape(), "graph");
    }
}
