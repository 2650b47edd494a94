//! Algorithm registry.
//!
//! The set of algorithms is closed: [`AlgorithmId`] has one variant per
//! stable string id. A string is resolved to a variant once, at lookup time;
//! after that, each run is a single `match` that hands the typed input to the
//! concrete [`InstrumentedAlgorithm`] through a [`TraceEngine`].

use rand::Rng;
use serde::Serialize;

use crate::algorithms::{
    bfs::Bfs, binary_search::BinarySearch, bubble_sort::BubbleSort, dfs::Dfs,
    dijkstra::Dijkstra, insertion_sort::InsertionSort, merge_sort::MergeSort,
    quick_sort::QuickSort,
};
use crate::engine::TraceEngine;
use crate::error::EngineError;
use crate::input::Input;
use crate::step::{Snapshot, Trace};
use crate::traits::InstrumentedAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Sorting,
    Search,
    Graph,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Sorting => "Sorting",
            Category::Search => "Search",
            Category::Graph => "Graph",
        }
    }
}

/// Display metadata. Complexities are fixed strings, never measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Average-case time.
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub best_case: &'static str,
    pub worst_case: &'static str,
    /// Stability for sorts; `None` where it does not apply.
    pub stable: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AlgorithmId {
    BubbleSort,
    InsertionSort,
    QuickSort,
    MergeSort,
    BinarySearch,
    Bfs,
    Dfs,
    Dijkstra,
}

impl AlgorithmId {
    /// Registration order, which is also the listing order.
    pub const ALL: [AlgorithmId; 8] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::QuickSort,
        AlgorithmId::MergeSort,
        AlgorithmId::BinarySearch,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
    ];

    /// Resolve a stable string id.
    pub fn lookup(id: &str) -> Result<Self, EngineError> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.id() == id)
            .ok_or_else(|| EngineError::UnknownAlgorithm(id.to_string()))
    }

    pub fn id(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => BubbleSort.id(),
            AlgorithmId::InsertionSort => InsertionSort.id(),
            AlgorithmId::QuickSort => QuickSort.id(),
            AlgorithmId::MergeSort => MergeSort.id(),
            AlgorithmId::BinarySearch => BinarySearch.id(),
            AlgorithmId::Bfs => Bfs.id(),
            AlgorithmId::Dfs => Dfs.id(),
            AlgorithmId::Dijkstra => Dijkstra.id(),
        }
    }

    pub fn category(self) -> Category {
        match self {
            AlgorithmId::BubbleSort
            | AlgorithmId::InsertionSort
            | AlgorithmId::QuickSort
            | AlgorithmId::MergeSort => Category::Sorting,
            AlgorithmId::BinarySearch => Category::Search,
            AlgorithmId::Bfs | AlgorithmId::Dfs | AlgorithmId::Dijkstra => Category::Graph,
        }
    }

    /// Shape of [`Input`] this algorithm accepts.
    pub fn input_shape(self) -> &'static str {
        match self.category() {
            Category::Sorting => "keys",
            Category::Search => "search",
            Category::Graph => "graph",
        }
    }

    /// Upper bound on the number of steps one run over `input` records.
    pub fn max_steps(self, input: &Input) -> u128 {
        let n = input.size() as u128;
        match (self.category(), input) {
            (_, Input::Graph(g)) => 2 * g.edge_count() as u128 + n + 2,
            (Category::Search, _) => 2 * (log2_ceil(n) + 2) + 1,
            _ if self == AlgorithmId::MergeSort => 2 * n * log2_ceil(n) + 1,
            _ => n * n + 1,
        }
    }

    /// Upper bound on the values held by the snapshots of one run over
    /// `input`, the initial snapshot included.
    ///
    /// Every step owns a full snapshot, so this grows much faster than the
    /// input: cubically for the quadratic sorts.
    pub fn trace_cells(self, input: &Input) -> u128 {
        let n = input.size() as u128;
        let per_snapshot = match input {
            Input::Keys { .. } => n,
            Input::Search(_) => n + 6,
            Input::Graph(_) => 5 * n,
        };
        (self.max_steps(input) + 1).saturating_mul(per_snapshot.max(1))
    }

    pub fn info(self) -> AlgorithmInfo {
        let (name, description, time, space, best, worst, stable) = match self {
            AlgorithmId::BubbleSort => (
                "Bubble Sort",
                "Repeatedly steps through the list, compares adjacent elements and \
                 swaps them if they are in the wrong order.",
                "O(n²)",
                "O(1)",
                "O(n)",
                "O(n²)",
                Some(true),
            ),
            AlgorithmId::InsertionSort => (
                "Insertion Sort",
                "Grows a sorted prefix by swapping each new element left until it \
                 meets a key that is not larger.",
                "O(n²)",
                "O(1)",
                "O(n)",
                "O(n²)",
                Some(true),
            ),
            AlgorithmId::QuickSort => (
                "Quick Sort",
                "Partitions the range around its last element, then sorts the two \
                 sides independently.",
                "O(n log n)",
                "O(log n)",
                "O(n log n)",
                "O(n²)",
                Some(false),
            ),
            AlgorithmId::MergeSort => (
                "Merge Sort",
                "Splits the list in halves, sorts each half and merges the sorted \
                 halves back together.",
                "O(n log n)",
                "O(n)",
                "O(n log n)",
                "O(n log n)",
                Some(true),
            ),
            AlgorithmId::BinarySearch => (
                "Binary Search",
                "Halves a sorted window on every probe until the target is found or \
                 the window is empty.",
                "O(log n)",
                "O(1)",
                "O(1)",
                "O(log n)",
                None,
            ),
            AlgorithmId::Bfs => (
                "Breadth-First Search",
                "Explores the graph level by level from the start node using a queue.",
                "O(V + E)",
                "O(V)",
                "O(V + E)",
                "O(V + E)",
                None,
            ),
            AlgorithmId::Dfs => (
                "Depth-First Search",
                "Follows each branch as deep as possible before backtracking, using a \
                 stack.",
                "O(V + E)",
                "O(V)",
                "O(V + E)",
                "O(V + E)",
                None,
            ),
            AlgorithmId::Dijkstra => (
                "Dijkstra's Algorithm",
                "Settles nodes in order of shortest known distance from the source, \
                 relaxing every outgoing edge.",
                "O((V + E) log V)",
                "O(V)",
                "O((V + E) log V)",
                "O((V + E) log V)",
                None,
            ),
        };
        AlgorithmInfo {
            id: self.id(),
            name,
            category: self.category(),
            description,
            time_complexity: time,
            space_complexity: space,
            best_case: best,
            worst_case: worst,
            stable,
        }
    }

    fn mismatch(self) -> EngineError {
        EngineError::InputShapeMismatch {
            algorithm: self.id(),
            expected: self.input_shape(),
        }
    }

    /// Check shape and precondition without running.
    pub fn validate(self, input: &Input) -> Result<(), EngineError> {
        match (self, input) {
            (AlgorithmId::BubbleSort, Input::Keys { keys }) => BubbleSort.validate(keys),
            (AlgorithmId::InsertionSort, Input::Keys { keys }) => InsertionSort.validate(keys),
            (AlgorithmId::QuickSort, Input::Keys { keys }) => QuickSort.validate(keys),
            (AlgorithmId::MergeSort, Input::Keys { keys }) => MergeSort.validate(keys),
            (AlgorithmId::BinarySearch, Input::Search(s)) => BinarySearch.validate(s),
            (AlgorithmId::Bfs, Input::Graph(g)) => Bfs.validate(g),
            (AlgorithmId::Dfs, Input::Graph(g)) => Dfs.validate(g),
            (AlgorithmId::Dijkstra, Input::Graph(g)) => Dijkstra.validate(g),
            _ => Err(self.mismatch()),
        }
    }

    /// Snapshot shown for `input` before any trace exists.
    pub fn initial_snapshot(self, input: &Input) -> Result<Snapshot, EngineError> {
        match (self, input) {
            (AlgorithmId::BubbleSort, Input::Keys { keys }) => Ok(BubbleSort.initial_snapshot(keys)),
            (AlgorithmId::InsertionSort, Input::Keys { keys }) => {
                Ok(InsertionSort.initial_snapshot(keys))
            }
            (AlgorithmId::QuickSort, Input::Keys { keys }) => Ok(QuickSort.initial_snapshot(keys)),
            (AlgorithmId::MergeSort, Input::Keys { keys }) => Ok(MergeSort.initial_snapshot(keys)),
            (AlgorithmId::BinarySearch, Input::Search(s)) => Ok(BinarySearch.initial_snapshot(s)),
            (AlgorithmId::Bfs, Input::Graph(g)) => Ok(Bfs.initial_snapshot(g)),
            (AlgorithmId::Dfs, Input::Graph(g)) => Ok(Dfs.initial_snapshot(g)),
            (AlgorithmId::Dijkstra, Input::Graph(g)) => Ok(Dijkstra.initial_snapshot(g)),
            _ => Err(self.mismatch()),
        }
    }

    /// Run the algorithm eagerly and return its sealed trace.
    pub fn run(self, input: &Input) -> Result<Trace, EngineError> {
        match (self, input) {
            (AlgorithmId::BubbleSort, Input::Keys { keys }) => TraceEngine::new(BubbleSort).run(keys),
            (AlgorithmId::InsertionSort, Input::Keys { keys }) => {
                TraceEngine::new(InsertionSort).run(keys)
            }
            (AlgorithmId::QuickSort, Input::Keys { keys }) => TraceEngine::new(QuickSort).run(keys),
            (AlgorithmId::MergeSort, Input::Keys { keys }) => TraceEngine::new(MergeSort).run(keys),
            (AlgorithmId::BinarySearch, Input::Search(s)) => TraceEngine::new(BinarySearch).run(s),
            (AlgorithmId::Bfs, Input::Graph(g)) => TraceEngine::new(Bfs).run(g),
            (AlgorithmId::Dfs, Input::Graph(g)) => TraceEngine::new(Dfs).run(g),
            (AlgorithmId::Dijkstra, Input::Graph(g)) => TraceEngine::new(Dijkstra).run(g),
            _ => Err(self.mismatch()),
        }
    }

    /// Random valid input of `size` elements (or nodes).
    pub fn generate<R: Rng + ?Sized>(self, size: usize, rng: &mut R) -> Input {
        match self {
            AlgorithmId::BubbleSort => Input::from(BubbleSort.generate(size, rng)),
            AlgorithmId::InsertionSort => Input::from(InsertionSort.generate(size, rng)),
            AlgorithmId::QuickSort => Input::from(QuickSort.generate(size, rng)),
            AlgorithmId::MergeSort => Input::from(MergeSort.generate(size, rng)),
            AlgorithmId::BinarySearch => Input::from(BinarySearch.generate(size, rng)),
            AlgorithmId::Bfs => Input::from(Bfs.generate(size, rng)),
            AlgorithmId::Dfs => Input::from(Dfs.generate(size, rng)),
            AlgorithmId::Dijkstra => Input::from(Dijkstra.generate(size, rng)),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

fn log2_ceil(n: u128) -> u128 {
    (u128::BITS - n.saturating_sub(1).leading_zeros()) as u128
}

/// Metadata for every registered algorithm, in listing order.
pub fn catalog() -> Vec<AlgorithmInfo> {
    AlgorithmId::ALL.iter().map(|alg| alg.info()).collect()
}
