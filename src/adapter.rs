//! Renderer-agnostic projection of steps.
//!
//! A renderer never sees algorithm logic: for every step it receives a list
//! of positions and a style per group. Every position of the container is
//! covered exactly once; positions the step does not touch are `Normal`.

use serde::Serialize;

use crate::error::EngineError;
use crate::step::{NodeColor, Snapshot, Step, StepKind, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Style {
    Compared,
    Swapped,
    Visited,
    Current,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualAnnotation {
    pub target_positions: Vec<usize>,
    pub style: Style,
}

impl VisualAnnotation {
    fn new(style: Style, target_positions: Vec<usize>) -> Self {
        Self {
            target_positions,
            style,
        }
    }
}

/// Collects styled groups, dropping empty ones and filling the rest with `Normal`.
struct Projection {
    claimed: Vec<bool>,
    out: Vec<VisualAnnotation>,
}

impl Projection {
    fn new(len: usize) -> Self {
        Self {
            claimed: vec![false; len],
            out: Vec::new(),
        }
    }

    fn add(&mut self, style: Style, positions: impl IntoIterator<Item = usize>) {
        let mut targets = Vec::new();
        for p in positions {
            if p < self.claimed.len() && !self.claimed[p] {
                self.claimed[p] = true;
                targets.push(p);
            }
        }
        if !targets.is_empty() {
            self.out.push(VisualAnnotation::new(style, targets));
        }
    }

    fn finish(mut self) -> Vec<VisualAnnotation> {
        let rest: Vec<usize> = (0..self.claimed.len())
            .filter(|&p| !self.claimed[p])
            .collect();
        if !rest.is_empty() {
            self.out.push(VisualAnnotation::new(Style::Normal, rest));
        }
        self.out
    }
}

fn unsupported(kind: StepKind, container: &Snapshot) -> EngineError {
    EngineError::UnsupportedStepKind {
        kind: kind.name(),
        container: container.container_name(),
    }
}

/// Annotations for `step`, given the snapshot displayed before it.
pub fn project(step: &Step, prior: &Snapshot) -> Result<Vec<VisualAnnotation>, EngineError> {
    let kind = step.kind;
    let ops = &step.operands;
    let mut proj = Projection::new(step.snapshot.len());

    match (prior, &step.snapshot) {
        (Snapshot::Array { .. }, Snapshot::Array { keys }) => match kind {
            StepKind::Compare => proj.add(Style::Compared, ops.iter().copied()),
            StepKind::Swap | StepKind::Overwrite => proj.add(Style::Swapped, ops.iter().copied()),
            StepKind::Done => proj.add(Style::Visited, 0..keys.len()),
            StepKind::Visit | StepKind::Mark => return Err(unsupported(kind, prior)),
        },
        (Snapshot::Search(before), Snapshot::Search(after)) => match kind {
            StepKind::Compare => {
                proj.add(Style::Compared, ops.iter().copied());
                proj.add(Style::Current, before.low..before.high);
            }
            StepKind::Mark => proj.add(Style::Current, after.low..after.high),
            StepKind::Done => proj.add(Style::Visited, ops.iter().copied()),
            StepKind::Swap | StepKind::Overwrite | StepKind::Visit => {
                return Err(unsupported(kind, prior))
            }
        },
        (Snapshot::Graph(before), Snapshot::Graph(_)) => {
            match kind {
                StepKind::Compare => proj.add(Style::Compared, ops.iter().copied()),
                StepKind::Visit | StepKind::Done => proj.add(Style::Current, ops.iter().copied()),
                // Only the discovered node; its parent is context, not focus.
                StepKind::Mark => proj.add(Style::Current, ops.first().copied()),
                StepKind::Swap | StepKind::Overwrite => return Err(unsupported(kind, prior)),
            }
            let visited = before
                .colors
                .iter()
                .enumerate()
                .filter(|(_, &c)| c == NodeColor::Visited)
                .map(|(n, _)| n);
            proj.add(Style::Visited, visited);
        }
        _ => return Err(unsupported(kind, prior)),
    }

    Ok(proj.finish())
}

/// Annotations for a snapshot with no step applied (cursor `-1`).
pub fn project_idle(snapshot: &Snapshot) -> Vec<VisualAnnotation> {
    Projection::new(snapshot.len()).finish()
}

/// Annotations for the step under `cursor`, `-1` meaning the initial input.
pub fn project_cursor(trace: &Trace, cursor: isize) -> Result<Vec<VisualAnnotation>, EngineError> {
    if cursor < 0 {
        return Ok(project_idle(trace.initial_snapshot()));
    }
    match trace.step(cursor as usize) {
        Some(step) => project(step, trace.snapshot_at(cursor - 1)),
        None => Ok(project_idle(trace.snapshot_at(cursor))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{GraphState, SearchState};

    fn step(kind: StepKind, operands: Vec<usize>, snapshot: Snapshot) -> Step {
        Step {
            index: 0,
            kind,
            operands,
            value: None,
            note: String::new(),
            snapshot,
        }
    }

    #[test]
    fn compare_highlights_pair_and_normalizes_rest() {
        let snap = Snapshot::Array {
            keys: vec![5, 4, 3, 2],
        };
        let got = project(&step(StepKind::Compare, vec![1, 2], snap.clone()), &snap).unwrap();
        assert_eq!(
            got,
            vec![
                VisualAnnotation::new(Style::Compared, vec![1, 2]),
                VisualAnnotation::new(Style::Normal, vec![0, 3]),
            ]
        );
    }

    #[test]
    fn every_position_is_covered_once() {
        let mut prior = GraphState::new(4);
        prior.discover(0, None, 0);
        prior.settle(0);
        let mut after = prior.clone();
        after.discover(2, Some(0), 1);
        let got = project(
            &step(StepKind::Mark, vec![2, 0], Snapshot::Graph(after)),
            &Snapshot::Graph(prior),
        )
        .unwrap();
        let mut all: Vec<usize> = got
            .iter()
            .flat_map(|a| a.target_positions.iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3]);
        assert_eq!(got[0], VisualAnnotation::new(Style::Current, vec![2]));
        assert_eq!(got[1], VisualAnnotation::new(Style::Visited, vec![0]));
    }

    #[test]
    fn swap_on_graph_is_unsupported() {
        let snap = Snapshot::Graph(GraphState::new(2));
        let err = project(&step(StepKind::Swap, vec![0, 1], snap.clone()), &snap).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedStepKind {
                kind: "Swap",
                container: "graph"
            }
        );
    }

    #[test]
    fn mismatched_prior_is_unsupported() {
        let prior = Snapshot::Array { keys: vec![1] };
        let after = Snapshot::Graph(GraphState::new(1));
        assert!(project(&step(StepKind::Visit, vec![0], after), &prior).is_err());
    }

    #[test]
    fn idle_projection_is_all_normal() {
        let snap = Snapshot::Array { keys: vec![1, 2] };
        assert_eq!(
            project_idle(&snap),
            vec![VisualAnnotation::new(Style::Normal, vec![0, 1])]
        );
        assert!(project_idle(&Snapshot::Array { keys: vec![] }).is_empty());
    }

    #[test]
    fn every_kind_projects_or_is_refused_on_every_container() {
        let containers = [
            Snapshot::Array {
                keys: vec![4, 3, 2, 1],
            },
            Snapshot::Search(SearchState {
                keys: vec![1, 2, 3, 4],
                target: 3,
                low: 0,
                high: 4,
                probe: None,
                result: None,
            }),
            Snapshot::Graph(GraphState::new(4)),
        ];
        let mut supported = Vec::new();
        for snap in &containers {
            let mut count = 0;
            for kind in StepKind::ALL {
                match project(&step(kind, vec![1, 2], snap.clone()), snap) {
                    Ok(got) => {
                        let mut all: Vec<usize> = got
                            .iter()
                            .flat_map(|a| a.target_positions.iter().copied())
                            .collect();
                        all.sort_unstable();
                        assert_eq!(all, vec![0, 1, 2, 3], "{kind:?} on {}", snap.container_name());
                        count += 1;
                    }
                    Err(err) => assert_eq!(
                        err,
                        EngineError::UnsupportedStepKind {
                            kind: kind.name(),
                            container: snap.container_name()
                        }
                    ),
                }
            }
            supported.push(count);
        }
        assert_eq!(supported, vec![4, 3, 4]);
    }
}
