use super::dependency::DependencyGraph;
use crate::error::CircularDependencyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

struct Frame {
    node: usize,
    /// Index of the next dependency of `node` to visit.
    cursor: usize,
}

/// Computes a dependency-respecting visitation order.
///
/// Depth-first over dependencies with an explicit stack, so graph depth is
/// bounded by heap rather than by the call stack. Start nodes are taken in
/// input order and dependencies in edge order; the output is therefore a pure
/// function of the input ordering.
pub struct Scheduler<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
}

impl<'g, 'a> Scheduler<'g, 'a> {
    pub fn new(graph: &'g DependencyGraph<'a>) -> Self {
        Self { graph }
    }

    /// Returns node indices such that every dependency precedes its
    /// dependents, or the first cycle encountered.
    pub fn order(&self) -> Result<Vec<usize>, CircularDependencyError> {
        let node_count = self.graph.len();
        let mut marks = vec![Mark::Unvisited; node_count];
        let mut order = Vec::with_capacity(node_count);
        let mut stack: Vec<Frame> = Vec::new();

        for start in 0..node_count {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::InProgress;
            stack.push(Frame {
                node: start,
                cursor: 0,
            });

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                match self.graph.dependencies(node).get(frame.cursor) {
                    Some(&dependency) => {
                        frame.cursor += 1;
                        match marks[dependency] {
                            Mark::Done => {}
                            Mark::InProgress => {
                                return Err(self.cycle_through(&stack, dependency));
                            }
                            Mark::Unvisited => {
                                marks[dependency] = Mark::InProgress;
                                stack.push(Frame {
                                    node: dependency,
                                    cursor: 0,
                                });
                            }
                        }
                    }
                    None => {
                        marks[node] = Mark::Done;
                        order.push(node);
                        stack.pop();
                    }
                }
            }
        }

        Ok(order)
    }

    /// The in-progress path from the re-entered node back to itself.
    fn cycle_through(&self, stack: &[Frame], reentered: usize) -> CircularDependencyError {
        let start = stack
            .iter()
            .position(|frame| frame.node == reentered)
            .unwrap_or(0);
        let path = stack[start..]
            .iter()
            .map(|frame| self.graph.node_id(frame.node).to_string())
            .chain(std::iter::once(self.graph.node_id(reentered).to_string()))
            .collect();
        CircularDependencyError { path }
    }
}
