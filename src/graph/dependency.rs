use crate::program::{ProgramDefinition, ProgramEdge};
use ahash::AHashMap;
use tracing::warn;

/// Forward and reverse adjacency for every node of a program.
///
/// Nodes are addressed by their index in `ProgramDefinition::nodes`, so
/// iteration order always follows the input order. Adjacency lists keep the
/// order of the edges that produced them.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    program: &'a ProgramDefinition,
    index: AHashMap<&'a str, usize>,
    dependencies: Vec<Vec<usize>>,
    dependents: Vec<Vec<usize>>,
    dropped_edges: Vec<&'a ProgramEdge>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph. Edges whose source or target is not a known node are
    /// dropped and recorded, never fatal.
    pub fn build(program: &'a ProgramDefinition) -> Self {
        let node_count = program.nodes.len();
        let index: AHashMap<&'a str, usize> = program
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut dependencies = vec![Vec::new(); node_count];
        let mut dependents = vec![Vec::new(); node_count];
        let mut dropped_edges = Vec::new();

        for edge in &program.edges {
            match (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) {
                (Some(&source), Some(&target)) => {
                    dependents[source].push(target);
                    dependencies[target].push(source);
                }
                _ => {
                    warn!(
                        edge_id = %edge.id,
                        source = %edge.source,
                        target = %edge.target,
                        "dropping edge that references an unknown node"
                    );
                    dropped_edges.push(edge);
                }
            }
        }

        Self {
            program,
            index,
            dependencies,
            dependents,
            dropped_edges,
        }
    }

    pub fn program(&self) -> &'a ProgramDefinition {
        self.program
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn index_of(&self, node_id: &str) -> Option<usize> {
        self.index.get(node_id).copied()
    }

    pub fn node_id(&self, index: usize) -> &'a str {
        &self.program.nodes[index].id
    }

    /// Nodes that must be evaluated before `index`.
    pub fn dependencies(&self, index: usize) -> &[usize] {
        &self.dependencies[index]
    }

    /// Nodes that consume the result of `index`.
    pub fn dependents(&self, index: usize) -> &[usize] {
        &self.dependents[index]
    }

    pub fn dropped_edges(&self) -> &[&'a ProgramEdge] {
        &self.dropped_edges
    }

    /// Nodes without incoming edges, in input order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.dependencies[i].is_empty())
            .collect()
    }

    /// Nodes without outgoing edges, in input order.
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.dependents[i].is_empty())
            .collect()
    }

    /// Weakly connected components, each listed in input order.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut component_of = vec![usize::MAX; self.len()];
        let mut components = Vec::new();
        for start in 0..self.len() {
            if component_of[start] != usize::MAX {
                continue;
            }
            let id = components.len();
            let mut members = Vec::new();
            let mut stack = vec![start];
            component_of[start] = id;
            while let Some(current) = stack.pop() {
                members.push(current);
                for &next in self.dependencies[current]
                    .iter()
                    .chain(&self.dependents[current])
                {
                    if component_of[next] == usize::MAX {
                        component_of[next] = id;
                        stack.push(next);
                    }
                }
            }
            members.sort_unstable();
            components.push(members);
        }
        components
    }
}
