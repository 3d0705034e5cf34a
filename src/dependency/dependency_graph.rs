use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

/// Directed call graph: an edge `caller -> callee` for every call or function
/// pointer naming `callee` inside `caller`'s body. Nodes and edges iterate in
/// insertion order.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

/// One frame of the depth-first search: a node on the current path and the
/// index of the next edge to follow from it.
struct Frame {
    node: usize,
    next_edge: usize,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    pub fn add_node(&mut self, name: &str) {
        if !self.edges.contains_key(name) {
            self.edges.insert(name.to_string(), IndexSet::new());
        }
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);
        if let Some(callees) = self.edges.get_mut(from) {
            callees.insert(to.to_string());
        }
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges
            .get(from)
            .map(|callees| callees.contains(to))
            .unwrap_or(false)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn callees(&self, name: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(name)
            .into_iter()
            .flat_map(|callees| callees.iter().map(String::as_str))
    }

    fn name(&self, node: usize) -> String {
        self.edges
            .get_index(node)
            .map(|(name, _)| name.clone())
            .unwrap_or_default()
    }

    fn edge_count(&self, node: usize) -> usize {
        self.edges
            .get_index(node)
            .map(|(_, callees)| callees.len())
            .unwrap_or(0)
    }

    fn edge_target(&self, node: usize, edge: usize) -> Option<usize> {
        let (_, callees) = self.edges.get_index(node)?;
        let callee = callees.get_index(edge)?;
        self.edges.get_index_of(callee)
    }

    /// Every elementary cycle of the graph, self-loops included.
    ///
    /// Each cycle is listed once, starting at its earliest inserted node and
    /// following the edges until the path closes on that node again.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = vec![];

        for start in 0..self.edges.len() {
            let mut stack = vec![Frame {
                node: start,
                next_edge: 0,
            }];
            let mut on_path: HashSet<usize> = HashSet::from([start]);

            while let Some(frame) = stack.last_mut() {
                let node = frame.node;
                let edge = frame.next_edge;
                frame.next_edge += 1;

                let Some(target) = self.edge_target(node, edge) else {
                    if edge >= self.edge_count(node) {
                        on_path.remove(&node);
                        stack.pop();
                    }
                    continue;
                };

                // Cycles through a node inserted before `start` were already
                // found when that node was the start.
                if target < start {
                    continue;
                }
                if target == start {
                    cycles.push(stack.iter().map(|frame| self.name(frame.node)).collect());
                    continue;
                }
                if on_path.insert(target) {
                    stack.push(Frame {
                        node: target,
                        next_edge: 0,
                    });
                }
            }
        }

        cycles
    }
}
