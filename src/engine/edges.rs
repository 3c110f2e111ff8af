use std::collections::HashSet;

use eframe::egui::{Pos2, Vec2};

use super::node::{NODE_BOX, Node};
use super::proximity::connected;
use super::resolver::GroupKey;

/// Edges are drawn between node centers rather than box origins.
pub const RENDER_ANCHOR: Vec2 = Vec2::splat(NODE_BOX / 2.0);

/// Unordered pair of node indices, stored with `low < high`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePair {
    low: usize,
    high: usize,
}

impl NodePair {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(self) -> usize {
        self.low
    }

    pub fn high(self) -> usize {
        self.high
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub pair: NodePair,
    pub from: Pos2,
    pub to: Pos2,
}

/// A request for a message keyed by a set of member nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub key: GroupKey,
    pub members: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct EdgeSet {
    pub edges: Vec<Edge>,
    pub pairs: HashSet<NodePair>,
    /// Pairs connected now that were not connected in `previous`.
    pub formed: Vec<Trigger>,
}

pub fn build_edge_set(nodes: &[Node], previous: &HashSet<NodePair>) -> EdgeSet {
    let mut set = EdgeSet::default();

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (a, b) = (&nodes[i], &nodes[j]);
            if !connected(a.position, b.position) {
                continue;
            }

            let pair = NodePair::new(i, j);
            set.edges.push(Edge {
                pair,
                from: a.position + RENDER_ANCHOR,
                to: b.position + RENDER_ANCHOR,
            });
            set.pairs.insert(pair);

            if !previous.contains(&pair) {
                set.formed.push(Trigger {
                    key: GroupKey::from_labels([&a.label, &b.label]),
                    members: vec![i, j],
                });
            }
        }
    }

    set
}
