mod clock;
mod edges;
mod groups;
mod messages;
mod node;
mod proximity;
mod resolver;

use std::collections::HashSet;
use std::time::Duration;

use eframe::egui::{Pos2, Vec2};
use log::debug;

use crate::concepts::{ConceptTable, Dataset};

pub use clock::MonotonicClock;
pub use edges::RENDER_ANCHOR;
pub use messages::{ConceptMessage, FADE_AT, MessagePhase, REMOVE_AT};
pub use node::NODE_BOX;
pub use resolver::GroupKey;

use clock::Clock;
use edges::{Edge, NodePair, Trigger, build_edge_set};
use groups::connected_components;
use messages::MessageBoard;
use node::Node;
use resolver::{emits_group_message, resolve_concept};

#[cfg(test)]
use clock::ManualClock;

/// A maximal set of nodes reachable through the current tick's edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub members: Vec<usize>,
    pub key: GroupKey,
}

/// Owns the node set and everything derived from it each tick.
///
/// All mutation happens through [`advance_tick`](Self::advance_tick),
/// [`drag_node`](Self::drag_node) and [`update_messages`](Self::update_messages),
/// each of which runs to completion before returning.
pub struct GroupingEngine<C: Clock = MonotonicClock> {
    clock: C,
    nodes: Vec<Node>,
    concepts: ConceptTable,
    edges: Vec<Edge>,
    groups: Vec<Group>,
    active_pairs: HashSet<NodePair>,
    announced_groups: HashSet<GroupKey>,
    board: MessageBoard,
    tick_count: u64,
}

impl<C: Clock> GroupingEngine<C> {
    pub fn new(dataset: &Dataset, clock: C) -> Self {
        Self {
            clock,
            nodes: dataset.nodes.iter().map(Node::from_seed).collect(),
            concepts: dataset.concept_table(),
            edges: Vec::new(),
            groups: Vec::new(),
            active_pairs: HashSet::new(),
            announced_groups: HashSet::new(),
            board: MessageBoard::default(),
            tick_count: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn active_pairs(&self) -> &HashSet<NodePair> {
        &self.active_pairs
    }

    pub fn messages(&self) -> &[ConceptMessage] {
        self.board.messages()
    }

    pub fn pending_transitions(&self) -> usize {
        self.board.pending_transitions()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn node_at(&self, point: Pos2) -> Option<usize> {
        self.nodes.iter().rposition(|node| node.contains(point))
    }

    /// Moves every node one step inside `bounds`, then recomputes.
    pub fn advance_tick(&mut self, bounds: Vec2) {
        for node in &mut self.nodes {
            node.advance(bounds);
        }
        self.tick_count += 1;
        self.recompute();
    }

    /// Overwrites one node's position and recomputes without moving the rest.
    pub fn drag_node(&mut self, index: usize, position: Pos2) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.position = position;
        self.recompute();
    }

    /// Applies decay transitions that have come due since the last call.
    pub fn update_messages(&mut self) {
        self.board.advance(self.clock.now());
    }

    fn recompute(&mut self) {
        let now = self.clock.now();
        let edge_set = build_edge_set(&self.nodes, &self.active_pairs);

        for formed in &edge_set.formed {
            debug!("pair formed: {}", formed.key);
        }

        let groups = connected_components(self.nodes.len(), &edge_set.edges)
            .into_iter()
            .map(|members| Group {
                key: GroupKey::from_labels(members.iter().map(|&index| &self.nodes[index].label)),
                members,
            })
            .collect::<Vec<_>>();

        let group_triggers = groups
            .iter()
            .filter(|group| emits_group_message(group.members.len()))
            .map(|group| Trigger {
                key: group.key.clone(),
                members: group.members.clone(),
            })
            .collect::<Vec<_>>();

        let announced = group_triggers
            .iter()
            .map(|trigger| trigger.key.clone())
            .collect::<HashSet<_>>();
        for key in announced.difference(&self.announced_groups) {
            debug!("group formed: {key}");
        }

        for trigger in edge_set.formed.iter().chain(&group_triggers) {
            self.trigger(trigger, now);
        }

        self.edges = edge_set.edges;
        self.groups = groups;
        self.announced_groups = announced;
        self.active_pairs = edge_set.pairs;

        self.board.advance(now);
    }

    fn trigger(&mut self, trigger: &Trigger, now: Duration) {
        let text = resolve_concept(&self.concepts, &trigger.key);
        let anchor = self.centroid(&trigger.members);
        self.board.trigger(trigger.key.clone(), text, anchor, now);
    }

    fn centroid(&self, members: &[usize]) -> Pos2 {
        let positions = members
            .iter()
            .filter_map(|&index| self.nodes.get(index))
            .map(|node| node.position.to_vec2())
            .collect::<Vec<_>>();
        if positions.is_empty() {
            return Pos2::ZERO;
        }
        let sum = positions.iter().fold(Vec2::ZERO, |sum, position| sum + *position);
        (sum / positions.len() as f32).to_pos2()
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    const PAIR_TEXT: &str = "Meaning and power are co-constructed.";
    const QUAD_TEXT: &str =
        "Meaning, power, performativity, and desire rupture and reassemble the conditions of thought.";

    fn still_dataset(positions: [(f32, f32); 4]) -> Dataset {
        let mut dataset = Dataset::builtin();
        for (seed, (x, y)) in dataset.nodes.iter_mut().zip(positions) {
            seed.x = x;
            seed.y = y;
            seed.dx = 0.0;
            seed.dy = 0.0;
        }
        dataset
    }

    fn far_apart() -> [(f32, f32); 4] {
        [(0.0, 0.0), (600.0, 0.0), (0.0, 600.0), (600.0, 600.0)]
    }

    fn engine(positions: [(f32, f32); 4]) -> (GroupingEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::default();
        clock.set(Duration::from_secs(100));
        (GroupingEngine::new(&still_dataset(positions), clock.clone()), clock)
    }

    fn index_of(engine: &GroupingEngine<ManualClock>, label: &str) -> usize {
        engine
            .nodes()
            .iter()
            .position(|node| node.label == label)
            .expect("label exists")
    }

    const BOUNDS: Vec2 = vec2(2000.0, 2000.0);

    #[test]
    fn far_apart_nodes_produce_nothing() {
        let (mut engine, _clock) = engine(far_apart());
        engine.advance_tick(BOUNDS);

        assert!(engine.edges().is_empty());
        assert!(engine.messages().is_empty());
        assert!(engine.active_pairs().is_empty());
        assert_eq!(engine.groups().len(), 4);
        assert!(engine.groups().iter().all(|group| group.members.len() == 1));
    }

    #[test]
    fn closing_pair_emits_one_message() {
        let (mut engine, _clock) = engine(far_apart());
        engine.advance_tick(BOUNDS);

        let foucault = index_of(&engine, "Foucault");
        engine.drag_node(foucault, pos2(100.0, 0.0));

        assert_eq!(engine.edges().len(), 1);
        assert_eq!(engine.messages().len(), 1);
        let message = &engine.messages()[0];
        assert_eq!(message.text, PAIR_TEXT);
        assert_eq!(message.key.as_str(), "Derrida ↔ Foucault");
        assert_eq!(message.anchor, pos2(50.0, 0.0));
        assert!(message.highlight);
    }

    #[test]
    fn persisting_pair_triggers_once() {
        let (mut engine, clock) = engine(far_apart());
        let foucault = index_of(&engine, "Foucault");
        engine.drag_node(foucault, pos2(100.0, 0.0));
        let first = engine.messages()[0].id;

        for _ in 0..30 {
            clock.advance(Duration::from_millis(50));
            engine.advance_tick(BOUNDS);
        }
        assert_eq!(engine.messages().len(), 1);
        assert_eq!(engine.messages()[0].id, first);
        assert!(!engine.messages()[0].highlight);

        // Leaving and re-entering range forms the pair again.
        engine.drag_node(foucault, pos2(600.0, 0.0));
        assert!(engine.active_pairs().is_empty());
        engine.drag_node(foucault, pos2(120.0, 0.0));
        assert_eq!(engine.messages().len(), 1);
        assert!(engine.messages()[0].id > first);
        assert!(engine.messages()[0].highlight);
    }

    #[test]
    fn pair_message_decays_on_its_own_schedule() {
        let (mut engine, clock) = engine(far_apart());
        let foucault = index_of(&engine, "Foucault");
        engine.drag_node(foucault, pos2(100.0, 0.0));

        clock.advance(Duration::from_millis(2000));
        engine.advance_tick(BOUNDS);
        assert_eq!(engine.messages()[0].opacity, 0.0);

        clock.advance(Duration::from_millis(500));
        engine.update_messages();
        assert!(engine.messages().is_empty());
        assert_eq!(engine.edges().len(), 1);
    }

    #[test]
    fn full_quad_keeps_refreshing() {
        let cluster = [(0.0, 0.0), (50.0, 0.0), (0.0, 50.0), (50.0, 50.0)];
        let (mut engine, clock) = engine(cluster);
        engine.advance_tick(BOUNDS);

        assert_eq!(engine.groups().len(), 1);
        assert_eq!(engine.groups()[0].members.len(), 4);
        assert_eq!(engine.edges().len(), 6);
        // Six pair messages plus the quad.
        assert_eq!(engine.messages().len(), 7);

        for _ in 0..100 {
            clock.advance(Duration::from_millis(50));
            engine.advance_tick(BOUNDS);
        }

        assert_eq!(engine.messages().len(), 1);
        let quad = &engine.messages()[0];
        assert_eq!(quad.text, QUAD_TEXT);
        assert_eq!(quad.key.member_count(), 4);
        assert!(quad.highlight);
        assert_eq!(quad.opacity, 1.0);
        assert_eq!(quad.created_at, engine.now());
        assert_eq!(quad.anchor, pos2(25.0, 25.0));
    }

    #[test]
    fn trio_supersedes_its_pairs() {
        let positions = [(0.0, 0.0), (100.0, 0.0), (200.0, 0.0), (900.0, 900.0)];
        let (mut engine, clock) = engine(positions);
        engine.advance_tick(BOUNDS);

        let trio = GroupKey::from_labels(["Derrida", "Foucault", "Butler"]);
        assert!(engine.messages().iter().any(|message| message.key == trio));
        assert_eq!(engine.messages().len(), 3);

        clock.advance(Duration::from_millis(3000));
        engine.advance_tick(BOUNDS);
        assert_eq!(engine.messages().len(), 1);
        assert_eq!(engine.messages()[0].key, trio);
        assert_eq!(
            engine.messages()[0].text,
            "Power, discourse, and performativity destabilize meaning and identity."
        );
    }

    #[test]
    fn unmapped_trio_uses_fallback() {
        let raw = r#"{
            "nodes": [
                { "label": "Barad", "x": 0, "y": 0 },
                { "label": "Haraway", "x": 100, "y": 0 },
                { "label": "Braidotti", "x": 200, "y": 0 },
                { "label": "Spivak", "x": 900, "y": 900 },
                { "label": "Hooks", "x": 1500, "y": 900 }
            ],
            "concepts": { "Barad ↔ Haraway": "Situated knowledges diffract." }
        }"#;
        let dataset = Dataset::from_json(raw).expect("dataset should parse");
        let clock = ManualClock::default();
        let mut engine = GroupingEngine::new(&dataset, clock);
        engine.advance_tick(BOUNDS);

        let trio = GroupKey::from_labels(["Barad", "Braidotti", "Haraway"]);
        let message = engine
            .messages()
            .iter()
            .find(|message| message.key == trio)
            .expect("trio message");
        assert_eq!(message.text, resolver::FALLBACK_CONCEPT);

        let pair = GroupKey::from_labels(["Haraway", "Barad"]);
        let message = engine
            .messages()
            .iter()
            .find(|message| message.key == pair)
            .expect("pair message");
        assert_eq!(message.text, "Situated knowledges diffract.");
        assert_eq!(engine.groups().len(), 3);
    }

    #[test]
    fn ticks_move_nodes_and_bounce() {
        let dataset = Dataset::builtin();
        let mut engine = GroupingEngine::new(&dataset, ManualClock::default());
        engine.advance_tick(vec2(1280.0, 800.0));

        assert_eq!(engine.tick_count(), 1);
        assert_eq!(engine.nodes()[0].position, pos2(101.0, 201.0));
        assert_eq!(engine.nodes()[1].position, pos2(299.0, 101.0));

        // Dropped outside the canvas while already heading back in: no flip.
        engine.drag_node(0, pos2(-5.0, 10.0));
        engine.advance_tick(vec2(1280.0, 800.0));
        assert_eq!(engine.nodes()[0].position, pos2(-4.0, 11.0));
        assert_eq!(engine.nodes()[0].velocity.x, 1.0);

        engine.drag_node(1, pos2(0.0, 400.0));
        engine.advance_tick(vec2(1280.0, 800.0));
        assert_eq!(engine.nodes()[1].velocity, vec2(1.0, 1.0));
    }

    #[test]
    fn node_lookup_uses_node_boxes() {
        let (engine, _clock) = engine(far_apart());
        assert_eq!(engine.node_at(pos2(640.0, 40.0)), Some(1));
        assert_eq!(engine.node_at(pos2(300.0, 300.0)), None);
    }

    #[test]
    fn drag_ignores_unknown_nodes() {
        let (mut engine, _clock) = engine(far_apart());
        engine.drag_node(42, pos2(0.0, 0.0));
        assert_eq!(engine.tick_count(), 0);
        assert!(engine.edges().is_empty());
    }
}
