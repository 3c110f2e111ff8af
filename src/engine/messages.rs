use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use eframe::egui::Pos2;
use log::{debug, trace};

use super::resolver::GroupKey;

pub const HIGHLIGHT_FOR: Duration = Duration::from_millis(1000);
pub const FADE_AT: Duration = Duration::from_millis(2000);
pub const REMOVE_AT: Duration = Duration::from_millis(2500);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

/// `Highlighted -> Resting -> Fading`, then removed from the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessagePhase {
    Highlighted,
    Resting,
    Fading,
}

#[derive(Clone, Debug)]
pub struct ConceptMessage {
    pub id: MessageId,
    pub text: String,
    pub anchor: Pos2,
    pub key: GroupKey,
    pub opacity: f32,
    pub highlight: bool,
    pub created_at: Duration,
    pub phase: MessagePhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Transition {
    DropHighlight,
    FadeOut,
    Remove,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    due: Duration,
    id: MessageId,
    transition: Transition,
}

/// Live concept messages plus their pending decay transitions.
///
/// At most one message per `GroupKey` is live. Re-triggering a key replaces
/// the old message and cancels its pending transitions, so its decay clock
/// restarts from the new trigger time.
#[derive(Debug, Default)]
pub struct MessageBoard {
    messages: Vec<ConceptMessage>,
    pending: BinaryHeap<Reverse<Scheduled>>,
    next_id: u64,
}

impl MessageBoard {
    pub fn messages(&self) -> &[ConceptMessage] {
        &self.messages
    }

    pub fn trigger(
        &mut self,
        key: GroupKey,
        text: impl Into<String>,
        anchor: Pos2,
        now: Duration,
    ) -> MessageId {
        if let Some(position) = self.messages.iter().position(|message| message.key == key) {
            let retired = self.messages.remove(position);
            self.pending
                .retain(|Reverse(scheduled)| scheduled.id != retired.id);
            trace!("retired message {} for {}", retired.id.0, retired.key);
        }

        let id = MessageId(self.next_id);
        self.next_id += 1;

        for (delay, transition) in [
            (HIGHLIGHT_FOR, Transition::DropHighlight),
            (FADE_AT, Transition::FadeOut),
            (REMOVE_AT, Transition::Remove),
        ] {
            self.pending.push(Reverse(Scheduled {
                due: now + delay,
                id,
                transition,
            }));
        }

        let message = ConceptMessage {
            id,
            text: text.into(),
            anchor,
            key,
            opacity: 1.0,
            highlight: true,
            created_at: now,
            phase: MessagePhase::Highlighted,
        };
        debug!("message {} for {}: {}", id.0, message.key, message.text);
        self.messages.push(message);

        id
    }

    /// Applies every transition due at or before `now`; returns how many ran.
    pub fn advance(&mut self, now: Duration) -> usize {
        let mut applied = 0;

        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due > now {
                break;
            }
            let Some(Reverse(scheduled)) = self.pending.pop() else {
                break;
            };

            let Some(position) = self
                .messages
                .iter()
                .position(|message| message.id == scheduled.id)
            else {
                continue;
            };

            match scheduled.transition {
                Transition::DropHighlight => {
                    let message = &mut self.messages[position];
                    message.highlight = false;
                    message.phase = MessagePhase::Resting;
                }
                Transition::FadeOut => {
                    let message = &mut self.messages[position];
                    message.opacity = 0.0;
                    message.phase = MessagePhase::Fading;
                }
                Transition::Remove => {
                    self.messages.remove(position);
                }
            }
            trace!("message {} {:?}", scheduled.id.0, scheduled.transition);
            applied += 1;
        }

        applied
    }

    pub fn pending_transitions(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn key(labels: &[&str]) -> GroupKey {
        GroupKey::from_labels(labels)
    }

    #[test]
    fn decay_follows_the_fixed_schedule() {
        let mut board = MessageBoard::default();
        let t0 = ms(10_000);
        board.trigger(key(&["Derrida", "Foucault"]), "text", pos2(1.0, 2.0), t0);

        board.advance(t0 + ms(999));
        let message = &board.messages()[0];
        assert!(message.highlight);
        assert_eq!(message.opacity, 1.0);
        assert_eq!(message.phase, MessagePhase::Highlighted);

        board.advance(t0 + ms(1000));
        let message = &board.messages()[0];
        assert!(!message.highlight);
        assert_eq!(message.opacity, 1.0);
        assert_eq!(message.phase, MessagePhase::Resting);

        board.advance(t0 + ms(1999));
        assert_eq!(board.messages()[0].opacity, 1.0);

        board.advance(t0 + ms(2000));
        assert_eq!(board.messages()[0].opacity, 0.0);
        assert_eq!(board.messages()[0].phase, MessagePhase::Fading);

        board.advance(t0 + ms(2499));
        assert_eq!(board.messages().len(), 1);

        board.advance(t0 + ms(2500));
        assert!(board.messages().is_empty());
        assert_eq!(board.pending_transitions(), 0);
    }

    #[test]
    fn late_advance_applies_every_due_transition() {
        let mut board = MessageBoard::default();
        board.trigger(key(&["A", "B"]), "text", Pos2::ZERO, ms(0));
        assert_eq!(board.advance(ms(5000)), 3);
        assert!(board.messages().is_empty());
    }

    #[test]
    fn retrigger_replaces_and_restarts_the_clock() {
        let mut board = MessageBoard::default();
        let first = board.trigger(key(&["Foucault", "Derrida"]), "one", Pos2::ZERO, ms(0));

        board.advance(ms(1500));
        assert!(!board.messages()[0].highlight);

        let second = board.trigger(key(&["Derrida", "Foucault"]), "two", pos2(5.0, 5.0), ms(1500));
        assert!(second > first);
        assert_eq!(board.messages().len(), 1);
        assert_eq!(board.pending_transitions(), 3);

        let message = &board.messages()[0];
        assert_eq!(message.id, second);
        assert_eq!(message.text, "two");
        assert!(message.highlight);
        assert_eq!(message.opacity, 1.0);

        // The first message's removal time passes without touching the replacement.
        board.advance(ms(2500));
        assert_eq!(board.messages().len(), 1);
        assert!(!board.messages()[0].highlight);
        assert_eq!(board.messages()[0].opacity, 1.0);

        board.advance(ms(4000));
        assert!(board.messages().is_empty());
    }

    #[test]
    fn distinct_keys_decay_independently() {
        let mut board = MessageBoard::default();
        board.trigger(key(&["A", "B"]), "pair", Pos2::ZERO, ms(0));
        board.trigger(key(&["A", "B", "C"]), "trio", Pos2::ZERO, ms(2000));
        assert_eq!(board.messages().len(), 2);

        board.advance(ms(2500));
        assert_eq!(board.messages().len(), 1);
        assert_eq!(board.messages()[0].text, "trio");
        assert_eq!(board.messages()[0].key, key(&["C", "B", "A"]));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut board = MessageBoard::default();
        let ids = (0..5)
            .map(|step| board.trigger(key(&["A", "B"]), "text", Pos2::ZERO, ms(step * 100)))
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(board.messages().len(), 1);
        assert_eq!(board.messages()[0].id, ids[4]);
    }
}
