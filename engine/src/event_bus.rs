use tokio::sync::mpsc;

use crate::event::GameEvent;
use crate::identifiers::{GameId, SubscriptionId};
use crate::log_debug;

pub type EventListener = Box<dyn FnMut(&GameEvent) + Send>;
pub type EventSender = mpsc::UnboundedSender<GameEvent>;

enum Subscriber {
    Listener(EventListener),
    Channel(EventSender),
}

/// Synchronous fan-out of game events, in subscription order.
///
/// Events tagged with a game id other than the active one are dropped at
/// dispatch. Channel subscribers whose receiver is gone are pruned.
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    active_game: Option<GameId>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("active_game", &self.active_game)
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_subscription: 0,
            active_game: None,
        }
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        id
    }

    pub fn subscribe(&mut self, listener: EventListener) -> SubscriptionId {
        let id = self.allocate_id();
        self.subscribers.push((id, Subscriber::Listener(listener)));
        id
    }

    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<GameEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.allocate_id();
        self.subscribers.push((id, Subscriber::Channel(sender)));
        (id, receiver)
    }

    /// Only stops delivery to this subscriber. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscription, _)| *subscription != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn active_game(&self) -> Option<GameId> {
        self.active_game
    }

    pub fn set_active_game(&mut self, game_id: Option<GameId>) {
        self.active_game = game_id;
    }

    /// Returns whether the event was dispatched.
    pub fn publish(&mut self, event: GameEvent) -> bool {
        if self.active_game != Some(event.game_id) {
            log_debug!("dropping stale {} event #{} of game {}", event.event_type, event.nr, event.game_id);
            return false;
        }

        self.subscribers.retain_mut(|(id, subscriber)| match subscriber {
            Subscriber::Listener(listener) => {
                listener(&event);
                true
            }
            Subscriber::Channel(sender) => {
                if sender.send(event.clone()).is_err() {
                    log_debug!("subscriber {} went away, removing it", id);
                    return false;
                }
                true
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::event::EventType;

    fn event(game_id: u64, nr: u64) -> GameEvent {
        GameEvent {
            game_id: GameId::new(game_id),
            nr,
            event_type: EventType::Move,
            msg: None,
            payload: None,
        }
    }

    fn recording_listener() -> (EventListener, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener: EventListener = Box::new(move |event: &GameEvent| {
            sink.lock().unwrap().push(event.nr);
        });
        (listener, seen)
    }

    #[test]
    fn test_fan_out_to_all_subscribers() {
        let mut bus = EventBus::new();
        bus.set_active_game(Some(GameId::new(1)));
        let (first, first_seen) = recording_listener();
        let (second, second_seen) = recording_listener();
        bus.subscribe(first);
        bus.subscribe(second);
        let (_, mut receiver) = bus.subscribe_channel();

        assert!(bus.publish(event(1, 0)));
        assert!(bus.publish(event(1, 1)));

        assert_eq!(*first_seen.lock().unwrap(), vec![0, 1]);
        assert_eq!(*second_seen.lock().unwrap(), vec![0, 1]);
        assert_eq!(receiver.try_recv().unwrap().nr, 0);
        assert_eq!(receiver.try_recv().unwrap().nr, 1);
    }

    #[test]
    fn test_stale_events_are_dropped() {
        let mut bus = EventBus::new();
        let (listener, seen) = recording_listener();
        bus.subscribe(listener);

        assert!(!bus.publish(event(1, 0)));
        bus.set_active_game(Some(GameId::new(2)));
        assert!(!bus.publish(event(1, 1)));
        assert!(bus.publish(event(2, 0)));

        assert_eq!(*seen.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_unsubscribe_only_stops_that_subscriber() {
        let mut bus = EventBus::new();
        bus.set_active_game(Some(GameId::new(1)));
        let (first, first_seen) = recording_listener();
        let (second, second_seen) = recording_listener();
        let first_id = bus.subscribe(first);
        bus.subscribe(second);

        bus.publish(event(1, 0));
        assert!(bus.unsubscribe(first_id));
        assert!(!bus.unsubscribe(first_id));
        bus.publish(event(1, 1));

        assert_eq!(*first_seen.lock().unwrap(), vec![0]);
        assert_eq!(*second_seen.lock().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut bus = EventBus::new();
        bus.set_active_game(Some(GameId::new(1)));
        let (_, receiver) = bus.subscribe_channel();
        drop(receiver);
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(event(1, 0));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
