use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::hal::wifi::Wifi;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Reconnecting,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LinkEvent {
    StackReady,
    Associated,
    Disconnected,
    AddressAcquired,
}

// Filled by the network stack's notification callbacks, drained by the main
// loop.
#[derive(Clone, Default)]
pub struct LinkEvents(Arc<Mutex<VecDeque<LinkEvent>>>);

impl LinkEvents {
    pub fn new() -> LinkEvents {
        LinkEvents::default()
    }

    pub fn push(&self, event: LinkEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push_back(event);
        }
    }

    pub fn pop(&self) -> Option<LinkEvent> {
        self.0.lock().ok()?.pop_front()
    }
}

// Every disconnect re-issues a connection attempt; no backoff, no retry
// limit.
#[derive(Default)]
pub struct ConnectionManager {
    state: ConnectionState,
}

impl ConnectionManager {
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn handle_event(&mut self, event: LinkEvent, wifi: &dyn Wifi) {
        match (self.state, event) {
            (ConnectionState::Idle, LinkEvent::StackReady) => {
                self.enter(ConnectionState::Connecting);
                self.start_attempt(wifi);
            }
            (ConnectionState::Connecting, LinkEvent::Associated) => {
                log::info!("Link is up, waiting for address");
            }
            (ConnectionState::Connecting, LinkEvent::AddressAcquired) => {
                self.enter(ConnectionState::Connected);
            }
            (_, LinkEvent::Disconnected) => {
                self.enter(ConnectionState::Reconnecting);
                self.start_attempt(wifi);
                self.enter(ConnectionState::Connecting);
            }
            (state, event) => {
                log::debug!("ignoring {event:?} while {state:?}");
            }
        }
    }

    fn enter(&mut self, state: ConnectionState) {
        if state != self.state {
            log::info!("{:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn start_attempt(&self, wifi: &dyn Wifi) {
        if let Err(e) = wifi.connect() {
            log::error!("{e}");
        }
    }
}
