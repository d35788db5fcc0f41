use crate::app::connection::{ConnectionManager, ConnectionState, LinkEvents};
use crate::hal::Platform;

pub mod connection;

pub struct App<'a> {
    platform: &'a dyn Platform,
    events: LinkEvents,
    connection: ConnectionManager,
}

impl<'a> App<'a> {
    pub fn new(platform: &'a dyn Platform, events: LinkEvents) -> Self {
        let connection = ConnectionManager::default();

        Self {
            platform,
            events,
            connection,
        }
    }

    pub fn update(&mut self) {
        while let Some(event) = self.events.pop() {
            self.connection.handle_event(event, self.platform.wifi());
        }
    }

    // True once an address is acquired; the firmware starts the HTTP server
    // on the first rising edge.
    pub fn is_online(&self) -> bool {
        self.connection.state() == ConnectionState::Connected
    }
}
