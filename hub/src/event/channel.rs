use crossbeam::channel::{Receiver, Sender, unbounded};

use crate::event::Subscription;
use crate::extension::Extension;
use crate::hub::Hub;

/// Forwards every typed payload of one event into a channel, giving tests and
/// off-thread consumers a pull-based view of the event stream.
pub struct ChannelForwarder<P> {
    sender: Sender<P>,
}

impl<P: Extension + Clone> ChannelForwarder<P> {
    pub fn new(sender: Sender<P>) -> Self {
        Self { sender }
    }

    pub fn with_receiver() -> (Self, Receiver<P>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Subscribes the forwarder to `event` on `hub`. Payloads of other
    /// concrete types are skipped; a disconnected receiver drops payloads
    /// silently.
    pub fn attach(self, hub: &Hub, event: impl Into<String>) -> Subscription {
        let sender = self.sender;
        hub.on(event, move |payload: &P| {
            let _ = sender.try_send(payload.clone());
        })
    }
}
