//! Bounded queue of runtime events, connecting adapters to the reactor.

use tokio::sync::mpsc;

use mailwatch_domain::error::MailwatchError;
use mailwatch_domain::event::RuntimeEvent;

/// Sending half of the runtime event queue.
///
/// Cloneable — one clone per producer (bus adapter, time-sync adapter, the
/// composition root). The reactor owns the single receiving half, so every
/// event is consumed exactly once and in publication order.
#[derive(Debug, Clone)]
pub struct EventQueue {
    sender: mpsc::Sender<RuntimeEvent>,
}

impl EventQueue {
    /// Create a queue with the given capacity.
    ///
    /// Returns the sending half and the receiver the reactor will consume.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<RuntimeEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    /// Publish one event, waiting for capacity when the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`MailwatchError::QueueClosed`] once the reactor has shut
    /// down; producers treat that as the signal to stop.
    pub async fn publish(&self, event: RuntimeEvent) -> Result<(), MailwatchError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| MailwatchError::QueueClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_events_in_publication_order() {
        let (queue, mut receiver) = EventQueue::bounded(8);

        queue.publish(RuntimeEvent::NetworkUp).await.unwrap();
        queue.publish(RuntimeEvent::BusConnected).await.unwrap();

        assert_eq!(receiver.recv().await, Some(RuntimeEvent::NetworkUp));
        assert_eq!(receiver.recv().await, Some(RuntimeEvent::BusConnected));
    }

    #[tokio::test]
    async fn should_merge_events_from_cloned_handles() {
        let (queue, mut receiver) = EventQueue::bounded(8);
        let other = queue.clone();

        queue.publish(RuntimeEvent::NetworkUp).await.unwrap();
        other.publish(RuntimeEvent::BusConnected).await.unwrap();

        assert_eq!(receiver.recv().await, Some(RuntimeEvent::NetworkUp));
        assert_eq!(receiver.recv().await, Some(RuntimeEvent::BusConnected));
    }

    #[tokio::test]
    async fn should_fail_with_queue_closed_after_receiver_drop() {
        let (queue, receiver) = EventQueue::bounded(8);
        drop(receiver);

        let result = queue.publish(RuntimeEvent::NetworkUp).await;
        assert!(matches!(result, Err(MailwatchError::QueueClosed)));
    }

    #[tokio::test]
    async fn should_close_the_channel_when_all_senders_drop() {
        let (queue, mut receiver) = EventQueue::bounded(8);
        queue.publish(RuntimeEvent::NetworkUp).await.unwrap();
        drop(queue);

        assert_eq!(receiver.recv().await, Some(RuntimeEvent::NetworkUp));
        assert_eq!(receiver.recv().await, None);
    }
}
