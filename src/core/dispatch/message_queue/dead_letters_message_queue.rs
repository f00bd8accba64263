use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::mailbox::dead_letter::DeadLetter;
use crate::core::dispatch::message_queue::{MessageQueueBehavior, MessageQueueSize, MessageQueueWriterBehavior};
use crate::infrastructure::logging_mutex::LoggingMutex;
use crate::mutex_lock_with_log;
use anyhow::Result;
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// Write-only queue that turns everything enqueued into a [`DeadLetter`].
///
/// Every letter is published to the receivers handed out by [`subscribe`](Self::subscribe).
/// The queue keeps no receiver of its own, so a letter nobody subscribed to is logged and
/// dropped, and a subscriber that drops its receiver is forgotten on the next publish.
#[derive(Debug, Clone)]
pub struct DeadLettersMessageQueue {
  subscribers: Arc<LoggingMutex<Vec<Sender<DeadLetter>>>>,
}

impl Default for DeadLettersMessageQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl DeadLettersMessageQueue {
  pub fn new() -> Self {
    Self {
      subscribers: Arc::new(LoggingMutex::new("DeadLettersMessageQueue#subscribers", Vec::new())),
    }
  }

  /// Registers a new subscriber. It sees letters published from now on.
  pub fn subscribe(&self) -> Receiver<DeadLetter> {
    let (sender, receiver) = unbounded();
    mutex_lock_with_log!(self.subscribers, "subscribe").push(sender);
    receiver
  }

  pub fn number_of_subscribers(&self) -> usize {
    mutex_lock_with_log!(self.subscribers, "number_of_subscribers").len()
  }

  pub fn enqueue(&self, recipient: ActorRef, envelope: Envelope) -> Result<()> {
    let dead_letter = DeadLetter::new(envelope, recipient);
    let mut subscribers = mutex_lock_with_log!(self.subscribers, "enqueue");
    subscribers.retain(|subscriber| subscriber.send(dead_letter.clone()).is_ok());
    if subscribers.is_empty() {
      log::debug!(
        "dead letter dropped, no subscriber: recipient = {}, sender = {:?}, message = {:?}",
        dead_letter.recipient(),
        dead_letter.envelope().sender(),
        dead_letter.envelope().message()
      );
    } else {
      log::debug!(
        "dead letter: recipient = {}, sender = {:?}, message = {:?}",
        dead_letter.recipient(),
        dead_letter.envelope().sender(),
        dead_letter.envelope().message()
      );
    }
    Ok(())
  }
}

impl MessageQueueBehavior for DeadLettersMessageQueue {
  /// Letters published but not yet received, summed over all subscribers.
  fn number_of_messages(&self) -> MessageQueueSize {
    let subscribers = mutex_lock_with_log!(self.subscribers, "number_of_messages");
    MessageQueueSize::Limited(subscribers.iter().map(|subscriber| subscriber.len()).sum())
  }

  fn has_messages(&self) -> bool {
    let subscribers = mutex_lock_with_log!(self.subscribers, "has_messages");
    subscribers.iter().any(|subscriber| !subscriber.is_empty())
  }
}

impl MessageQueueWriterBehavior for DeadLettersMessageQueue {
  fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    DeadLettersMessageQueue::enqueue(self, receiver, envelope)
  }
}
