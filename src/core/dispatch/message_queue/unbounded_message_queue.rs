use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::message_queue::{
  deliver_to_dead_letters, ensure_payload, MessageQueueBehavior, MessageQueueReaderBehavior, MessageQueueSize,
  MessageQueueWriterBehavior,
};
use crate::infrastructure::logging_mutex::LoggingMutex;
use crate::mutex_lock_with_log;
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Arc;

/// Plain first-in-first-out queue, the default mailbox.
#[derive(Debug, Clone)]
pub struct UnboundedMessageQueue {
  queue: Arc<LoggingMutex<VecDeque<Envelope>>>,
}

impl PartialEq for UnboundedMessageQueue {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.queue, &other.queue)
  }
}

impl Default for UnboundedMessageQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl UnboundedMessageQueue {
  pub fn new() -> Self {
    Self {
      queue: Arc::new(LoggingMutex::new("UnboundedMessageQueue#queue", VecDeque::new())),
    }
  }

  pub fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    ensure_payload(&receiver, &envelope)?;
    let mut queue = mutex_lock_with_log!(self.queue, "enqueue");
    queue.push_back(envelope);
    Ok(())
  }

  pub fn has_messages(&self) -> bool {
    !mutex_lock_with_log!(self.queue, "has_messages").is_empty()
  }

  pub fn count(&self) -> usize {
    mutex_lock_with_log!(self.queue, "count").len()
  }

  pub fn try_dequeue(&self) -> Option<Envelope> {
    mutex_lock_with_log!(self.queue, "try_dequeue").pop_front()
  }

  pub fn drain_to(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    let drained = mutex_lock_with_log!(self.queue, "drain_to").drain(..).collect::<Vec<_>>();
    log::debug!("drain_to: owner = {}, messages = {}", owner, drained.len());
    deliver_to_dead_letters(&owner, drained, dead_letters)
  }
}

impl MessageQueueBehavior for UnboundedMessageQueue {
  fn number_of_messages(&self) -> MessageQueueSize {
    MessageQueueSize::Limited(self.count())
  }

  fn has_messages(&self) -> bool {
    UnboundedMessageQueue::has_messages(self)
  }
}

impl MessageQueueWriterBehavior for UnboundedMessageQueue {
  fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    UnboundedMessageQueue::enqueue(self, receiver, envelope)
  }
}

impl MessageQueueReaderBehavior for UnboundedMessageQueue {
  fn dequeue(&self) -> Result<Option<Envelope>> {
    Ok(self.try_dequeue())
  }

  fn clean_up(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    self.drain_to(owner, dead_letters)
  }
}
