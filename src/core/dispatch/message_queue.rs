use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::message_queue::schedule_priority_message_queue::SchedulePriorityMessageQueue;
use crate::core::dispatch::message_queue::unbounded_message_queue::UnboundedMessageQueue;
use anyhow::Result;
use thiserror::Error;

pub mod dead_letters_message_queue;
pub mod priority_comparator;
pub mod schedule_priority_message_queue;
pub mod unbounded_message_queue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageQueueSize {
  Limited(usize),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MessageQueueError {
  #[error("an envelope without payload was enqueued for {receiver}")]
  EmptyPayload { receiver: ActorRef },
}

pub trait MessageQueueBehavior {
  fn number_of_messages(&self) -> MessageQueueSize;
  fn has_messages(&self) -> bool;
}

pub trait MessageQueueWriterBehavior: MessageQueueBehavior {
  fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()>;
}

pub trait MessageQueueReaderBehavior: MessageQueueBehavior {
  fn dequeue(&self) -> Result<Option<Envelope>>;

  /// Empties the queue into `dead_letters`, front to back, attributing every message to
  /// `owner`. Returns how many messages were handed over.
  fn clean_up(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize>;
}

pub(crate) fn ensure_payload(receiver: &ActorRef, envelope: &Envelope) -> Result<()> {
  if envelope.has_payload() {
    Ok(())
  } else {
    Err(
      MessageQueueError::EmptyPayload {
        receiver: receiver.clone(),
      }
      .into(),
    )
  }
}

/// Hands drained envelopes to `dead_letters` outside of any queue lock.
///
/// A failed delivery does not stop the rest; the first error is returned once every
/// envelope has been offered.
pub(crate) fn deliver_to_dead_letters(
  owner: &ActorRef,
  envelopes: Vec<Envelope>,
  dead_letters: &dyn MessageQueueWriterBehavior,
) -> Result<usize> {
  let mut delivered = 0;
  let mut first_error = None;
  for envelope in envelopes {
    match dead_letters.enqueue(owner.clone(), envelope) {
      Ok(()) => delivered += 1,
      Err(err) => {
        log::warn!("Failed to move a message of {} to dead letters: {:?}", owner, err);
        if first_error.is_none() {
          first_error = Some(err);
        }
      }
    }
  }
  match first_error {
    Some(err) => Err(err),
    None => Ok(delivered),
  }
}

#[derive(Debug, Clone)]
pub enum MessageQueue {
  Unbounded(UnboundedMessageQueue),
  SchedulePriority(SchedulePriorityMessageQueue),
}

impl MessageQueue {
  pub fn of_unbounded() -> Self {
    MessageQueue::Unbounded(UnboundedMessageQueue::new())
  }

  pub fn of_schedule_priority() -> Self {
    MessageQueue::SchedulePriority(SchedulePriorityMessageQueue::new())
  }

  pub fn as_schedule_priority(&self) -> Option<&SchedulePriorityMessageQueue> {
    match self {
      MessageQueue::SchedulePriority(queue) => Some(queue),
      _ => None,
    }
  }
}

impl MessageQueueBehavior for MessageQueue {
  fn number_of_messages(&self) -> MessageQueueSize {
    match self {
      MessageQueue::Unbounded(queue) => queue.number_of_messages(),
      MessageQueue::SchedulePriority(queue) => queue.number_of_messages(),
    }
  }

  fn has_messages(&self) -> bool {
    match self {
      MessageQueue::Unbounded(queue) => MessageQueueBehavior::has_messages(queue),
      MessageQueue::SchedulePriority(queue) => MessageQueueBehavior::has_messages(queue),
    }
  }
}

impl MessageQueueWriterBehavior for MessageQueue {
  fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    match self {
      MessageQueue::Unbounded(queue) => MessageQueueWriterBehavior::enqueue(queue, receiver, envelope),
      MessageQueue::SchedulePriority(queue) => MessageQueueWriterBehavior::enqueue(queue, receiver, envelope),
    }
  }
}

impl MessageQueueReaderBehavior for MessageQueue {
  fn dequeue(&self) -> Result<Option<Envelope>> {
    match self {
      MessageQueue::Unbounded(queue) => queue.dequeue(),
      MessageQueue::SchedulePriority(queue) => queue.dequeue(),
    }
  }

  fn clean_up(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    match self {
      MessageQueue::Unbounded(queue) => queue.clean_up(owner, dead_letters),
      MessageQueue::SchedulePriority(queue) => queue.clean_up(owner, dead_letters),
    }
  }
}
