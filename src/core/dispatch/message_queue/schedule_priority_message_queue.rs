use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::message_queue::priority_comparator::{QueuedEnvelope, SchedulePriorityComparator};
use crate::core::dispatch::message_queue::{
  deliver_to_dead_letters, ensure_payload, MessageQueueBehavior, MessageQueueReaderBehavior, MessageQueueSize,
  MessageQueueWriterBehavior,
};
use crate::infrastructure::logging_mutex::LoggingMutex;
use crate::mutex_lock_with_log;
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::atomic::{self, AtomicU64};
use std::sync::Arc;

#[derive(Debug)]
struct SchedulePriorityMessageQueueInner {
  queue: LoggingMutex<VecDeque<QueuedEnvelope>>,
  sequence_counter: AtomicU64,
  comparator: SchedulePriorityComparator,
}

/// Unbounded message queue that serves schedule commands by [`PriorityClass`] and
/// timestamp, and everything else in arrival order behind them.
///
/// Clones share the same queue. Every operation runs under one lock, so any number of
/// producers and consumers may use it at the same time.
///
/// [`PriorityClass`]: super::priority_comparator::PriorityClass
#[derive(Debug, Clone)]
pub struct SchedulePriorityMessageQueue {
  inner: Arc<SchedulePriorityMessageQueueInner>,
}

impl PartialEq for SchedulePriorityMessageQueue {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Default for SchedulePriorityMessageQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl SchedulePriorityMessageQueue {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(SchedulePriorityMessageQueueInner {
        queue: LoggingMutex::new("SchedulePriorityMessageQueue#queue", VecDeque::new()),
        sequence_counter: AtomicU64::new(0),
        comparator: SchedulePriorityComparator::new(),
      }),
    }
  }

  /// Stamps the envelope with the next sequence number and inserts it in front of the
  /// first queued envelope that sorts after it.
  ///
  /// Fails only for an envelope whose payload was already taken.
  pub fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    ensure_payload(&receiver, &envelope)?;
    let mut queue = mutex_lock_with_log!(self.inner.queue, "enqueue");
    // allocated under the lock so that sequence order equals insertion order
    let sequence_number = self.inner.sequence_counter.fetch_add(1, atomic::Ordering::SeqCst) + 1;
    let queued = QueuedEnvelope::new(envelope, sequence_number);
    let position = queue
      .iter()
      .position(|e| self.inner.comparator.compare(e, &queued) == Ordering::Greater)
      .unwrap_or(queue.len());
    log::trace!(
      "enqueue: receiver = {}, sequence_number = {}, position = {}/{}",
      receiver,
      sequence_number,
      position,
      queue.len()
    );
    queue.insert(position, queued);
    Ok(())
  }

  pub fn has_messages(&self) -> bool {
    !mutex_lock_with_log!(self.inner.queue, "has_messages").is_empty()
  }

  pub fn count(&self) -> usize {
    mutex_lock_with_log!(self.inner.queue, "count").len()
  }

  /// Removes the envelope with the highest priority, if any.
  pub fn try_dequeue(&self) -> Option<Envelope> {
    let mut queue = mutex_lock_with_log!(self.inner.queue, "try_dequeue");
    queue.pop_front().map(|queued| {
      log::trace!("dequeue: sequence_number = {}", queued.sequence_number());
      queued.into_envelope()
    })
  }

  /// Front-to-back copy of what is queued right now.
  pub fn snapshot(&self) -> Vec<Envelope> {
    let queue = mutex_lock_with_log!(self.inner.queue, "snapshot");
    queue.iter().map(|queued| queued.envelope().clone()).collect()
  }

  /// Empties the queue into `dead_letters` in priority order.
  ///
  /// The contents are taken in one step under the lock and delivered after it is released,
  /// so the sink may block or even write back into this queue. Envelopes enqueued after the
  /// contents were taken stay queued.
  pub fn drain_to(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    let drained = {
      let mut queue = mutex_lock_with_log!(self.inner.queue, "drain_to");
      queue.drain(..).map(QueuedEnvelope::into_envelope).collect::<Vec<_>>()
    };
    log::debug!("drain_to: owner = {}, messages = {}", owner, drained.len());
    deliver_to_dead_letters(&owner, drained, dead_letters)
  }
}

impl MessageQueueBehavior for SchedulePriorityMessageQueue {
  fn number_of_messages(&self) -> MessageQueueSize {
    MessageQueueSize::Limited(self.count())
  }

  fn has_messages(&self) -> bool {
    SchedulePriorityMessageQueue::has_messages(self)
  }
}

impl MessageQueueWriterBehavior for SchedulePriorityMessageQueue {
  fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> Result<()> {
    SchedulePriorityMessageQueue::enqueue(self, receiver, envelope)
  }
}

impl MessageQueueReaderBehavior for SchedulePriorityMessageQueue {
  fn dequeue(&self) -> Result<Option<Envelope>> {
    Ok(self.try_dequeue())
  }

  fn clean_up(&self, owner: ActorRef, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    self.drain_to(owner, dead_letters)
  }
}
