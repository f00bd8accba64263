use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::mailbox::mailbox_status::MailboxStatus;
use crate::core::dispatch::mailbox::mailbox_type::{MailboxType, MailboxTypeBehavior};
use crate::core::dispatch::mailbox::MailboxBehavior;
use crate::core::dispatch::message_queue::{
  MessageQueue, MessageQueueBehavior, MessageQueueReaderBehavior, MessageQueueSize, MessageQueueWriterBehavior,
};
use crate::infrastructure::logging_rw_lock::LoggingRwLock;
use crate::{read_lock_with_log, write_lock_with_log};
use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MailboxError {
  #[error("the mailbox of {owner} is closed")]
  Closed { owner: ActorRef },
}

#[derive(Debug)]
struct MailboxInner {
  mailbox_type: MailboxType,
  owner: ActorRef,
  message_queue: MessageQueue,
  // enqueue holds the read side for the whole insert, close takes the write side
  status: LoggingRwLock<MailboxStatus>,
  throughput: usize,
}

/// Binds a message queue to the actor that owns it.
#[derive(Debug, Clone)]
pub struct Mailbox {
  inner: Arc<MailboxInner>,
}

impl PartialEq for Mailbox {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Mailbox {
  pub fn new(mailbox_type: MailboxType, owner: ActorRef, throughput: usize) -> Self {
    let message_queue = mailbox_type.create_message_queue(Some(owner.clone()));
    Self::new_with_message_queue(mailbox_type, owner, message_queue, throughput)
  }

  pub fn new_with_message_queue(
    mailbox_type: MailboxType,
    owner: ActorRef,
    message_queue: MessageQueue,
    throughput: usize,
  ) -> Self {
    Self {
      inner: Arc::new(MailboxInner {
        mailbox_type,
        owner,
        message_queue,
        status: LoggingRwLock::new("Mailbox#status", MailboxStatus::Open),
        throughput: throughput.max(1),
      }),
    }
  }

  pub fn mailbox_type(&self) -> &MailboxType {
    &self.inner.mailbox_type
  }

  pub fn owner(&self) -> &ActorRef {
    &self.inner.owner
  }

  pub fn message_queue(&self) -> &MessageQueue {
    &self.inner.message_queue
  }

  pub fn throughput(&self) -> usize {
    self.inner.throughput
  }

  pub fn status(&self) -> MailboxStatus {
    *read_lock_with_log!(self.inner.status, "status")
  }

  pub fn is_closed(&self) -> bool {
    self.status() == MailboxStatus::Closed
  }

  pub fn enqueue(&self, envelope: Envelope) -> Result<()> {
    let status = read_lock_with_log!(self.inner.status, "enqueue");
    match *status {
      MailboxStatus::Open => self.inner.message_queue.enqueue(self.inner.owner.clone(), envelope),
      MailboxStatus::Closed => Err(
        MailboxError::Closed {
          owner: self.inner.owner.clone(),
        }
        .into(),
      ),
    }
  }

  pub fn dequeue(&self) -> Result<Option<Envelope>> {
    self.inner.message_queue.dequeue()
  }

  /// Runs one dispatch batch: hands at most `throughput` envelopes to `handler`, best
  /// first. Stops at the first handler error and returns it.
  pub fn process_messages<F>(&self, mut handler: F) -> Result<usize>
  where
    F: FnMut(Envelope) -> Result<()>, {
    let mut processed = 0;
    while processed < self.inner.throughput {
      match self.dequeue()? {
        Some(envelope) => {
          handler(envelope)?;
          processed += 1;
        }
        None => break,
      }
    }
    log::trace!("process_messages: owner = {}, processed = {}", self.inner.owner, processed);
    Ok(processed)
  }

  /// Closes the mailbox and moves whatever is still queued to `dead_letters`.
  ///
  /// Once the status is `Closed` no enqueue can be in flight, so the drain sees
  /// every accepted message. Calling it again does nothing.
  pub fn clean_up(&self, dead_letters: &dyn MessageQueueWriterBehavior) -> Result<usize> {
    {
      let mut status = write_lock_with_log!(self.inner.status, "clean_up");
      if *status == MailboxStatus::Closed {
        return Ok(0);
      }
      *status = MailboxStatus::Closed;
    }
    let moved = self
      .inner
      .message_queue
      .clean_up(self.inner.owner.clone(), dead_letters)?;
    log::debug!("mailbox of {} closed, {} messages moved to dead letters", self.inner.owner, moved);
    Ok(moved)
  }
}

impl MailboxBehavior for Mailbox {
  fn number_of_messages(&self) -> MessageQueueSize {
    self.inner.message_queue.number_of_messages()
  }

  fn has_messages(&self) -> bool {
    self.inner.message_queue.has_messages()
  }
}
