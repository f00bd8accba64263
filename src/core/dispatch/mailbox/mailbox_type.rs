use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::message_queue::MessageQueue;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub const UNBOUNDED_MAILBOX_TYPE: &str = "unbounded";
pub const SCHEDULE_PRIORITY_MAILBOX_TYPE: &str = "schedule-priority";

/// Builds the message queue of a new mailbox. Receives the owner when one is known.
pub type MessageQueueFactory = Arc<dyn Fn(Option<ActorRef>) -> MessageQueue + Send + Sync>;

#[derive(Clone)]
pub enum MailboxType {
  Unbounded,
  SchedulePriority,
  Custom { name: String, factory: MessageQueueFactory },
}

impl MailboxType {
  pub fn of_unbounded() -> Self {
    MailboxType::Unbounded
  }

  pub fn of_schedule_priority() -> Self {
    MailboxType::SchedulePriority
  }

  pub fn of_custom<F>(name: &str, factory: F) -> Self
  where
    F: Fn(Option<ActorRef>) -> MessageQueue + Send + Sync + 'static, {
    MailboxType::Custom {
      name: name.to_owned(),
      factory: Arc::new(factory),
    }
  }

  /// The name this type is registered under.
  pub fn name(&self) -> &str {
    match self {
      MailboxType::Unbounded => UNBOUNDED_MAILBOX_TYPE,
      MailboxType::SchedulePriority => SCHEDULE_PRIORITY_MAILBOX_TYPE,
      MailboxType::Custom { name, .. } => name,
    }
  }
}

impl Debug for MailboxType {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      MailboxType::Unbounded => write!(f, "Unbounded"),
      MailboxType::SchedulePriority => write!(f, "SchedulePriority"),
      MailboxType::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
    }
  }
}

impl PartialEq for MailboxType {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (MailboxType::Unbounded, MailboxType::Unbounded) => true,
      (MailboxType::SchedulePriority, MailboxType::SchedulePriority) => true,
      (MailboxType::Custom { name: ln, factory: lf }, MailboxType::Custom { name: rn, factory: rf }) => {
        ln == rn && Arc::ptr_eq(lf, rf)
      }
      _ => false,
    }
  }
}

pub trait MailboxTypeBehavior {
  fn create_message_queue(&self, owner: Option<ActorRef>) -> MessageQueue;
}

impl MailboxTypeBehavior for MailboxType {
  fn create_message_queue(&self, owner: Option<ActorRef>) -> MessageQueue {
    match self {
      MailboxType::Unbounded => MessageQueue::of_unbounded(),
      MailboxType::SchedulePriority => MessageQueue::of_schedule_priority(),
      MailboxType::Custom { factory, .. } => factory(owner),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_message_queue() {
    assert!(matches!(
      MailboxType::of_unbounded().create_message_queue(None),
      MessageQueue::Unbounded(_)
    ));
    assert!(matches!(
      MailboxType::of_schedule_priority().create_message_queue(None),
      MessageQueue::SchedulePriority(_)
    ));
  }

  #[test]
  fn test_custom_factory_receives_owner() {
    let mailbox_type = MailboxType::of_custom("owner-aware", |owner| {
      assert_eq!(owner, Some(ActorRef::NoSender));
      MessageQueue::of_schedule_priority()
    });

    assert_eq!(mailbox_type.name(), "owner-aware");
    assert!(matches!(
      mailbox_type.create_message_queue(Some(ActorRef::NoSender)),
      MessageQueue::SchedulePriority(_)
    ));
    assert_eq!(mailbox_type.clone(), mailbox_type);
    assert_ne!(mailbox_type, MailboxType::of_unbounded());
  }
}
