use crate::core::dispatch::message_queue::MessageQueueSize;

pub mod dead_letter;
#[allow(clippy::module_inception)]
pub mod mailbox;
pub mod mailbox_status;
pub mod mailbox_type;

pub trait MailboxBehavior {
  fn number_of_messages(&self) -> MessageQueueSize;
  fn has_messages(&self) -> bool;
}
