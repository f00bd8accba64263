//! Mailboxes for actor runtimes.
//!
//! The centerpiece is [`SchedulePriorityMessageQueue`], a thread-safe queue that serves
//! [`ScheduleCommand`]s by [`PriorityClass`] and timestamp, ahead of every other message,
//! and keeps arrival order among equals. [`Mailboxes`] selects it, or any other registered
//! queue, per mailbox id from configuration.

pub mod core;
pub mod infrastructure;

pub use crate::core::actor::actor_path::ActorPath;
pub use crate::core::actor::actor_ref::ActorRef;
pub use crate::core::dispatch::envelope::Envelope;
pub use crate::core::dispatch::mailbox::dead_letter::DeadLetter;
pub use crate::core::dispatch::mailbox::mailbox::{Mailbox, MailboxError};
pub use crate::core::dispatch::mailbox::mailbox_type::{MailboxType, MailboxTypeBehavior};
pub use crate::core::dispatch::mailboxes::settings::MailboxSettings;
pub use crate::core::dispatch::mailboxes::{Mailboxes, MailboxesError};
pub use crate::core::dispatch::message::Message;
pub use crate::core::dispatch::message_queue::dead_letters_message_queue::DeadLettersMessageQueue;
pub use crate::core::dispatch::message_queue::priority_comparator::{
  PriorityClass, QueuedEnvelope, SchedulePriorityComparator,
};
pub use crate::core::dispatch::message_queue::schedule_priority_message_queue::SchedulePriorityMessageQueue;
pub use crate::core::dispatch::message_queue::unbounded_message_queue::UnboundedMessageQueue;
pub use crate::core::dispatch::message_queue::{
  MessageQueue, MessageQueueBehavior, MessageQueueError, MessageQueueReaderBehavior, MessageQueueSize,
  MessageQueueWriterBehavior,
};
pub use crate::core::dispatch::schedule_command::{ScheduleAttributes, ScheduleCommand};
