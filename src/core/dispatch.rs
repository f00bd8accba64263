pub mod any_message;
pub mod envelope;
pub mod mailbox;
pub mod mailboxes;
pub mod message;
pub mod message_queue;
pub mod schedule_command;
