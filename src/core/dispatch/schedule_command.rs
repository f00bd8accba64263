use crate::core::dispatch::message::Message;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// The part of a scheduled unit of work that decides where it sits in a priority mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleAttributes {
  pub timestamp: Duration,
  /// Produced by the actor that will process it (its own retry loop).
  pub self_message: bool,
  /// A retry of work that was attempted before.
  pub re_execute: bool,
}

impl ScheduleAttributes {
  pub fn new(timestamp: Duration, self_message: bool, re_execute: bool) -> Self {
    Self {
      timestamp,
      self_message,
      re_execute,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleCommand {
  timestamp: Duration,
  content: String,
  re_execute: bool,
  self_message: bool,
}

impl ScheduleCommand {
  pub fn new(timestamp: Duration, content: &str, re_execute: bool, self_message: bool) -> Self {
    Self {
      timestamp,
      content: content.to_owned(),
      re_execute,
      self_message,
    }
  }

  pub fn of_external(timestamp: Duration, content: &str) -> Self {
    Self::new(timestamp, content, false, false)
  }

  pub fn of_re_execute(timestamp: Duration, content: &str) -> Self {
    Self::new(timestamp, content, true, false)
  }

  pub fn of_self_re_execute(timestamp: Duration, content: &str) -> Self {
    Self::new(timestamp, content, true, true)
  }

  pub fn timestamp(&self) -> Duration {
    self.timestamp
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  pub fn is_re_execute(&self) -> bool {
    self.re_execute
  }

  pub fn is_self_message(&self) -> bool {
    self.self_message
  }
}

impl Message for ScheduleCommand {
  fn schedule_attributes(&self) -> Option<ScheduleAttributes> {
    Some(ScheduleAttributes::new(self.timestamp, self.self_message, self.re_execute))
  }
}

impl Display for ScheduleCommand {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Command(Content={}, Timestamp={:?}, IsReexecute={}, IsSelfMessage={})",
      self.content, self.timestamp, self.re_execute, self.self_message
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_schedule_attributes() {
    let command = ScheduleCommand::of_self_re_execute(Duration::from_secs(2), "Message D");
    let attributes = command.schedule_attributes().unwrap();

    assert_eq!(attributes.timestamp, Duration::from_secs(2));
    assert!(attributes.self_message);
    assert!(attributes.re_execute);
    assert_eq!(command.content(), "Message D");
  }

  #[test]
  fn test_plain_messages_have_no_schedule_attributes() {
    assert_eq!("hello".to_owned().schedule_attributes(), None);
    assert_eq!(42usize.schedule_attributes(), None);
  }

  #[test]
  fn test_display() {
    let command = ScheduleCommand::of_external(Duration::from_secs(5), "Message A");
    assert_eq!(
      command.to_string(),
      "Command(Content=Message A, Timestamp=5s, IsReexecute=false, IsSelfMessage=false)"
    );
  }
}
