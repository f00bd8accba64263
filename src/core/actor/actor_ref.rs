use crate::core::actor::actor_path::ActorPath;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Handle of the actor that owns or sends a message.
///
/// The mailbox layer never talks to actors; it only needs something to attribute
/// messages to when they end up as dead letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorRef {
  NoSender,
  Local(ActorPath),
}

impl ActorRef {
  pub fn of_local(path: ActorPath) -> Self {
    ActorRef::Local(path)
  }
}

impl Display for ActorRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ActorRef::NoSender => write!(f, "NoSender"),
      ActorRef::Local(path) => write!(f, "Actor[{}]", path),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display() {
    let path = ActorPath::of_root("test").with_child("worker");

    assert_eq!(ActorRef::NoSender.to_string(), "NoSender");
    assert_eq!(ActorRef::of_local(path).to_string(), "Actor[actor://test/worker]");
  }
}
