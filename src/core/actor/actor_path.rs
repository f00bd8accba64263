use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const PROTOCOL: &str = "actor";

/// Location of an actor in its system's supervision tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActorPath {
  Root { system_name: String },
  Child { parent: Arc<ActorPath>, name: String },
}

impl ActorPath {
  pub fn of_root(system_name: &str) -> Self {
    ActorPath::Root {
      system_name: system_name.to_owned(),
    }
  }

  pub fn with_child(&self, name: &str) -> Self {
    ActorPath::Child {
      parent: Arc::new(self.clone()),
      name: name.to_owned(),
    }
  }
}

impl Display for ActorPath {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      ActorPath::Root { system_name } => write!(f, "{}://{}/", PROTOCOL, system_name),
      ActorPath::Child { parent, name } => match parent.as_ref() {
        ActorPath::Root { .. } => write!(f, "{}{}", parent, name),
        ActorPath::Child { .. } => write!(f, "{}/{}", parent, name),
      },
    }
  }
}
