use crate::core::dispatch::message::Message;
use crate::core::dispatch::schedule_command::ScheduleAttributes;
use std::any::{type_name, Any};
use std::fmt;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DowncastAnyMessageError {
  #[error("the message has already been taken")]
  Empty,
  #[error("the message is not a {0}")]
  TypeMismatch(&'static str),
}

/// A type-erased message.
///
/// Schedule attributes are captured when the message is wrapped, so ordering code can
/// rank it without knowing its concrete type.
#[derive(Clone)]
pub struct AnyMessage {
  msg: Option<Arc<dyn Any + Send + Sync>>,
  type_name: &'static str,
  schedule_attributes: Option<ScheduleAttributes>,
}

impl AnyMessage {
  pub fn new<T>(msg: T) -> Self
  where
    T: Message, {
    let schedule_attributes = msg.schedule_attributes();
    Self {
      msg: Some(Arc::new(msg)),
      type_name: type_name::<T>(),
      schedule_attributes,
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn schedule_attributes(&self) -> Option<ScheduleAttributes> {
    self.schedule_attributes
  }

  pub fn is_empty(&self) -> bool {
    self.msg.is_none()
  }

  pub fn downcast_ref<T>(&self) -> Option<&T>
  where
    T: Message, {
    self.msg.as_ref().and_then(|m| m.downcast_ref::<T>())
  }

  pub fn typed<T>(&self) -> Result<Arc<T>, DowncastAnyMessageError>
  where
    T: Message, {
    match self.msg.as_ref() {
      Some(m) => m
        .clone()
        .downcast::<T>()
        .map_err(|_| DowncastAnyMessageError::TypeMismatch(type_name::<T>())),
      None => Err(DowncastAnyMessageError::Empty),
    }
  }

  /// Moves the payload out. Afterwards the message is empty and can no longer be enqueued.
  pub fn take<T>(&mut self) -> Result<Arc<T>, DowncastAnyMessageError>
  where
    T: Message, {
    match self.msg.take() {
      Some(m) => match m.downcast::<T>() {
        Ok(typed) => Ok(typed),
        Err(m) => {
          self.msg = Some(m);
          Err(DowncastAnyMessageError::TypeMismatch(type_name::<T>()))
        }
      },
      None => Err(DowncastAnyMessageError::Empty),
    }
  }
}

impl Debug for AnyMessage {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.is_empty() {
      write!(f, "AnyMessage(<taken> {})", self.type_name)
    } else {
      write!(f, "AnyMessage({})", self.type_name)
    }
  }
}

impl PartialEq for AnyMessage {
  fn eq(&self, other: &Self) -> bool {
    match (&self.msg, &other.msg) {
      (Some(l), Some(r)) => Arc::ptr_eq(l, r),
      (None, None) => self.type_name == other.type_name,
      _ => false,
    }
  }
}
