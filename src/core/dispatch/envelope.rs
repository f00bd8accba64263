use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::any_message::{AnyMessage, DowncastAnyMessageError};
use crate::core::dispatch::message::Message;
use crate::core::dispatch::schedule_command::ScheduleAttributes;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
  message: AnyMessage,
  sender: Option<ActorRef>,
}

impl Envelope {
  pub fn new<T>(message: T) -> Self
  where
    T: Message, {
    Envelope {
      message: AnyMessage::new(message),
      sender: None,
    }
  }

  pub fn new_with_sender<T>(message: T, sender: ActorRef) -> Self
  where
    T: Message, {
    Envelope {
      message: AnyMessage::new(message),
      sender: Some(sender),
    }
  }

  pub fn message(&self) -> &AnyMessage {
    &self.message
  }

  pub fn message_mut(&mut self) -> &mut AnyMessage {
    &mut self.message
  }

  pub fn typed_message<T>(&self) -> Result<Arc<T>, DowncastAnyMessageError>
  where
    T: Message, {
    self.message.typed::<T>()
  }

  pub fn message_ref<T>(&self) -> Option<&T>
  where
    T: Message, {
    self.message.downcast_ref::<T>()
  }

  pub fn schedule_attributes(&self) -> Option<ScheduleAttributes> {
    self.message.schedule_attributes()
  }

  pub fn has_payload(&self) -> bool {
    !self.message.is_empty()
  }

  pub fn sender(&self) -> Option<ActorRef> {
    self.sender.clone()
  }
}
