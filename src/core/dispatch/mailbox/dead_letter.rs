use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::envelope::Envelope;

/// A message that could not be delivered, together with the actor it was meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadLetter {
  envelope: Envelope,
  recipient: ActorRef,
}

impl DeadLetter {
  pub fn new(envelope: Envelope, recipient: ActorRef) -> Self {
    Self { envelope, recipient }
  }

  pub fn envelope(&self) -> &Envelope {
    &self.envelope
  }

  pub fn recipient(&self) -> &ActorRef {
    &self.recipient
  }

  pub fn into_envelope(self) -> Envelope {
    self.envelope
  }
}
