use crate::core::dispatch::envelope::Envelope;
use crate::core::dispatch::schedule_command::ScheduleAttributes;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::cmp::Ordering;

/// Priority bucket of a schedule command. A lower rank is served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PriorityClass {
  /// A retry the actor sent to itself.
  SelfReExecute = 1,
  /// A retry coming from somewhere else.
  ReExecute = 2,
  Normal = 3,
}

impl PriorityClass {
  pub fn of(attributes: &ScheduleAttributes) -> Self {
    match (attributes.self_message, attributes.re_execute) {
      (true, true) => PriorityClass::SelfReExecute,
      (false, true) => PriorityClass::ReExecute,
      (_, false) => PriorityClass::Normal,
    }
  }

  pub fn rank(self) -> u8 {
    self.into()
  }
}

/// An envelope waiting in a priority queue, stamped with its arrival order.
#[derive(Debug, Clone)]
pub struct QueuedEnvelope {
  envelope: Envelope,
  sequence_number: u64,
}

impl QueuedEnvelope {
  pub(crate) fn new(envelope: Envelope, sequence_number: u64) -> Self {
    Self {
      envelope,
      sequence_number,
    }
  }

  pub fn envelope(&self) -> &Envelope {
    &self.envelope
  }

  pub fn sequence_number(&self) -> u64 {
    self.sequence_number
  }

  /// `None` for anything that is not a schedule command.
  pub fn priority_class(&self) -> Option<PriorityClass> {
    self.envelope.schedule_attributes().as_ref().map(PriorityClass::of)
  }

  pub fn into_envelope(self) -> Envelope {
    self.envelope
  }
}

/// Total order used by [`SchedulePriorityMessageQueue`](super::schedule_priority_message_queue::SchedulePriorityMessageQueue).
///
/// - two schedule commands: by [`PriorityClass`], then timestamp, then sequence number
/// - a schedule command always precedes any other message, whatever its class
/// - two other messages: by sequence number only
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulePriorityComparator;

impl SchedulePriorityComparator {
  pub fn new() -> Self {
    SchedulePriorityComparator
  }

  pub fn compare(&self, x: &QueuedEnvelope, y: &QueuedEnvelope) -> Ordering {
    match (x.envelope.schedule_attributes(), y.envelope.schedule_attributes()) {
      (Some(sx), Some(sy)) => Self::compare_schedules(&sx, &sy).then_with(|| x.sequence_number.cmp(&y.sequence_number)),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => x.sequence_number.cmp(&y.sequence_number),
    }
  }

  fn compare_schedules(x: &ScheduleAttributes, y: &ScheduleAttributes) -> Ordering {
    PriorityClass::of(x)
      .cmp(&PriorityClass::of(y))
      .then_with(|| x.timestamp.cmp(&y.timestamp))
  }
}

impl PartialEq for QueuedEnvelope {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl Eq for QueuedEnvelope {}

impl PartialOrd for QueuedEnvelope {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for QueuedEnvelope {
  fn cmp(&self, other: &Self) -> Ordering {
    SchedulePriorityComparator.compare(self, other)
  }
}
