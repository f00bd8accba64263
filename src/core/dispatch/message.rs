use crate::core::dispatch::schedule_command::ScheduleAttributes;
use std::fmt::Debug;

/// Anything that can be put into a mailbox.
///
/// Payloads that represent scheduled work expose their [`ScheduleAttributes`] so the
/// priority mailbox can rank them; everything else keeps the default and is treated as an
/// ordinary message.
pub trait Message: Debug + Send + Sync + 'static {
  fn schedule_attributes(&self) -> Option<ScheduleAttributes> {
    None
  }
}

macro_rules! impl_message {
  ($($t:ty),* $(,)?) => {
    $(impl Message for $t {})*
  };
}

impl_message!(
  (),
  bool,
  char,
  String,
  &'static str,
  i8,
  i16,
  i32,
  i64,
  isize,
  u8,
  u16,
  u32,
  u64,
  usize,
);
