use crate::core::dispatch::mailboxes::MailboxesError;
use config::{Config, ConfigError, Value};
use std::collections::HashMap;

pub const MAILBOXES_KEY: &str = "mailboxes";
pub const MAILBOX_TYPE_KEY: &str = "mailbox-type";
pub const THROUGHPUT_KEY: &str = "throughput";
pub const DEFAULT_THROUGHPUT: usize = 5;

/// How a mailbox id is built: which registered mailbox type, and how many messages one
/// dispatch batch may process.
///
/// ```toml
/// [mailboxes.schedule-priority-mailbox]
/// mailbox-type = "schedule-priority"
/// throughput = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxSettings {
  mailbox_type: String,
  throughput: usize,
}

impl MailboxSettings {
  pub fn new(mailbox_type: &str, throughput: usize) -> Self {
    Self {
      mailbox_type: mailbox_type.to_owned(),
      throughput,
    }
  }

  pub fn of_mailbox_type(mailbox_type: &str) -> Self {
    Self::new(mailbox_type, DEFAULT_THROUGHPUT)
  }

  pub fn mailbox_type(&self) -> &str {
    &self.mailbox_type
  }

  pub fn throughput(&self) -> usize {
    self.throughput
  }

  /// Reads every entry of the `mailboxes` table. A missing table yields no entries.
  pub fn from_config(config: &Config) -> Result<HashMap<String, MailboxSettings>, MailboxesError> {
    let table = match config.get_table(MAILBOXES_KEY) {
      Ok(table) => table,
      Err(ConfigError::NotFound(_)) => return Ok(HashMap::new()),
      Err(err) => return Err(err.into()),
    };
    table
      .into_iter()
      .map(|(id, value)| Self::from_value(&id, value).map(|settings| (id, settings)))
      .collect()
  }

  fn from_value(id: &str, value: Value) -> Result<Self, MailboxesError> {
    let mut table = value.into_table()?;
    let mailbox_type = table
      .remove(MAILBOX_TYPE_KEY)
      .ok_or_else(|| MailboxesError::InvalidSettings {
        id: id.to_owned(),
        reason: format!("{} is missing", MAILBOX_TYPE_KEY),
      })?
      .into_str()?;
    let throughput = match table.remove(THROUGHPUT_KEY) {
      Some(value) => value.into_int()?,
      None => DEFAULT_THROUGHPUT as i64,
    };
    if throughput < 1 {
      return Err(MailboxesError::InvalidSettings {
        id: id.to_owned(),
        reason: format!("{} must be at least 1, got {}", THROUGHPUT_KEY, throughput),
      });
    }
    Ok(Self::new(&mailbox_type, throughput as usize))
  }
}
