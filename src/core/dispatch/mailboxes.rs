use crate::core::actor::actor_ref::ActorRef;
use crate::core::dispatch::mailbox::mailbox::Mailbox;
use crate::core::dispatch::mailbox::mailbox_type::{MailboxType, SCHEDULE_PRIORITY_MAILBOX_TYPE, UNBOUNDED_MAILBOX_TYPE};
use crate::core::dispatch::mailboxes::settings::MailboxSettings;
use crate::core::dispatch::message_queue::dead_letters_message_queue::DeadLettersMessageQueue;
use config::{Config, ConfigError};
use dashmap::DashMap;
use thiserror::Error;

pub mod settings;

pub const DEFAULT_MAILBOX_ID: &str = "default-mailbox";
pub const SCHEDULE_PRIORITY_MAILBOX_ID: &str = "schedule-priority-mailbox";

#[derive(Debug, Error)]
pub enum MailboxesError {
  #[error("no mailbox is configured under id {0}")]
  UnknownMailbox(String),
  #[error("mailbox {id} refers to unregistered mailbox type {mailbox_type}")]
  UnknownMailboxType { id: String, mailbox_type: String },
  #[error("invalid settings for mailbox {id}: {reason}")]
  InvalidSettings { id: String, reason: String },
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Lookup table from mailbox ids to the factories that build their queues.
///
/// Mailbox types are registered by name; mailbox ids come from configuration and name
/// the type to use. `unbounded` and `schedule-priority` are always registered, and
/// `default-mailbox` / `schedule-priority-mailbox` are declared unless configuration
/// overrides them.
#[derive(Debug)]
pub struct Mailboxes {
  mailbox_types: DashMap<String, MailboxType>,
  mailbox_settings: DashMap<String, MailboxSettings>,
  dead_letters: DeadLettersMessageQueue,
}

impl Mailboxes {
  pub fn new(dead_letters: DeadLettersMessageQueue) -> Self {
    let mailboxes = Self {
      mailbox_types: DashMap::new(),
      mailbox_settings: DashMap::new(),
      dead_letters,
    };
    mailboxes.register_mailbox_type(MailboxType::of_unbounded());
    mailboxes.register_mailbox_type(MailboxType::of_schedule_priority());
    mailboxes.register_mailbox(
      DEFAULT_MAILBOX_ID,
      MailboxSettings::of_mailbox_type(UNBOUNDED_MAILBOX_TYPE),
    );
    mailboxes.register_mailbox(
      SCHEDULE_PRIORITY_MAILBOX_ID,
      MailboxSettings::of_mailbox_type(SCHEDULE_PRIORITY_MAILBOX_TYPE),
    );
    mailboxes
  }

  pub fn from_config(config: &Config, dead_letters: DeadLettersMessageQueue) -> Result<Self, MailboxesError> {
    let mailboxes = Self::new(dead_letters);
    for (id, settings) in MailboxSettings::from_config(config)? {
      log::debug!("mailbox {} configured as {:?}", id, settings);
      mailboxes.register_mailbox(&id, settings);
    }
    Ok(mailboxes)
  }

  /// Registers a mailbox type under its name, replacing any type of the same name.
  pub fn register_mailbox_type(&self, mailbox_type: MailboxType) {
    let name = mailbox_type.name().to_owned();
    if self.mailbox_types.insert(name.clone(), mailbox_type).is_some() {
      log::warn!("mailbox type {} was registered twice, the last one wins", name);
    }
  }

  pub fn register_mailbox(&self, id: &str, settings: MailboxSettings) {
    self.mailbox_settings.insert(id.to_owned(), settings);
  }

  pub fn has_mailbox(&self, id: &str) -> bool {
    self.mailbox_settings.contains_key(id)
  }

  pub fn settings(&self, id: &str) -> Result<MailboxSettings, MailboxesError> {
    self
      .mailbox_settings
      .get(id)
      .map(|settings| settings.value().clone())
      .ok_or_else(|| MailboxesError::UnknownMailbox(id.to_owned()))
  }

  pub fn lookup(&self, id: &str) -> Result<MailboxType, MailboxesError> {
    let settings = self.settings(id)?;
    self
      .mailbox_types
      .get(settings.mailbox_type())
      .map(|mailbox_type| mailbox_type.value().clone())
      .ok_or_else(|| MailboxesError::UnknownMailboxType {
        id: id.to_owned(),
        mailbox_type: settings.mailbox_type().to_owned(),
      })
  }

  /// Builds a fresh mailbox for `owner` as configured under `id`.
  pub fn create_mailbox(&self, id: &str, owner: ActorRef) -> Result<Mailbox, MailboxesError> {
    let settings = self.settings(id)?;
    let mailbox_type = self.lookup(id)?;
    log::debug!("creating mailbox {} ({}) for {}", id, mailbox_type.name(), owner);
    Ok(Mailbox::new(mailbox_type, owner, settings.throughput()))
  }

  pub fn dead_letters(&self) -> &DeadLettersMessageQueue {
    &self.dead_letters
  }

  /// Tears `mailbox` down, sending what is left in it to this registry's dead letters.
  pub fn clean_up(&self, mailbox: &Mailbox) -> anyhow::Result<usize> {
    mailbox.clean_up(&self.dead_letters)
  }
}
