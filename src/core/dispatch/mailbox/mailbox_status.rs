#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxStatus {
  Open,
  /// Torn down; the queue has been handed to dead letters and new messages are refused.
  Closed,
}
