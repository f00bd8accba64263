use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard};

/// A `Mutex` that names itself in trace logs and refuses to hand out poisoned state.
#[derive(Debug)]
pub struct LoggingMutex<T: Debug> {
  inner: Mutex<T>,
  name: &'static str,
}

impl<T: Debug> LoggingMutex<T> {
  pub fn new(name: &'static str, data: T) -> Self {
    LoggingMutex {
      inner: Mutex::new(data),
      name,
    }
  }

  /// Acquires the lock on behalf of the given call site.
  ///
  /// A poisoned lock means a thread panicked halfway through a mutation, so the guarded
  /// data may break its ordering invariants. That is reported as a fatal error.
  pub fn lock_with_info(
    &self,
    function_name: &'static str,
    module_path: &'static str,
    file: &'static str,
    line: u32,
  ) -> MutexGuard<'_, T> {
    log::trace!(
      "Attempting to lock: {} by {}:{} at {}:{}",
      self.name,
      function_name,
      module_path,
      file,
      line,
    );
    match self.inner.lock() {
      Ok(guard) => {
        log::trace!(
          "Lock acquired: {} by {}:{} at {}:{}",
          self.name,
          function_name,
          module_path,
          file,
          line,
        );
        guard
      }
      Err(_) => panic!(
        "internal invariant violated: lock {} is poisoned ({}:{} at {}:{})",
        self.name, function_name, module_path, file, line,
      ),
    }
  }
}

#[macro_export]
macro_rules! mutex_lock_with_log {
  ($mutex:expr, $fname:expr) => {
    $mutex.lock_with_info($fname, module_path!(), file!(), line!())
  };
}

impl<T: Debug> Drop for LoggingMutex<T> {
  fn drop(&mut self) {
    log::trace!("Lock dropped: name = {}", self.name);
  }
}
