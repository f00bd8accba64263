use std::fmt::Debug;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
pub struct LoggingRwLock<T: Debug> {
  inner: RwLock<T>,
  name: &'static str,
}

impl<T: Debug> LoggingRwLock<T> {
  pub fn new(name: &'static str, data: T) -> Self {
    LoggingRwLock {
      inner: RwLock::new(data),
      name,
    }
  }

  pub fn write_with_info(
    &self,
    function_name: &'static str,
    module_path: &'static str,
    file: &'static str,
    line: u32,
  ) -> RwLockWriteGuard<'_, T> {
    log::trace!(
      "Attempting to write: {} by {}:{} at {}:{}",
      self.name,
      function_name,
      module_path,
      file,
      line,
    );
    match self.inner.write() {
      Ok(guard) => {
        log::trace!(
          "Write acquired: {} by {}:{} at {}:{}",
          self.name,
          function_name,
          module_path,
          file,
          line,
        );
        guard
      }
      Err(_) => panic!(
        "internal invariant violated: rw-lock {} is poisoned ({}:{} at {}:{})",
        self.name, function_name, module_path, file, line,
      ),
    }
  }

  pub fn read_with_info(
    &self,
    function_name: &'static str,
    module_path: &'static str,
    file: &'static str,
    line: u32,
  ) -> RwLockReadGuard<'_, T> {
    log::trace!(
      "Attempting to read: {} by {}:{} at {}:{}",
      self.name,
      function_name,
      module_path,
      file,
      line,
    );
    match self.inner.read() {
      Ok(guard) => {
        log::trace!(
          "Read acquired: {} by {}:{} at {}:{}",
          self.name,
          function_name,
          module_path,
          file,
          line,
        );
        guard
      }
      Err(_) => panic!(
        "internal invariant violated: rw-lock {} is poisoned ({}:{} at {}:{})",
        self.name, function_name, module_path, file, line,
      ),
    }
  }
}

#[macro_export]
macro_rules! read_lock_with_log {
  ($rw_lock:expr, $fname:expr) => {
    $rw_lock.read_with_info($fname, module_path!(), file!(), line!())
  };
}

#[macro_export]
macro_rules! write_lock_with_log {
  ($rw_lock:expr, $fname:expr) => {
    $rw_lock.write_with_info($fname, module_path!(), file!(), line!())
  };
}

impl<T: Debug> Drop for LoggingRwLock<T> {
  fn drop(&mut self) {
    log::trace!("Dropped RwLock: name = {}", self.name);
  }
}
