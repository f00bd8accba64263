pub mod logging_mutex;
pub mod logging_rw_lock;
