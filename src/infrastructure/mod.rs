pub mod clock;
pub mod http_notifier;
pub mod in_memory;
