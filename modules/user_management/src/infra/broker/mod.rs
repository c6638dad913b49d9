pub mod http_publisher;
pub mod log_publisher;

pub use http_publisher::HttpEventPublisher;
pub use log_publisher::LogEventPublisher;
