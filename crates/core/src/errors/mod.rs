pub mod core;
pub mod http;

pub use self::core::CoreError;
pub use self::http::HttpError;
