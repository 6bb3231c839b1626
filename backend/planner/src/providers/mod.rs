pub mod http;
pub mod mock;

pub use http::HttpTextGenerator;
pub use mock::MockGenerator;
