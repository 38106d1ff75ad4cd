pub mod panic;
pub mod response;
pub mod timeout;

pub use panic::handle_panic;
pub use response::{ApiResult, Envelope};
pub use timeout::handle_timeout;
