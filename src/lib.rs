pub mod config;
pub mod error;
pub mod evidence;
pub mod export;
pub mod inspection;
pub mod normalize;
pub mod progress;
pub mod project;
pub mod record;
pub mod session;
pub mod status;
pub mod todo;
pub mod workbook;

pub use config::AppConfig;
pub use error::Error;
pub use inspection::Inspection;
pub use progress::{RefreshReporter, SilentReporter};
pub use record::Record;
pub use session::Session;
pub use status::Status;
