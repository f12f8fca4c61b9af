pub mod dashboard;
pub mod error;
pub mod feature_flags;
pub mod models;
pub mod navigation;
pub mod session;

pub use dashboard::*;
pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use session::SessionSignal;
