pub mod client;
pub mod draft;
pub mod example;

pub use crate::domain::model::{ObituaryRequest, ObituaryResult};
pub use crate::domain::ports::{ConfigProvider, ObituaryPublisher};
pub use crate::utils::error::Result;
