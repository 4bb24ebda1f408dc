pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::client::{publish, resolve_base_url, resolve_base_url_for, PublisherClient};
pub use crate::core::draft::ObituaryDraft;
pub use crate::core::example::build_example_payload;
pub use crate::core::ObituaryPublisher;
pub use domain::model::{
    EndpointKind, Environment, ObituaryContent, ObituaryRequest, ObituaryResult, ObituaryType,
    PersonName, PersonRecord, SourceInfo, SourceType,
};
pub use utils::error::{PublishError, Result};
