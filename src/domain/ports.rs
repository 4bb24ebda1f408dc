use crate::domain::model::{EndpointKind, Environment, ObituaryRequest, ObituaryResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn environment(&self) -> Environment;
    fn endpoint_kind(&self) -> EndpointKind;
    fn base_url_override(&self) -> Option<&str>;
    fn default_owner(&self) -> Option<&str>;
}

#[async_trait]
pub trait ObituaryPublisher: Send + Sync {
    async fn publish(&self, request: &ObituaryRequest) -> Result<ObituaryResult>;
}
