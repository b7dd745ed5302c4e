use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistration {
    pub name: String,
    pub capabilities: Vec<String>,
    pub callback_url: String,
}

#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Ok only when the directory acknowledged the registration.
    async fn register(&self, registration: &ServiceRegistration) -> anyhow::Result<()>;
}
