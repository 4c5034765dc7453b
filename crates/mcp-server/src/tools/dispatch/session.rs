use crate::tools::error::ToolFailure;
use hostex_client::{HostexApi, HostexClient, HostexClientConfig, HostexResult};
use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Builds the backend handle from the configured credential.
pub trait ClientFactory: Send + Sync {
    fn connect(&self, access_token: &SecretString) -> HostexResult<Arc<dyn HostexApi>>;
}

pub struct HttpClientFactory {
    config: HostexClientConfig,
}

impl HttpClientFactory {
    pub fn new(config: HostexClientConfig) -> Self {
        Self { config }
    }
}

impl ClientFactory for HttpClientFactory {
    fn connect(&self, access_token: &SecretString) -> HostexResult<Arc<dyn HostexApi>> {
        let token = SecretString::from(access_token.expose_secret().to_string());
        let client = HostexClient::new(token, &self.config)?;
        log::debug!("Hostex client ready for {}", self.config.base_url);
        let handle: Arc<dyn HostexApi> = Arc::new(client);
        Ok(handle)
    }
}

/// Credential gate plus the lazily built, process-wide backend handle.
///
/// The handle is created on the first call that passes validation and the credential check,
/// exactly once even under concurrent first calls. A failed construction is not cached.
pub(crate) struct HostexSession {
    access_token: Option<SecretString>,
    factory: Box<dyn ClientFactory>,
    handle: OnceCell<Arc<dyn HostexApi>>,
}

impl HostexSession {
    pub(crate) fn new(access_token: Option<SecretString>, factory: Box<dyn ClientFactory>) -> Self {
        Self {
            access_token,
            factory,
            handle: OnceCell::new(),
        }
    }

    pub(crate) fn has_credential(&self) -> bool {
        self.access_token.is_some()
    }

    pub(crate) fn client(&self) -> Result<Arc<dyn HostexApi>, ToolFailure> {
        let Some(token) = self.access_token.as_ref() else {
            return Err(ToolFailure::MissingCredential);
        };
        let handle = self
            .handle
            .get_or_try_init(|| self.factory.connect(token))?;
        Ok(handle.clone())
    }

    #[cfg(test)]
    pub(crate) fn is_materialized(&self) -> bool {
        self.handle.get().is_some()
    }
}
