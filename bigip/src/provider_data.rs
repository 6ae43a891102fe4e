//! Provider data structure passed to resources

use crate::api::BigIpApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct BigIpProviderData {
    pub client: Arc<dyn BigIpApi>,
}

impl BigIpProviderData {
    pub fn new(client: impl BigIpApi + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}
