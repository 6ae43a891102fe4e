//! Request-scoped context passed to every provider and resource call
//!
//! Calls run to completion. The only bound on a remote request is the HTTP
//! client's own timeout, so the context carries no deadline or cancellation.

/// Handle for a single host request
#[derive(Clone, Debug, Default)]
pub struct Context {
    _private: (),
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
