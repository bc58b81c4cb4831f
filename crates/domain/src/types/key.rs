//! Syncer identity and event subjects

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies the service port a syncer keeps its NEG in sync with.
///
/// Immutable after construction; rendered as
/// `namespace/name-port/target_port` in logs and errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NegSyncerKey {
    pub namespace: String,
    pub name: String,
    pub port: i32,
    pub target_port: String,
}

impl NegSyncerKey {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        port: i32,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            port,
            target_port: target_port.into(),
        }
    }

    /// The service that owns this port, used as the event subject.
    pub fn service(&self) -> ServiceRef {
        ServiceRef::new(self.namespace.clone(), self.name.clone())
    }
}

impl fmt::Display for NegSyncerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}-{}/{}", self.namespace, self.name, self.port, self.target_port)
    }
}

/// Reference to a cluster service, as resolved by a service lister
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceRef {
    pub namespace: String,
    pub name: String,
}

impl ServiceRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into() }
    }
}

impl fmt::Display for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
