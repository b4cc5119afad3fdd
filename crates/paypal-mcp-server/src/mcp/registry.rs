use crate::mcp::schema::Schema;
use crate::tools::Handler;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The enablement map: resource group -> action -> enabled. Absence of an
/// entry means disabled.
pub type Actions = HashMap<String, HashMap<String, bool>>;

/// One named operation: method key, description, parameter schema, the
/// (group, action) pairs that govern its enablement, and its handler.
pub struct Capability {
    pub method: &'static str,
    pub description: &'static str,
    pub schema: Schema,
    pub actions: &'static [(&'static str, &'static str)],
    pub handler: Arc<dyn Handler>,
}

impl Capability {
    /// A capability is enabled iff any one of its governing pairs is
    /// explicitly enabled in the configuration.
    fn is_enabled(&self, actions: &Actions) -> bool {
        self.actions.iter().any(|(group, action)| {
            actions
                .get(*group)
                .and_then(|entries| entries.get(*action))
                .copied()
                .unwrap_or(false)
        })
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("capability `{0}` is registered more than once")]
    DuplicateMethod(&'static str),
}

/// The immutable capability table, built once at startup from the static
/// catalog filtered by the enablement map.
pub struct Registry {
    capabilities: HashMap<&'static str, Capability>,
    methods: Vec<&'static str>,
}

// Handlers are opaque trait objects; the enabled method list is the useful
// part of a registry's debug output.
impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("methods", &self.methods)
            .finish()
    }
}

impl Registry {
    pub fn build(catalog: Vec<Capability>, actions: &Actions) -> Result<Self, RegistryError> {
        let mut seen: HashMap<&'static str, ()> = HashMap::new();
        let mut capabilities = HashMap::new();

        for capability in catalog {
            if seen.insert(capability.method, ()).is_some() {
                return Err(RegistryError::DuplicateMethod(capability.method));
            }
            if capability.is_enabled(actions) {
                capabilities.insert(capability.method, capability);
            } else {
                debug!(method = capability.method, "capability disabled");
            }
        }

        let mut methods: Vec<&'static str> = capabilities.keys().copied().collect();
        methods.sort_unstable();

        Ok(Self {
            capabilities,
            methods,
        })
    }

    pub fn get(&self, method: &str) -> Option<&Capability> {
        self.capabilities.get(method)
    }

    /// The sorted enabled method names, used to answer Ping.
    pub fn methods(&self) -> &[&'static str] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
