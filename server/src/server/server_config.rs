use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Determines whether an entity's owning observer is skipped when its
    /// updates are sent. Owners receive their own entity's state by default.
    pub exclude_owner: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            exclude_owner: false,
        }
    }
}
