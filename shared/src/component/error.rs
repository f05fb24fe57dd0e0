use thiserror::Error;

/// Errors raised while touching shared component state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// A writer panicked while holding the component's lock
    #[error("Component {component} is poisoned, a writer panicked while holding its lock")]
    Poisoned { component: &'static str },
}
