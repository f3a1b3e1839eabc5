use crate::error::Result;

/// Permission the host environment has granted for user-facing alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertPermission {
    /// Not asked yet
    #[default]
    Default,
    Granted,
    Denied,
}

/// Port for best-effort user alerts
pub trait Alerter: Send + Sync {
    /// Current permission state
    fn permission(&self) -> AlertPermission;

    /// Show an alert. Failures are logged by the caller and otherwise ignored.
    fn alert(&self, title: &str, body: &str) -> Result<()>;
}
