use crate::pb::HealthRes;

/// Simple health service shared by the REST API and the CLI.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Static health check; the service holds no state.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Patient Management System is alive".into(),
        }
    }
}
