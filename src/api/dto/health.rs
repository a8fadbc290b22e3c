use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

/// Outcome of checking one dependency.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn passing(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ok,
            message: Some(message.into()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Components {
    pub database: ComponentHealth,
    pub cache: ComponentHealth,
}

/// Body of `GET /v1/health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: Overall,
    pub version: &'static str,
    pub checks: Components,
}

impl HealthReport {
    pub fn from_components(checks: Components) -> Self {
        let all_ok = [&checks.database, &checks.cache]
            .iter()
            .all(|c| c.status == CheckStatus::Ok);

        Self {
            status: if all_ok {
                Overall::Healthy
            } else {
                Overall::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_failing_component_degrades_report() {
        let report = HealthReport::from_components(Components {
            database: ComponentHealth::passing("Connected"),
            cache: ComponentHealth::failing("Cache unreachable"),
        });

        assert_eq!(report.status, Overall::Degraded);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"]["cache"]["status"], "error");
    }
}
