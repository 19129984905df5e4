use std::collections::HashMap;

/// Read-only named-parameter store.
///
/// Every read carries its default so the set of known names and their
/// fallback values is visible at the call site. The core reads:
///
/// | name                     | default | used by                       |
/// |--------------------------|---------|-------------------------------|
/// | `integration_time_delta` | 0.01    | dynamics integration substep  |
/// | `planning_time_delta`    | 0.05    | trajectory reporting interval |
/// | `wheel_base`             | 2.7     | single-track model            |
/// | `idm_desired_velocity`   | 15.0    | IDM behavior                  |
/// | `idm_minimum_spacing`    | 2.0     | IDM behavior                  |
/// | `idm_time_headway`       | 1.5     | IDM behavior                  |
/// | `idm_max_acceleration`   | 1.4     | IDM behavior                  |
/// | `idm_comfortable_braking`| 2.0     | IDM behavior                  |
/// | `idm_leader_distance`    | 100.0   | IDM behavior                  |
/// | `idm_leader_velocity`    | 15.0    | IDM behavior                  |
pub trait Params {
    fn real(&self, name: &str, default: f64) -> f64;
    fn int(&self, name: &str, default: i64) -> i64;
    fn string(&self, name: &str, default: &str) -> String;
}

/// In-memory parameter store. An empty store answers every read with the
/// caller's default, which makes it double as the "all defaults" provider.
#[derive(Clone, Debug, Default)]
pub struct SetterParams {
    reals: HashMap<String, f64>,
    ints: HashMap<String, i64>,
    strings: HashMap<String, String>,
}

impl SetterParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_real(&mut self, name: impl Into<String>, value: f64) {
        self.reals.insert(name.into(), value);
    }

    pub fn set_int(&mut self, name: impl Into<String>, value: i64) {
        self.ints.insert(name.into(), value);
    }

    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(name.into(), value.into());
    }
}

impl Params for SetterParams {
    fn real(&self, name: &str, default: f64) -> f64 {
        self.reals.get(name).copied().unwrap_or(default)
    }

    fn int(&self, name: &str, default: i64) -> i64 {
        self.ints.get(name).copied().unwrap_or(default)
    }

    fn string(&self, name: &str, default: &str) -> String {
        self.strings
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_answers_with_defaults() {
        let params = SetterParams::new();
        assert_eq!(params.real("integration_time_delta", 0.01), 0.01);
        assert_eq!(params.int("max_iterations", 7), 7);
        assert_eq!(params.string("profile", "standard"), "standard");
    }

    #[test]
    fn set_values_shadow_defaults() {
        let mut params = SetterParams::new();
        params.set_real("integration_time_delta", 0.001);
        assert_eq!(params.real("integration_time_delta", 0.01), 0.001);
    }
}
