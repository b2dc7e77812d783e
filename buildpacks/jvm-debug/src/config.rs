use libcnb::Env;

/// Build time variable that requests a debug enabled launch configuration.
pub(crate) const BP_DEBUG: &str = "BP_DEBUG";

/// Whether the platform environment requests debugging.
///
/// Any value except an empty string or `false` (ignoring case) enables it.
pub(crate) fn debug_requested(env: &Env) -> bool {
    env.get_string_lossy(BP_DEBUG)
        .is_some_and(|value| !value.is_empty() && !value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(value: &str) -> Env {
        let mut env = Env::new();
        env.insert(BP_DEBUG, value);
        env
    }

    #[test]
    fn debug_requested_unset() {
        assert!(!debug_requested(&Env::new()));
    }

    #[test]
    fn debug_requested_values() {
        assert!(debug_requested(&env_with("true")));
        assert!(debug_requested(&env_with("1")));
        assert!(debug_requested(&env_with("yes")));

        assert!(!debug_requested(&env_with("")));
        assert!(!debug_requested(&env_with("false")));
        assert!(!debug_requested(&env_with("FALSE")));
    }
}
