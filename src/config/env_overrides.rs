use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("GLYPHCODEX_BASE_URL")
            && !url.is_empty()
        {
            self.service.base_url = url;
        }

        if let Ok(steps_str) = std::env::var("GLYPHCODEX_STEPS")
            && let Ok(steps) = steps_str.parse::<u32>()
        {
            self.ritual.steps = steps;
        }

        if let Ok(grammar) = std::env::var("GLYPHCODEX_GRAMMAR")
            && !grammar.is_empty()
        {
            self.ritual.grammar = grammar;
        }

        if let Ok(secs_str) = std::env::var("GLYPHCODEX_DREAM_INTERVAL_SECS")
            && let Ok(secs) = secs_str.parse::<u64>()
        {
            self.dream.interval_secs = secs;
        }
    }
}

#[cfg(test)]
pub(super) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `body` with the given variables set (`Some`) or removed (`None`),
/// restoring the previous values afterwards. Callers hold `ENV_LOCK`.
#[cfg(test)]
pub(super) fn with_env<R>(vars: &[(&str, Option<&str>)], body: impl FnOnce() -> R) -> R {
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| ((*key).to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        // SAFETY: test-only; ENV_LOCK serializes every env mutation in tests.
        unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    let out = body();

    for (key, previous) in saved {
        // SAFETY: as above, still under ENV_LOCK.
        unsafe {
            match previous {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
    out
}
