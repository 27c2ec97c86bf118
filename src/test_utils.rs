/// Parses environment variable `name` as a `u32`; `None` when unset or malformed.
#[inline]
pub fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
}

/// Proptest case count, overridable through `PROPTEST_CASES`.
pub fn proptest_cases(default: u32) -> u32 {
    env_u32("PROPTEST_CASES").unwrap_or(default)
}
