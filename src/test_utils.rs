//! Test utilities shared across module tests.

#[cfg(test)]
static ENV_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
///
/// Details:
/// - Tests that change `HOME` or touch shared disk state must hold this lock.
pub(crate) fn env_mutex() -> &'static std::sync::Mutex<()> {
    ENV_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
