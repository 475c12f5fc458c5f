/// Load generator invoked for every phase when none is configured.
pub(crate) const DEFAULT_EXECUTABLE: &str = "hey";
