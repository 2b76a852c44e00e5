use std::sync::LazyLock;

/// Version of the software, with the build profile appended for debug builds.
pub static VERSION: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");
    if cfg!(debug_assertions) { format!("{version}-debug") } else { version.to_string() }
});
