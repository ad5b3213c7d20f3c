//! Logger setup.

/// Install `env_logger` as the `log` backend. `RUST_LOG` controls the level.
///
/// Safe to call more than once; later calls only print a warning.
pub fn init() {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

/// Like [`init`], but quiet when a logger is already installed. Meant for tests.
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
