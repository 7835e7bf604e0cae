//! Environment variable source: MERKLEDAG_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `MERKLEDAG__HASH__ALGORITHM=blake3` sets `hash.algorithm`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment_source()))
}

pub(crate) fn environment_source() -> Environment {
    Environment::with_prefix("MERKLEDAG")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
