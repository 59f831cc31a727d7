//! Constants shared by the modalias builders.

/// Bus prefix of every device tree modalias.
pub const MODALIAS_PREFIX: &str = "of:";

/// Path of the node whose properties name aliases of other nodes.
pub const ALIASES_PATH: &str = "/aliases";

/// Size of the uevent environment buffer in bytes.
pub const UEVENT_BUFFER_SIZE: usize = 2048;

/// Maximum number of variables in a uevent environment.
pub const UEVENT_NUM_ENVP: usize = 64;
