#[cfg(feature = "serde_json")]
pub(crate) mod serde_json;
#[cfg(feature = "sonic-rs")]
pub(crate) mod sonic_rs;
