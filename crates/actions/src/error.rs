//! Error taxonomy.
//!
//! Nothing here crosses the dispatch boundary: handler failures and matcher
//! rejections are absorbed (logged, treated as dispatched / no-match) by the
//! invoker. The types exist so user code can say *why* it failed.

/// Failure reported by an action handler.
///
/// Absorbed at the dispatch site: logged with full context, and the
/// invocation still resolves `true` because routing succeeded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
	/// Creates a handler error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

impl From<String> for HandlerError {
	fn from(message: String) -> Self {
		Self(message)
	}
}

impl From<&str> for HandlerError {
	fn from(message: &str) -> Self {
		Self(message.to_string())
	}
}

/// Failure reported by a dynamic matcher.
///
/// Treated as "does not match", never as a pipeline error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct MatchError(String);

impl MatchError {
	/// Creates a match error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

impl From<String> for MatchError {
	fn from(message: String) -> Self {
		Self(message)
	}
}

impl From<&str> for MatchError {
	fn from(message: &str) -> Self {
		Self(message.to_string())
	}
}

/// Failure loading the platform settings document.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// The document is not valid TOML for the settings schema.
	#[error("invalid settings document: {0}")]
	Toml(#[from] toml::de::Error),

	/// The configured device class is unknown.
	#[error(transparent)]
	Device(#[from] switchboard_primitives::DeviceParseError),
}
