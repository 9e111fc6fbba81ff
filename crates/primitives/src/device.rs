//! Runtime device classification.
//!
//! Actions may declare a device guard ("smartphone", "!smartphone && touch").
//! The guard is evaluated against [`DeviceFacts`], which exposes the class
//! name plus a couple of derived facts as boolean tokens.

use std::str::FromStr;

/// The coarse device class the client runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
	/// Large screen, pointer-driven.
	#[default]
	Desktop,
	/// Touch device with a medium screen.
	Tablet,
	/// Touch device with a small screen.
	Smartphone,
}

impl DeviceClass {
	/// Canonical token name for this class.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Desktop => "desktop",
			Self::Tablet => "tablet",
			Self::Smartphone => "smartphone",
		}
	}

	/// True for touch-first classes.
	pub const fn is_touch(self) -> bool {
		matches!(self, Self::Tablet | Self::Smartphone)
	}

	/// True for small-screen classes.
	pub const fn is_small(self) -> bool {
		matches!(self, Self::Smartphone)
	}
}

impl core::fmt::Display for DeviceClass {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// Error returned when a device class name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device class: {0:?}")]
pub struct DeviceParseError(pub String);

impl FromStr for DeviceClass {
	type Err = DeviceParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"desktop" => Ok(Self::Desktop),
			"tablet" => Ok(Self::Tablet),
			"smartphone" => Ok(Self::Smartphone),
			other => Err(DeviceParseError(other.to_string())),
		}
	}
}

/// Facts about the current device, consulted by device guards.
///
/// Tokens answered: the class names (`desktop`, `tablet`, `smartphone`) plus
/// the derived `touch` and `small` facts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceFacts {
	class: DeviceClass,
}

impl DeviceFacts {
	/// Creates facts for the given class.
	pub const fn new(class: DeviceClass) -> Self {
		Self { class }
	}

	/// Returns the device class.
	pub const fn class(&self) -> DeviceClass {
		self.class
	}

	/// Answers a single guard token.
	pub fn test(&self, name: &str) -> bool {
		match name {
			"touch" => self.class.is_touch(),
			"small" => self.class.is_small(),
			other => other == self.class.name(),
		}
	}
}
