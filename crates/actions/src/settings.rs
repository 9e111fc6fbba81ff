//! Platform settings document.
//!
//! Deployments configure the grant, the upsell catalog, feature toggles,
//! and (mostly for testing) a device override through a small TOML
//! document:
//!
//! ```toml
//! device = "smartphone"
//!
//! [capabilities]
//! granted = ["mail", "contacts"]
//! upsellable = ["infostore"]
//!
//! [toggles]
//! "io.ox/mail/features/flagging" = false
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SettingsError;
use crate::gate::StaticGate;
use switchboard_primitives::{DeviceClass, DeviceFacts};

#[derive(Debug, Clone, Default, Deserialize)]
struct CapabilitiesSection {
	#[serde(default)]
	granted: Vec<String>,
	#[serde(default)]
	upsellable: Vec<String>,
}

/// Deserialized settings document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
	#[serde(default)]
	device: Option<String>,
	#[serde(default)]
	capabilities: CapabilitiesSection,
	#[serde(default)]
	toggles: BTreeMap<String, bool>,
}

impl Settings {
	/// Parses a settings document.
	pub fn from_toml(doc: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(doc)?)
	}

	/// Builds the capability gate for this deployment.
	pub fn gate(&self) -> StaticGate {
		StaticGate::from_lists(self.capabilities.granted.iter().cloned(), self.capabilities.upsellable.iter().cloned())
	}

	/// Device facts, honoring the override when present.
	pub fn device_facts(&self) -> Result<DeviceFacts, SettingsError> {
		let class = match &self.device {
			Some(name) => name.parse::<DeviceClass>()?,
			None => DeviceClass::default(),
		};
		Ok(DeviceFacts::new(class))
	}

	/// Value of a feature toggle, if configured.
	pub fn toggle(&self, name: &str) -> Option<bool> {
		self.toggles.get(name).copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::capability::CapabilitySet;
	use crate::gate::CapabilityGate;

	const DOC: &str = r#"
device = "smartphone"

[capabilities]
granted = ["mail"]
upsellable = ["infostore"]

[toggles]
"io.ox/mail/features/flagging" = false
"#;

	#[test]
	fn parses_full_document() {
		let settings = Settings::from_toml(DOC).unwrap();
		let gate = settings.gate();
		assert!(gate.has(&CapabilitySet::parse("mail")));
		assert!(gate.enabled(&CapabilitySet::parse("infostore")));
		assert!(settings.device_facts().unwrap().test("smartphone"));
		assert_eq!(settings.toggle("io.ox/mail/features/flagging"), Some(false));
		assert_eq!(settings.toggle("other"), None);
	}

	#[test]
	fn empty_document_defaults() {
		let settings = Settings::from_toml("").unwrap();
		assert!(settings.device_facts().unwrap().test("desktop"));
		assert!(settings.gate().has(&CapabilitySet::empty()));
	}

	#[test]
	fn bad_device_name_is_an_error() {
		let settings = Settings::from_toml("device = \"wristwatch\"").unwrap();
		assert!(settings.device_facts().is_err());
	}
}
