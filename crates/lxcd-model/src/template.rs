use serde::Deserialize;

use crate::ModelError;

/// Task-configuration surface recognized by the LXC driver.
///
/// Only `template` is required; everything else is optional and defaults to
/// its zero value. Unknown keys in the raw table are ignored, while a value
/// of the wrong type fails decoding before any container is created.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template name or path used to provision the container rootfs.
    pub template: String,
    /// Distribution passed to download-style templates.
    pub distro: String,
    /// Distribution release.
    pub release: String,
    /// Target architecture.
    pub arch: String,
    pub image_variant: String,
    pub image_server: String,
    pub gpg_key_id: String,
    pub gpg_key_server: String,
    /// Skip GPG validation of downloaded images.
    pub disable_gpg: bool,
    /// Discard any cached image before provisioning.
    pub flush_cache: bool,
    /// Provision from the local cache only.
    pub force_cache: bool,
    /// Extra arguments forwarded to the template script, in order.
    pub template_args: Vec<String>,
}

impl TemplateConfig {
    /// Decode and validate a raw configuration table.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ModelError> {
        let config: TemplateConfig = serde_json::from_value(value.clone())
            .map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the decoded configuration.
    ///
    /// Rules:
    /// - `template` is not empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.template.trim().is_empty() {
            return Err(ModelError::InvalidConfig("template is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::TemplateConfig;
    use crate::ModelError;

    #[test]
    fn full_config_decodes() {
        let value = json!({
            "template": "/usr/share/lxc/templates/lxc-download",
            "distro": "ubuntu",
            "release": "jammy",
            "arch": "amd64",
            "image_variant": "default",
            "image_server": "images.example.org",
            "gpg_key_id": "0xBADC0DE",
            "gpg_key_server": "keys.example.org",
            "disable_gpg": true,
            "flush_cache": true,
            "force_cache": false,
            "template_args": ["--no-validate", "--keep"],
        });

        let config = TemplateConfig::from_value(&value).unwrap();
        assert_eq!(config.distro, "ubuntu");
        assert_eq!(config.template_args, vec!["--no-validate", "--keep"]);
        assert!(config.disable_gpg);
        assert!(!config.force_cache);
    }

    #[test]
    fn template_only_is_enough() {
        let value = json!({ "template": "/templates/busybox" });
        let config = TemplateConfig::from_value(&value).unwrap();

        assert_eq!(config.template, "/templates/busybox");
        assert_eq!(config.distro, "");
        assert!(config.template_args.is_empty());
    }

    #[test]
    fn missing_template_is_rejected() {
        let err = TemplateConfig::from_value(&json!({ "distro": "alpine" })).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }

    #[test]
    fn whitespace_template_is_rejected() {
        let err = TemplateConfig::from_value(&json!({ "template": "   " })).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let value = json!({
            "template": "/templates/busybox",
            "not_a_real_option": 42,
        });
        assert!(TemplateConfig::from_value(&value).is_ok());
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let value = json!({
            "template": "/templates/busybox",
            "template_args": "--not-a-list",
        });
        let err = TemplateConfig::from_value(&value).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }
}
