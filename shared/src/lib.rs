use serde::{Deserialize, Serialize};

pub const SITE_NAME: &str = "Phonon Asthma Predictor";
pub const LAB_SUFFIX: &str = " by Asquire Lab";

/// Target used for links that do not lead anywhere yet.
pub const PLACEHOLDER_HREF: &str = "#";

/// URL prefix the backend mounts the static asset directory on.
pub const STATIC_PREFIX: &str = "/static";

pub const SPIRE_LOGO_FILE: &str = "spire_logo_sq.png";
pub const IISC_LOGO_FILE: &str = "iisc_logo.png";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReference {
    pub url: String,
}

impl LinkReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_HREF)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    pub website_name: String,
    pub about_link: LinkReference,
    /// Accepted but not rendered yet; the consent anchor always points at `#`.
    pub consent_link: LinkReference,
}

impl HeaderConfig {
    /// Configuration the home page renders with.
    pub fn home() -> Self {
        Self {
            website_name: SITE_NAME.to_string(),
            about_link: LinkReference::placeholder(),
            consent_link: LinkReference::placeholder(),
        }
    }

    pub fn title(&self) -> String {
        site_title(&self.website_name)
    }
}

/// Banner text: the site name followed by the lab credit.
pub fn site_title(website_name: &str) -> String {
    format!("{}{}", website_name, LAB_SUFFIX)
}

pub fn static_asset_url(file_name: &str) -> String {
    format!("{}/{}", STATIC_PREFIX, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_appends_lab_suffix() {
        let config = HeaderConfig {
            website_name: "Wheeze Watch".into(),
            ..HeaderConfig::default()
        };
        assert_eq!(config.title(), "Wheeze Watch by Asquire Lab");
    }

    #[test]
    fn empty_name_still_renders_suffix() {
        assert_eq!(HeaderConfig::default().title(), " by Asquire Lab");
        assert_eq!(site_title(""), " by Asquire Lab");
    }

    #[test]
    fn home_uses_placeholder_links() {
        let config = HeaderConfig::home();
        assert_eq!(config.website_name, "Phonon Asthma Predictor");
        assert_eq!(config.about_link.url, "#");
        assert_eq!(config.consent_link.url, "#");
    }

    #[test]
    fn header_config_reads_camel_case_json() {
        let json = r#"{
            "websiteName": "Phonon Asthma Predictor",
            "aboutLink": { "url": "/about" },
            "consentLink": { "url": "/consent" }
        }"#;
        let config: HeaderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.about_link, LinkReference::new("/about"));
        assert_eq!(config.consent_link, LinkReference::new("/consent"));
    }

    #[test]
    fn static_asset_url_uses_prefix() {
        assert_eq!(static_asset_url(IISC_LOGO_FILE), "/static/iisc_logo.png");
    }
}
