use shared::{
    HeaderConfig, IISC_LOGO_FILE, LinkReference, PLACEHOLDER_HREF, SPIRE_LOGO_FILE, site_title,
    static_asset_url,
};
use yew::prelude::*;

pub const LOGO_WIDTH: u32 = 65;
pub const LOGO_HEIGHT: u32 = 35;
// Both logos carry the same alt text.
pub const LOGO_ALT: &str = "Spire Logo";

#[derive(Properties, PartialEq, Clone, Debug)]
pub struct HeaderProps {
    pub website_name: String,
    pub about_link: LinkReference,
    pub consent_link: LinkReference,
}

impl From<HeaderConfig> for HeaderProps {
    fn from(config: HeaderConfig) -> Self {
        Self {
            website_name: config.website_name,
            about_link: config.about_link,
            consent_link: config.consent_link,
        }
    }
}

/// Site banner: project title, navigation anchors and the two lab logos.
///
/// `consent_link` is accepted but not wired up; the Consent anchor always
/// targets `#`.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let title = site_title(&props.website_name);

    html! {
        <header class="site-header">
            <div class="site-header__bar">
                <h2 class="site-header__title">{ title }</h2>

                <a class="site-header__link" href={props.about_link.url.clone()}>{"About"}</a>
                <a class="site-header__link site-header__link--last" href={PLACEHOLDER_HREF}>{"Consent"}</a>

                <div class="site-header__logos">
                    { render_logo(SPIRE_LOGO_FILE) }
                    { render_logo(IISC_LOGO_FILE) }
                </div>
            </div>
        </header>
    }
}

fn render_logo(file_name: &str) -> Html {
    html! {
        <img
            src={static_asset_url(file_name)}
            width={LOGO_WIDTH.to_string()}
            height={LOGO_HEIGHT.to_string()}
            alt={LOGO_ALT}
        />
    }
}
