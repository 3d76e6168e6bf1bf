use shared::HeaderConfig;
use yew::prelude::*;

use super::header::{Header, HeaderProps};

#[function_component(Page)]
pub fn page() -> Html {
    let header = HeaderProps::from(HeaderConfig::home());

    html! {
        <>
            <Header ..header />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::{anchor_tag, render};

    #[tokio::test]
    async fn page_renders_a_single_header() {
        let html = render::<Page>(()).await;
        assert_eq!(html.matches("<header").count(), 1);
        assert!(html.contains("Phonon Asthma Predictor by Asquire Lab"));
    }

    #[tokio::test]
    async fn page_has_no_navigation_outside_the_header() {
        let html = render::<Page>(()).await;
        assert_eq!(html.matches("<a ").count(), 2);
        assert!(!html.contains("<nav"));
        let header_end = html.find("</header>").expect("closing header tag");
        assert!(!html[header_end..].contains("<a "));
    }

    #[tokio::test]
    async fn page_links_are_placeholders() {
        let html = render::<Page>(()).await;
        for label in ["About", "Consent"] {
            let tag = anchor_tag(&html, label).expect("anchor");
            assert!(tag.contains(r##"href="#""##), "{label}: {tag}");
        }
    }
}
