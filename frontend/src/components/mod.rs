pub mod header;
pub mod page;

#[cfg(test)]
pub(crate) mod test_support {
    use yew::{BaseComponent, ServerRenderer};

    pub async fn render<C>(props: C::Properties) -> String
    where
        C: BaseComponent,
        C::Properties: Send + 'static,
    {
        ServerRenderer::<C>::with_props(move || props)
            .hydratable(false)
            .render()
            .await
    }

    /// Returns the opening tag of the anchor whose text is `label`.
    pub fn anchor_tag<'a>(html: &'a str, label: &str) -> Option<&'a str> {
        let text_at = html.find(&format!(">{}</a>", label))?;
        let open_at = html[..text_at].rfind("<a")?;
        Some(&html[open_at..=text_at])
    }
}
