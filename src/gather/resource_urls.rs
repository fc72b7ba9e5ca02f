use std::collections::BTreeSet;

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// Tag/attribute pairs that reference sub-resources worth fetching.
pub const RESOURCE_ATTRS: [(&str, &str); 3] = [("script", "src"), ("link", "href"), ("img", "src")];

static RESOURCE_SELECTORS: Lazy<Vec<(Selector, &'static str)>> = Lazy::new(|| {
    RESOURCE_ATTRS
        .iter()
        .map(|(tag, attr)| {
            let sel = Selector::parse(&format!("{}[{}]", tag, attr)).expect("static selector");
            (sel, *attr)
        })
        .collect()
});

/// Collect absolute URLs of scripts, stylesheets and images referenced by `html`.
///
/// Attribute values are resolved against `base`; values that fail to resolve are
/// dropped. The set is keyed on the resolved string, so `/a.js` and
/// `http://host/a.js` collapse into one entry on that host.
pub fn extract_resource_urls(base: &Url, html: &str) -> BTreeSet<String> {
    let document = parse_without_scripting(html);
    let mut out = BTreeSet::new();

    for (sel, attr) in RESOURCE_SELECTORS.iter() {
        for element in document.select(sel) {
            let Some(value) = element.value().attr(attr) else { continue };
            match base.join(value) {
                Ok(u) => {
                    out.insert(u.to_string());
                }
                Err(e) => {
                    tracing::debug!(value = %value, error = %e, "skipping unresolvable resource reference");
                }
            }
        }
    }

    out
}

/// Parse as a browser with scripting off would, so `<noscript>` children are
/// elements rather than raw text.
fn parse_without_scripting(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts { scripting_enabled: false, ..Default::default() },
        ..Default::default()
    };
    html5ever::parse_document(Html::new_document(), opts).one(html)
}
