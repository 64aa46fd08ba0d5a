//! Discovery of RDF variants advertised by HTML pages

use crate::rdf::RdfFormat;
use oxiri::Iri;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static LINK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<link\b([^>]*)>").expect("link tag pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("attribute pattern")
});

/// Find the first `<link rel="alternate">` whose type is Turtle or RDF/XML
/// and return its href, resolved against `base_uri`.
pub fn extract_rdf_alternate_link(html: &str, base_uri: &str) -> Option<String> {
    for tag in LINK_TAG.captures_iter(html) {
        let attributes = parse_attributes(&tag[1]);

        let is_alternate = attributes.get("rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|token| token.eq_ignore_ascii_case("alternate"))
        });
        let is_rdf = attributes
            .get("type")
            .is_some_and(|t| RdfFormat::from_media_type(t).is_some());

        if !(is_alternate && is_rdf) {
            continue;
        }

        match attributes.get("href").map(|href| href.trim()) {
            Some(href) if !href.is_empty() => {
                return resolve_reference(&href.replace("&amp;", "&"), base_uri);
            }
            _ => continue,
        }
    }
    None
}

/// Resolve a possibly-relative reference against `base`. The reference is
/// taken as-is; callers decode any markup escapes first.
pub(crate) fn resolve_reference(reference: &str, base: &str) -> Option<String> {
    if reference.starts_with("http") {
        return Some(reference.to_string());
    }

    let base = Iri::parse(base.to_string()).ok()?;
    base.resolve(reference).ok().map(Iri::into_inner)
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|c| {
            let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
            Some((c[1].to_ascii_lowercase(), value.as_str().to_string()))
        })
        .collect()
}
