//! Static shadow-root assets.

const STYLESHEET: &str = include_str!("assets/editable-object.css");
const TEMPLATE: &str = include_str!("assets/editable-object.html");

/// Replaced with the stylesheet before first render.
pub const STYLE_MARKER: &str = "__STYLE__";
pub const CONTAINER_CLASS_MARKER: &str = "__CONTAINER_CLASS__";
pub const PROPERTIES_MARKER: &str = "__PROPERTIES__";
pub const NEW_PROPERTY_MARKER: &str = "__NEW_PROPERTY__";

/// The widget stylesheet, verbatim.
pub fn stylesheet_text() -> &'static str {
    STYLESHEET
}

/// Shadow-root template with the stylesheet inlined and the render-time
/// markers still in place.
pub fn shadow_template() -> String {
    TEMPLATE.replace(STYLE_MARKER, STYLESHEET)
}

/// Substitutes each marker with its slot text in a single left-to-right
/// pass, so slot text is never rescanned for markers.
pub fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = slots
            .iter()
            .filter_map(|(marker, text)| rest.find(marker).map(|at| (at, *marker, *text)))
            .min_by_key(|(at, ..)| *at);
        let Some((at, marker, text)) = next else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..at]);
        out.push_str(text);
        rest = &rest[at + marker.len()..];
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
