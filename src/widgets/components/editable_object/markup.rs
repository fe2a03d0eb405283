use super::*;

use crate::assets::{
    self, CONTAINER_CLASS_MARKER, NEW_PROPERTY_MARKER, PROPERTIES_MARKER, escape_html,
};

const ICON_UP: &str = "m5 9 1.41 1.41L11 5.83V22h2V5.83l4.59 4.59L19 9l-7-7-7 7z";
const ICON_DOWN: &str = "m19 15-1.41-1.41L13 18.17V2h-2v16.17l-4.59-4.59L5 15l7 7 7-7z";
const ICON_REMOVE: &str = "M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zM19 4h-3.5l-1-1h-5l-1 1H5v2h14V4z";
const ICON_ADD: &str = "M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z";

impl EditableObject {
    /// Shadow-root HTML for the current state.
    pub fn render_markup(&self) -> String {
        let container = self.container_class();
        let properties: String = self.rows.iter().map(row_markup).collect();
        let new_property = self.new_property_markup();
        assets::fill_template(
            &assets::shadow_template(),
            &[
                (CONTAINER_CLASS_MARKER, container.as_str()),
                (PROPERTIES_MARKER, properties.as_str()),
                (NEW_PROPERTY_MARKER, new_property.as_str()),
            ],
        )
    }

    fn container_class(&self) -> String {
        let mut class = String::from("editable-object");
        if self.touch {
            class.push_str(" touch");
        }
        if self.defocused {
            class.push_str(" defocused");
        }
        class
    }

    fn new_property_markup(&self) -> String {
        if self.disable_edit() {
            return String::new();
        }
        let input_class = if self.add_input.invalid {
            "add-new-object-property-input invalid"
        } else {
            "add-new-object-property-input"
        };
        format!(
            concat!(
                r#"<div class="new-object-property">"#,
                r#"<input class="{}" type="text" placeholder="{}" value="{}" />"#,
                r#"<button class="editable-object-add-property icon" title="Add property">{}</button>"#,
                "</div>"
            ),
            input_class,
            escape_html(self.add_property_placeholder()),
            escape_html(&self.add_input.text),
            icon(ICON_ADD),
        )
    }
}

fn row_markup(row: &PropertyRow) -> String {
    let mut classes = Vec::new();
    if row.selected {
        classes.push("selected");
    }
    if row.editing {
        classes.push("editing");
    }
    if row.invalid {
        classes.push("invalid");
    }
    let key = escape_html(&row.key);
    let readonly = if row.editing { "" } else { r#" readonly="true""# };
    let tabindex = if row.tabbable { "0" } else { "-1" };

    let buttons: String = [
        ("editable-object-up-property", "Move up", ICON_UP, row.toolbar.move_up),
        ("editable-object-down-property", "Move down", ICON_DOWN, row.toolbar.move_down),
        ("editable-object-remove-property", "Remove", ICON_REMOVE, row.toolbar.remove),
    ]
    .into_iter()
    .filter_map(|(class, title, path, control)| {
        let visibility = match control {
            Control::Enabled => "visible",
            Control::Hidden => "hidden",
            Control::Removed => return None,
        };
        Some(format!(
            r#"<button class="{class} icon" title="{title}" tabindex="{tabindex}" style="visibility:{visibility}">{}</button>"#,
            icon(path)
        ))
    })
    .collect();

    format!(
        concat!(
            r#"<li class="{}" data-key="{}">"#,
            r#"<div class="property-wrapper">"#,
            r#"<label for="eo-{}-value">{}</label>"#,
            r#"<input{} id="eo-{}-value" type="text" value="{}" />"#,
            "</div>",
            r#"<div class="toolbar">{}</div>"#,
            "</li>"
        ),
        classes.join(" "),
        key,
        key,
        key,
        readonly,
        key,
        escape_html(&row.display),
        buttons,
    )
}

fn icon(path: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><path d="{path}"></path></svg>"#
    )
}
