//! The built-in widget catalog.

use crate::catalog::{Catalog, Entry};
use crate::error::CatalogError;

/// `(name, description, icon key, reference URL)`
type Row = (&'static str, &'static str, &'static str, &'static str);

const DOCS: &str = "https://developer.apple.com/documentation/swiftui";

const TEXT_IO: &[Row] = &[
    ("Text", "Displays text.", "textformat", "text"),
    ("Label", "Displays a label.", "tag", "label"),
    ("TextField", "A text input field.", "text.cursor", "textfield"),
    ("SecureField", "A secure text input field.", "lock", "securefield"),
    ("TextArea", "A multiline text input area.", "rectangle.and.pencil.and.ellipsis", "texteditor"),
    ("Image", "Displays an image.", "photo", "image"),
];

const CONTROLS: &[Row] = &[
    ("Button", "A button control.", "rectangle", "button"),
    ("Menu", "A menu control.", "ellipsis", "menu"),
    ("Link", "A link to open a URL.", "link", "link"),
    ("Slider", "A slider control.", "slider.horizontal.3", "slider"),
    ("Stepper", "A stepper control.", "minus.slash.plus", "stepper"),
    ("Toggle", "A toggle switch.", "switch.2", "toggle"),
    ("Picker", "A picker control.", "square.grid.3x3", "picker"),
    ("DatePicker", "A date picker control.", "calendar", "datepicker"),
    ("ColorPicker", "A color picker control.", "eyedropper.full", "colorpicker"),
    ("ProgressView", "A progress view.", "hourglass", "progressview"),
];

const CONTAINERS: &[Row] = &[
    ("HStack", "A horizontal stack.", "rectangle.split.3x1.fill", "hstack"),
    ("VStack", "A vertical stack.", "rectangle.split.3x3.fill", "vstack"),
    ("ZStack", "A stack with overlapping views.", "square.on.square", "zstack"),
    ("Form", "A form view.", "square.and.pencil", "form"),
    ("NavigationView", "A view with navigation capabilities.", "map", "navigationview"),
    ("Alert", "An alert dialog.", "exclamationmark.triangle", "alert"),
    ("Sheet", "A sheet presentation.", "doc.on.clipboard", "sheet"),
];

const LIST_STYLES: &[Row] = &[
    ("Plain", "A plain list style.", "list.bullet", "list"),
    ("Inset", "An inset list style.", "list.bullet.indent", "list"),
    ("Grouped", "A grouped list style.", "list.bullet.rectangle", "list"),
    ("Inset Grouped", "An inset grouped list style.", "list.bullet.rectangle.portrait", "list"),
    ("Sidebar", "A sidebar list style.", "sidebar.left", "list"),
];

/// Section titles paired with their rows, in display order.
const SECTIONS: &[(&str, &[Row])] = &[
    ("Text Input/Output", TEXT_IO),
    ("Controls", CONTROLS),
    ("Container Views", CONTAINERS),
    ("List", LIST_STYLES),
];

/// Build the built-in catalog.
///
/// The table above is a literal, so this only fails if someone edits it into
/// a malformed state (duplicate names or titles).  Callers should treat an
/// error as fatal at startup.
pub fn catalog() -> Result<Catalog, CatalogError> {
    SECTIONS
        .iter()
        .fold(Catalog::builder(), |builder, (title, rows)| {
            builder.section(
                *title,
                rows.iter().map(|(name, description, icon, page)| {
                    Entry::new(*name, *description, *icon, format!("{DOCS}/{page}"))
                }),
            )
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_builds() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.sections().len(), 4);
        assert_eq!(catalog.len(), 28);
    }

    #[test]
    fn seed_has_no_empty_sections() {
        let catalog = catalog().unwrap();
        assert!(catalog.sections().iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn seed_section_order() {
        let catalog = catalog().unwrap();
        let titles: Vec<_> = catalog.sections().iter().map(|s| s.title()).collect();
        assert_eq!(titles, ["Text Input/Output", "Controls", "Container Views", "List"]);
    }

    #[test]
    fn seed_urls_point_at_reference_docs() {
        let catalog = catalog().unwrap();
        let area = catalog.lookup("TextArea").unwrap();
        assert_eq!(
            area.reference_url(),
            "https://developer.apple.com/documentation/swiftui/texteditor"
        );
        let sidebar = catalog.lookup("Sidebar").unwrap();
        assert_eq!(
            sidebar.reference_url(),
            "https://developer.apple.com/documentation/swiftui/list"
        );
    }

    #[test]
    fn seed_names_with_spaces_are_kept() {
        let catalog = catalog().unwrap();
        assert!(catalog.lookup("Inset Grouped").is_some());
    }
}
