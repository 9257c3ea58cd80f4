//! Concrete field types.

mod action;
mod choice;
mod date;
mod file;
mod input;
mod plain;
mod select;
mod select_date;
mod textarea;

pub use action::{Action, ActionKind};
pub use choice::{Checkbox, Radio};
pub use date::{Date, DateInput};
pub use file::{File, FileUpload, UploadedFiles};
pub use input::{Input, InputKind};
pub use plain::PlainText;
pub use select::{Select, SelectMultiple};
pub use select_date::{DateUnit, PickerRange, SelectDate};
pub use textarea::Textarea;

/// Opens `tag`, with a space before the attributes only when there are any.
pub(crate) fn open_tag(tag: &str, attributes: &str) -> String {
    if attributes.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} {attributes}>")
    }
}
