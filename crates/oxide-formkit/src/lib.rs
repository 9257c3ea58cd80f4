//! # oxide-formkit
//!
//! Server-side HTML form building: fields, fieldsets and forms modelled as
//! a tree of elements and rendered to markup strings.
//!
//! This crate provides:
//! - Attribute, error and option bags with a fixed attribute order
//! - Text, choice, date and file fields sharing one [`Field`] trait
//! - Validation conditions collected as inline messages
//! - Fieldsets and forms that aggregate validity and render their children
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_formkit::{Checkbox, Element, Field, FieldOption, Form, Input, Textarea};
//!
//! let mut form = Form::new("/comments").with_label("Leave a comment");
//! form.add(Input::text("author").with_required(true));
//! form.add(Textarea::new("comment").with_value("hello"));
//! form.add(
//!     Checkbox::new("notify")
//!         .with_label("Notify me")
//!         .with_options([FieldOption::new("By email", "email")]),
//! );
//!
//! let html = form.render();
//! assert!(html.contains("<legend>Leave a comment</legend>"));
//! assert!(html.contains(
//!     r#"<textarea id="comment" name="comment" rows="10" cols="20">hello</textarea>"#
//! ));
//! ```
//!
//! ## Validation
//!
//! Conditions never fail the call: a failed condition records its message
//! on the field, which then renders it below the control.
//!
//! ```rust
//! use oxide_formkit::{Condition, Element, Field, Fieldset, Input};
//! use oxide_formkit::validation::EmailValidator;
//!
//! let mut fieldset = Fieldset::new();
//! fieldset.add(Input::email("email").with_value("not an address"));
//!
//! let email = fieldset.field_mut("email").unwrap();
//! email.validate(&EmailValidator::new()).unwrap();
//! email.condition(&Condition::pattern("@example\\.com$"), "Use your work address").unwrap();
//!
//! assert!(!fieldset.is_valid());
//! assert_eq!(fieldset.errors().count(), 2);
//! ```
//!
//! ## Fields
//!
//! - [`Input`] - Text, password, email, url, tel and hidden inputs
//! - [`Textarea`] - Multi-line text
//! - [`Checkbox`], [`Radio`] - Option groups
//! - [`Select`], [`SelectMultiple`] - Dropdowns with option groups
//! - [`Date`] - Free-form date input
//! - [`SelectDate`] - Date picked through one select per unit
//! - [`File`] - Uploads, read from [`UploadedFiles`]
//! - [`Action`] - Buttons and links
//! - [`PlainText`] - Static text

mod bag;
mod condition;
mod element;
mod error;
pub mod escape;
pub mod fields;
mod fieldset;
mod form;
mod option;
pub mod validation;

pub use bag::{AttrValue, AttributeBag, ErrorBag, OptionBag, RESERVED};
pub use condition::Condition;
pub use element::{Element, Field, FieldCore};
pub use error::{FormError, Result};
pub use fields::{
    Action, ActionKind, Checkbox, Date, DateInput, DateUnit, File, FileUpload, Input, InputKind,
    PickerRange, PlainText, Radio, Select, SelectDate, SelectMultiple, Textarea, UploadedFiles,
};
pub use fieldset::{Fieldset, Layout};
pub use form::{Form, DEFAULT_ENCTYPE, DEFAULT_METHOD};
pub use option::FieldOption;
