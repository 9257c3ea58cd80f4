#![allow(dead_code)]

use oxide_formkit::{
    Checkbox, Element, Field, FieldOption, Fieldset, Form, FormError, Input, Select, Textarea,
};

/// A comment form with a required author, a comment box and a topic.
pub fn comment_form() -> Form {
    let mut form = Form::new("./").with_identifier("comment_form");
    form.add(Input::hidden("token").with_value("secret"));
    form.add(Input::text("author").with_label("Author").with_required(true));
    form.add(Textarea::new("comment").with_value("hello"));
    form.add(
        Select::new("topic")
            .with_label("Topic")
            .with_options([FieldOption::new("News", "news"), FieldOption::new("Help", "help")]),
    );
    form
}

pub fn agree_checkbox() -> Checkbox {
    Checkbox::new("agree")
        .with_label("Terms")
        .with_options([FieldOption::new("I agree", 1)])
}

/// Splits rendered markup into its lines.
pub fn lines(html: &str) -> Vec<&str> {
    html.lines().collect()
}

/// Returns the messages recorded on the field stored under `id`.
pub fn messages(fieldset: &Fieldset, id: &str) -> Vec<String> {
    fieldset
        .field(id)
        .unwrap_or_else(|e| panic!("Expected field {id}: {e}"))
        .error_bag()
        .all()
        .to_vec()
}

pub fn expect_not_found(result: Result<&dyn Element, FormError>, id: &str) {
    match result {
        Err(FormError::FieldNotFound(missing)) => assert_eq!(missing, id),
        Err(other) => panic!("Expected FieldNotFound({id}), got {other:?}"),
        Ok(_) => panic!("Expected FieldNotFound({id}), got an element"),
    }
}
