//! Building, querying and rendering trees of fieldsets.

mod common;
use common::*;

use oxide_formkit::{
    Condition, Element, Fieldset, FormError, Input, PlainText, Select, Textarea,
};

#[test]
fn set_then_get_returns_the_stored_field() {
    let mut fieldset = Fieldset::new();
    fieldset.set("comment", Textarea::new("comment").with_value("hello"));

    let stored = fieldset.get("comment").unwrap();
    assert_eq!(stored.identify(), Some("comment"));
    assert_eq!(fieldset.get_as::<Textarea>("comment").unwrap().value(), "hello");

    fieldset.remove("comment").unwrap();
    expect_not_found(fieldset.get("comment"), "comment");
    assert!(!fieldset.has("comment"));
}

#[test]
fn get_unknown_identifier_fails() {
    let form = comment_form();
    expect_not_found(form.get("missing"), "missing");
    assert!(matches!(
        form.fieldset().field("missing"),
        Err(FormError::FieldNotFound(_))
    ));
}

#[test]
fn children_keep_insertion_order() {
    let form = comment_form();
    let keys: Vec<&str> = form.all().map(|(key, _)| key).collect();
    assert_eq!(keys, ["token", "author", "comment", "topic"]);
}

#[test]
fn mutations_through_typed_access_are_rendered() {
    let mut form = comment_form();
    form.get_as_mut::<Select>("topic").unwrap().set_value("help");
    assert!(form
        .render()
        .contains(r#"<option id="topic_1" value="help" selected="selected">Help</option>"#));
}

#[test]
fn validity_is_the_and_of_children() {
    let mut fieldset = Fieldset::new();
    assert!(fieldset.is_valid());

    fieldset.add(Input::text("a").with_value("1"));
    fieldset.add(Input::text("b").with_value("2"));
    fieldset.add(PlainText::new("static"));
    assert!(fieldset.is_valid());

    let digits = Condition::pattern("^[0-9]+$");
    for id in ["a", "b"] {
        fieldset.field_mut(id).unwrap().condition(&digits, "Digits").unwrap();
    }
    assert!(fieldset.is_valid());

    fieldset
        .field_mut("b")
        .unwrap()
        .condition(&Condition::one_of(["1"]), "Must be one")
        .unwrap();
    assert!(!fieldset.is_valid());
    assert_eq!(messages(&fieldset, "a"), Vec::<String>::new());
    assert_eq!(messages(&fieldset, "b"), ["Must be one"]);
    assert_eq!(fieldset.errors().all(), ["Must be one"]);
}

#[test]
fn nested_fieldset_renders_inside_an_entry() {
    let address = Fieldset::new()
        .with_identifier("address")
        .with_label("Address")
        .with(Input::text("city"));
    let mut outer = Fieldset::new();
    outer.add(address);

    assert_eq!(
        outer.render(),
        concat!(
            "<ul><li>",
            "<legend>Address</legend>",
            r#"<ul><li><label for="city">city</label><input type="text" id="city" name="city"/></li></ul>"#,
            "</li></ul>"
        )
    );
    assert!(outer.get_as::<Fieldset>("address").unwrap().has("city"));
}

#[test]
fn prototype_is_escaped_on_one_line() {
    let form = comment_form();
    let prototype = form.prototype();
    assert!(!prototype.contains('\n'));
    assert!(!prototype.contains('<'));
    assert!(prototype.contains("&lt;textarea id=&quot;comment&quot;"));

    let fieldset = Fieldset::new().with(Input::text("x"));
    assert_eq!(
        fieldset.prototype(),
        "&lt;ul&gt;&lt;li&gt;&lt;label for=&quot;x&quot;&gt;x&lt;/label&gt;&lt;input type=&quot;text&quot; id=&quot;x&quot; name=&quot;x&quot;/&gt;&lt;/li&gt;&lt;/ul&gt;"
    );
}

#[test]
fn reset_empties_the_fieldset() {
    let mut form = comment_form();
    assert_eq!(form.count(), 4);
    form.reset();
    assert!(form.is_empty());
    assert!(form.is_valid());
}
