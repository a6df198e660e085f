use crate::doc_example::respond;
use crate::doc_example::Outcome;
use apollo_response::GraphQLError;
use apollo_response::JsonMap;
use apollo_response::JsonValue;
use apollo_response::ResponseDataPathSegment;
use expect_test::expect;

fn render(outcome: Outcome) -> String {
    let mut out = Vec::new();
    let written = respond(outcome, &mut out).unwrap();
    assert_eq!(written, out.len());
    String::from_utf8(out).unwrap()
}

#[test]
fn request_error_has_no_data_key() {
    let output = render(Outcome::RequestError("missing field x".into()));
    expect![[r#"{"errors":[{"message":"bad request: missing field x"}]}"#]].assert_eq(&output);
}

#[test]
fn null_propagated_to_root() {
    let output = render(Outcome::Executed {
        data: None,
        errors: vec![GraphQLError::new("non-null field was null").with_path([ResponseDataPathSegment::from("hero")])],
    });
    expect![[r#"{"errors":[{"message":"non-null field was null","path":["hero"]}],"data":null}"#]]
        .assert_eq(&output);
}

#[test]
fn executed_with_data() {
    let mut data = JsonMap::new();
    data.insert("hero", JsonValue::from("R2-D2"));
    let output = render(Outcome::Executed {
        data: Some(data),
        errors: Vec::new(),
    });
    expect![[r#"{"data":{"hero":"R2-D2"}}"#]].assert_eq(&output);
}
