mod common;

use std::collections::HashMap;

use common::{Comment, Post, User, COMMENTS, FULL_POST, PARTIAL_POST};
use json_path_attribute::{
    AttrType, AttributeDefinition, DocumentMapper, FieldValue, MapError, MappingRegistry,
    NativeNode,
};
use serde_json::{json, Value};

fn registry() -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry.register_type::<Post>().unwrap();
    registry
}

#[test]
fn register_type_pulls_in_referenced_types() {
    let registry = registry();
    for name in ["Post", "User", "Comment"] {
        assert!(registry.contains(name), "{name} not registered");
    }
    let post: Vec<_> = registry.definitions_for("Post").unwrap().keys().cloned().collect();
    assert_eq!(post, vec!["title", "body", "author", "comments"]);
}

#[test]
fn parses_text_into_typed_post() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let post: Post = mapper.parse_as(FULL_POST).unwrap();

    assert_eq!(post.title.as_deref(), Some("How to drive on snow?"));
    assert_eq!(
        post.body.as_deref(),
        Some("Use a low gear and slowly build up the speed.")
    );

    let author = post.author.unwrap();
    assert_eq!(author.name.as_deref(), Some("James May"));
    assert_eq!(author.email.as_deref(), Some("jamesmay@example.com"));

    assert_eq!(post.comments.len(), 2);
    assert_eq!(
        post.comments[0].body.as_deref(),
        Some("Thank you for the tip! It is very useful.")
    );
    assert_eq!(post.comments[0].likes, Some(5));
    assert_eq!(post.comments[1].likes, Some(15));
    assert_eq!(
        post.comments[0].commenter.as_ref().unwrap().name.as_deref(),
        Some("Charles Careful")
    );
}

#[test]
fn partial_document_leaves_missing_fields_unset() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let post: Post = mapper.parse_as(PARTIAL_POST).unwrap();

    assert_eq!(post.title.as_deref(), Some("How to drive on snow?"));
    assert_eq!(post.body, None);

    let author = post.author.unwrap();
    assert_eq!(author.name.as_deref(), Some("James May"));
    assert_eq!(author.email, None);

    assert!(post.comments.is_empty());
}

#[test]
fn partial_document_record_view() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let post = mapper.parse("Post", PARTIAL_POST).unwrap();

    assert!(!post.contains("body"));
    assert!(!post.record("author").unwrap().contains("email"));
    assert_eq!(post.get("comments"), Some(&FieldValue::List(vec![])));
}

#[test]
fn parses_native_map_input() {
    let mut content = HashMap::new();
    content.insert("title", "How to drive on ice?");
    content.insert("body", "Full throttle and just drift.");

    let mut user = HashMap::new();
    user.insert("name", "Erik Exciting");
    user.insert("email", "erikexciting@example.com");

    let mut comment: HashMap<&str, Value> = HashMap::new();
    comment.insert("content", json!({"body": "Thank you for the tip! I am very excited!"}));
    comment.insert("likes", 5i64.into_node());
    comment.insert("user", user.into_node());

    let mut data: HashMap<&str, Value> = HashMap::new();
    data.insert("content", content.into_node());
    data.insert("comments", vec![comment].into_node());

    let mut input = HashMap::new();
    input.insert("data", data);

    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let post: Post = mapper.parse_as(input).unwrap();

    assert_eq!(post.title.as_deref(), Some("How to drive on ice?"));
    assert_eq!(post.body.as_deref(), Some("Full throttle and just drift."));
    assert_eq!(post.author, None);
    assert_eq!(post.comments.len(), 1);
    assert_eq!(
        post.comments[0].commenter.as_ref().unwrap().name.as_deref(),
        Some("Erik Exciting")
    );
}

#[test]
fn parses_collection() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let comments: Vec<Comment> = mapper.parse_collection_as(COMMENTS).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(
        comments[0].body.as_deref(),
        Some("Thank you for the tip! It is very useful.")
    );
    assert_eq!(
        comments[0].commenter.as_ref().unwrap().name.as_deref(),
        Some("Charles Careful")
    );

    let records = mapper.parse_collection("Comment", COMMENTS).unwrap();
    assert!(records.iter().all(|r| r.type_name() == "Comment"));
}

#[test]
fn parses_collection_from_native_sequence() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let mut first: HashMap<&str, Value> = HashMap::new();
    first.insert("likes", json!(5));
    first.insert("user", json!({"name": "Erik Exciting"}));
    let mut second: HashMap<&str, Value> = HashMap::new();
    second.insert("likes", json!(15));
    second.insert("user", json!({"name": "Sully Slow"}));

    let comments: Vec<Comment> = mapper.parse_collection_as(vec![first, second]).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].likes, Some(15));
    assert_eq!(
        comments[1].commenter.as_ref().unwrap().name.as_deref(),
        Some("Sully Slow")
    );
}

#[test]
fn parses_first_only() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let comment: Comment = mapper.parse_first_as(COMMENTS).unwrap();
    assert_eq!(
        comment.body.as_deref(),
        Some("Thank you for the tip! It is very useful.")
    );
    assert_eq!(
        comment.commenter.unwrap().name.as_deref(),
        Some("Charles Careful")
    );

    let err = mapper.parse_first_as::<Comment, _>("[]").unwrap_err();
    assert!(matches!(err, MapError::EmptySequence));
}

#[test]
fn end_to_end_blog_document() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let post: Post = mapper
        .parse_as(json!({"data": {
            "content": {"title": "T", "body": "B"},
            "user": {"name": "N", "email": "E"},
            "comments": [{"content": {"body": "C1"}, "likes": 5, "user": {"name": "U1", "email": "e1"}}]
        }}))
        .unwrap();

    assert_eq!(post.title.as_deref(), Some("T"));
    assert_eq!(post.author.unwrap().name.as_deref(), Some("N"));
    assert_eq!(post.comments.len(), 1);
    assert_eq!(
        post.comments[0].commenter.as_ref().unwrap().name.as_deref(),
        Some("U1")
    );
}

#[test]
fn null_author_object_fails_only_when_array_element() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    // A null single object is absent, not an error.
    let post: Post = mapper.parse_as(json!({"data": {"user": null}})).unwrap();
    assert_eq!(post.author, None);

    let err = mapper
        .parse_as::<Post, _>(json!({"data": {"comments": [{"likes": 1}, null]}}))
        .unwrap_err();
    assert!(matches!(err, MapError::NullObject { ref type_name } if type_name == "Comment"));
}

#[test]
fn wildcard_field_with_null_match_raises_null_object() {
    let mut registry = MappingRegistry::new();
    registry
        .declare("User")
        .field("name", "name", AttrType::String)
        .unwrap();
    registry
        .declare("Thread")
        .array_field("authors", "posts[*].author", AttrType::mapped("User"))
        .unwrap();

    let mapper = DocumentMapper::new(&registry);
    let ok = mapper
        .parse(
            "Thread",
            json!({"posts": [{"author": {"name": "A"}}, {"author": {"name": "B"}}]}),
        )
        .unwrap();
    assert_eq!(ok.list("authors").unwrap().len(), 2);

    let err = mapper
        .parse(
            "Thread",
            json!({"posts": [{"author": {"name": "A"}}, {"author": null}]}),
        )
        .unwrap_err();
    assert!(matches!(err, MapError::NullObject { .. }));
}

#[test]
fn array_field_given_scalar_is_a_cast_error() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let err = mapper
        .parse_as::<Post, _>(json!({"data": {"comments": "none"}}))
        .unwrap_err();
    assert!(matches!(err, MapError::TypeCast { ref kind, .. } if kind == "array of Comment"));
}

#[test]
fn nested_values_holding_json_text_are_decoded() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let post: Post = mapper
        .parse_as(json!({"data": {
            "user": r#"{"name": "James May"}"#,
            "comments": [r#"{"likes": 3, "user": "{\"name\": \"Freddy Fast\"}"}"#]
        }}))
        .unwrap();
    assert_eq!(post.author.unwrap().name.as_deref(), Some("James May"));
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].likes, Some(3));
    assert_eq!(
        post.comments[0].commenter.as_ref().unwrap().name.as_deref(),
        Some("Freddy Fast")
    );

    let users: Vec<User> = mapper
        .parse_collection_as(json!([r#"{"name": "A"}"#, {"name": "B"}]))
        .unwrap();
    let names: Vec<_> = users.iter().map(|u| u.name.as_deref()).collect();
    assert_eq!(names, vec![Some("A"), Some("B")]);
}

#[test]
fn nested_malformed_text_is_a_decode_error() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let err = mapper
        .parse("Post", json!({"data": {"user": "not json"}}))
        .unwrap_err();
    assert!(matches!(err, MapError::Decode(_)));

    let err = mapper
        .parse_first("User", json!(["{\"name\": "]))
        .unwrap_err();
    assert!(matches!(err, MapError::Decode(_)));
}

#[test]
fn malformed_text_is_a_decode_error() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);
    let err = mapper.parse("Post", "{\"data\": ").unwrap_err();
    assert!(matches!(err, MapError::Decode(_)));
}

#[test]
fn scalar_kinds_end_to_end() {
    let mut registry = MappingRegistry::new();
    registry
        .declare("Product")
        .field("raw", "meta", AttrType::Source)
        .unwrap()
        .field("id", "id", AttrType::Integer)
        .unwrap()
        .field("price", "price", AttrType::Decimal)
        .unwrap()
        .field("sku", "sku", AttrType::String)
        .unwrap()
        .field("in_stock", "stock.available", AttrType::Boolean)
        .unwrap()
        .array_field("flags", "flags", AttrType::Boolean)
        .unwrap()
        .array_field("sizes", "variants[*].size", AttrType::Integer)
        .unwrap()
        .field("display name", "display name", AttrType::String)
        .unwrap();

    let doc = json!({
        "meta": {"source": "feed", "rank": [1, 2]},
        "id": "00042",
        "price": 19.99,
        "sku": 12345,
        "stock": {"available": 0},
        "flags": [true, null, false],
        "variants": [{"size": 38}, {"size": "40"}, {"size": 41.5}],
        "display name": "Trail Runner"
    });

    let mapper = DocumentMapper::new(&registry);
    let product = mapper.parse("Product", &doc).unwrap();

    assert_eq!(product.raw("raw"), Some(&json!({"source": "feed", "rank": [1, 2]})));
    assert_eq!(product.integer("id"), Some(42));
    assert_eq!(product.get("price"), Some(&FieldValue::Decimal("19.99".into())));
    assert_eq!(product.str("sku"), Some("12345"));
    assert_eq!(product.boolean("in_stock"), Some(true));
    assert_eq!(
        product.get("flags"),
        Some(&FieldValue::List(vec![
            FieldValue::Bool(true),
            FieldValue::Bool(false),
            FieldValue::Bool(false),
        ]))
    );
    assert_eq!(
        product.get("sizes"),
        Some(&FieldValue::List(vec![
            FieldValue::Integer(38),
            FieldValue::Integer(40),
            FieldValue::Integer(41),
        ]))
    );
    assert_eq!(product.str("display name"), Some("Trail Runner"));
}

#[test]
fn attribute_definitions_can_be_registered_directly() {
    let mut registry = MappingRegistry::new();
    registry.register("Tag", "label", AttributeDefinition::source("label").unwrap());
    registry.register(
        "Tag",
        "label",
        AttributeDefinition::new("name", AttrType::String, false).unwrap(),
    );

    let mapper = DocumentMapper::new(&registry);
    let tag = mapper.parse("Tag", json!({"label": 1, "name": "rust"})).unwrap();
    assert_eq!(tag.len(), 1);
    assert_eq!(tag.str("label"), Some("rust"));
}

#[test]
fn mapper_is_shareable_across_threads() {
    let registry = registry();
    let mapper = DocumentMapper::new(&registry);

    let titles: Vec<Option<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || mapper.parse_as::<Post, _>(FULL_POST).unwrap().title))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(titles
        .iter()
        .all(|t| t.as_deref() == Some("How to drive on snow?")));
}

#[test]
fn typed_user_ignores_unknown_record_fields() {
    let mut registry = MappingRegistry::new();
    registry.register_type::<User>().unwrap();
    registry
        .declare("User")
        .field("nickname", "nick", AttrType::String)
        .unwrap();

    let mapper = DocumentMapper::new(&registry);
    let user: User = mapper
        .parse_as(json!({"name": "N", "email": "E", "nick": "n"}))
        .unwrap();
    assert_eq!(
        user,
        User {
            name: Some("N".into()),
            email: Some("E".into()),
        }
    );
}
