use oas_ops_core::declare::Declarations;
use oas_ops_core::oas::traversal::slots;
use oas_ops_core::{
    all_operations, apply_tags, declare_response, operations_of, prepend_path, set_response_for,
    HttpMethod, ObjectSchema, OperationSelector, ToSchema,
};
use openapiv3::{OpenAPI, ReferenceOr, Response, Schema, StatusCode, Tag};
use pretty_assertions::assert_eq;

fn load(yaml: &str) -> OpenAPI {
    serde_yaml::from_str(yaml).unwrap()
}

fn path_keys(openapi: &OpenAPI) -> Vec<String> {
    openapi.paths.paths.keys().cloned().collect()
}

const PETSTORE: &str = r#"
openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200":
          description: OK
    post:
      operationId: createPet
      responses:
        "201":
          description: Created
  /pets/{petId}/:
    get:
      operationId: showPet
      responses:
        "200":
          description: OK
    delete:
      operationId: deletePet
      responses: {}
  /:
    options:
      responses: {}
"#;

struct Pet;

impl ToSchema for Pet {
    fn schema_name() -> Option<String> {
        Some("Pet".into())
    }

    fn declare_schema(decls: &mut Declarations) -> Schema {
        ObjectSchema::new()
            .field::<i64>(decls, "id", true)
            .field::<String>(decls, "name", true)
            .field::<Option<Category>>(decls, "category", false)
            .build()
    }
}

struct Category;

impl ToSchema for Category {
    fn schema_name() -> Option<String> {
        Some("Category".into())
    }

    fn declare_schema(decls: &mut Declarations) -> Schema {
        ObjectSchema::new()
            .field::<String>(decls, "label", true)
            .build()
    }
}

#[test]
fn test_prepend_path_scenario() {
    let openapi = load(
        r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /info: {}
"#,
    );
    let openapi = prepend_path("user/{user_id}", openapi);
    assert_eq!(path_keys(&openapi), vec!["/user/{user_id}/info"]);
}

#[test]
fn test_prepend_path_is_associative() {
    let nested = prepend_path("api", prepend_path("/v1/", load(PETSTORE)));
    let joined = prepend_path("api/v1", load(PETSTORE));
    assert_eq!(path_keys(&nested), path_keys(&joined));
    assert_eq!(
        path_keys(&joined),
        vec!["/api/v1/pets", "/api/v1/pets/{petId}", "/api/v1"]
    );
}

#[test]
fn test_prepend_empty_prefix_normalizes() {
    let openapi = prepend_path("", load(PETSTORE));
    assert_eq!(path_keys(&openapi), vec!["/pets", "/pets/{petId}", "/"]);

    let again = prepend_path("", openapi.clone());
    assert_eq!(path_keys(&again), path_keys(&openapi));
}

#[test]
fn test_all_operations_counts_present_slots() {
    let openapi = load(PETSTORE);
    let expected: usize = openapi
        .paths
        .paths
        .values()
        .filter_map(|item| item.as_item())
        .map(|item| slots(item).iter().filter(|slot| slot.is_some()).count())
        .sum();
    assert_eq!(expected, 5);
    assert_eq!(all_operations().operations(&openapi).count(), expected);
}

#[test]
fn test_operations_of_selects_only_sub_slots() {
    let openapi = load(PETSTORE);
    let sub = load(
        r#"
openapi: 3.0.0
info: {title: Sub, version: "1"}
paths:
  /pets/{petId}/:
    delete:
      responses: {}
    put:
      responses: {}
  /pets:
    get:
      responses: {}
"#,
    );

    let selected: Vec<(String, HttpMethod)> = operations_of(&sub)
        .operations(&openapi)
        .map(|r| (r.path.to_string(), r.method))
        .collect();
    assert_eq!(
        selected,
        vec![
            ("/pets".to_string(), HttpMethod::Get),
            ("/pets/{petId}/".to_string(), HttpMethod::Delete),
        ]
    );

    for selected in operations_of(&sub).operations(&openapi) {
        let sub_item = sub.paths.paths[selected.path].as_item().unwrap();
        let position = HttpMethod::ALL
            .iter()
            .position(|m| *m == selected.method)
            .unwrap();
        assert!(slots(sub_item)[position].is_some());
    }
}

#[test]
fn test_apply_tags_is_idempotent() {
    let tag = Tag {
        name: "pets".into(),
        description: Some("Pet operations".into()),
        external_docs: None,
        extensions: Default::default(),
    };
    let once = apply_tags(&[tag.clone()], load(PETSTORE));
    let twice = apply_tags(&[tag], once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.tags.len(), 1);
    assert!(all_operations()
        .operations(&once)
        .all(|r| r.operation.tags == vec!["pets".to_string()]));
}

#[test]
fn test_set_response_for_declares_schemas() {
    let openapi = set_response_for(
        &all_operations(),
        200,
        declare_response::<Vec<Pet>>("application/json"),
        load(PETSTORE),
    );

    let schemas = &openapi.components.as_ref().unwrap().schemas;
    let names: Vec<&str> = schemas.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Pet", "Category"]);

    for selected in all_operations().operations(&openapi) {
        let installed = &selected.operation.responses.responses[&StatusCode::Code(200)];
        let response = match installed {
            ReferenceOr::Item(response) => response,
            ReferenceOr::Reference { .. } => panic!("installed response must be inline"),
        };
        let schema = response.content["application/json"].schema.as_ref().unwrap();
        let items = match schema {
            ReferenceOr::Item(Schema {
                schema_kind: openapiv3::SchemaKind::Type(openapiv3::Type::Array(arr)),
                ..
            }) => arr.items.clone().unwrap(),
            other => panic!("expected inline array schema, got {:?}", other),
        };
        assert_eq!(
            items,
            ReferenceOr::Reference {
                reference: "#/components/schemas/Pet".into()
            }
        );
    }
}

#[test]
fn test_set_response_through_sub_document() {
    let openapi = load(
        r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /user:
    get:
      responses:
        "200":
          description: OK
    post:
      responses:
        "200":
          description: OK
"#,
    );
    let sub = load(
        r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /user:
    get:
      responses: {}
"#,
    );

    let declared = declare_response::<String>("text/plain").map(|mut response: Response| {
        response.description = "Not found".into();
        response
    });
    let openapi = set_response_for(&operations_of(&sub), 404, declared, openapi);

    let item = openapi.paths.paths["/user"].as_item().unwrap();
    let get_codes: Vec<StatusCode> = item
        .get
        .as_ref()
        .unwrap()
        .responses
        .responses
        .keys()
        .cloned()
        .collect();
    assert_eq!(get_codes, vec![StatusCode::Code(200), StatusCode::Code(404)]);

    let post_codes: Vec<StatusCode> = item
        .post
        .as_ref()
        .unwrap()
        .responses
        .responses
        .keys()
        .cloned()
        .collect();
    assert_eq!(post_codes, vec![StatusCode::Code(200)]);
    assert!(openapi.components.is_none());
}
