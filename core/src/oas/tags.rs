//! # Tag Application
//!
//! Adds tags to a selection of operations and registers them at document level.

use crate::oas::traversal::{all_operations, OperationSelector};
use openapiv3::{OpenAPI, Operation, Tag};

/// Tags every operation of the document. See [`apply_tags_for`].
pub fn apply_tags(tags: &[Tag], openapi: OpenAPI) -> OpenAPI {
    apply_tags_for(&all_operations(), tags, openapi)
}

/// Adds the names of `tags` to every operation chosen by `selector`, and `tags`
/// themselves to the document's tag list.
///
/// Both lists behave as ordered sets keyed by name: names already present are
/// skipped, so applying the same tags twice changes nothing. At document level
/// an existing tag keeps its metadata.
pub fn apply_tags_for<S>(selector: &S, tags: &[Tag], mut openapi: OpenAPI) -> OpenAPI
where
    S: OperationSelector + ?Sized,
{
    let tagged = selector.update(&mut openapi, &mut |operation: &mut Operation| {
        for tag in tags {
            if !operation.tags.contains(&tag.name) {
                operation.tags.push(tag.name.clone());
            }
        }
    });

    for tag in tags {
        if !openapi.tags.iter().any(|known| known.name == tag.name) {
            openapi.tags.push(tag.clone());
        }
    }

    log::debug!("applied {} tags to {} operations", tags.len(), tagged);
    openapi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::traversal::operations_of;

    fn doc(yaml: &str) -> OpenAPI {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn tag(name: &str, description: Option<&str>) -> Tag {
        Tag {
            name: name.to_string(),
            description: description.map(str::to_string),
            external_docs: None,
            extensions: Default::default(),
        }
    }

    const USERS: &str = r#"
openapi: 3.0.0
info: {title: T, version: "1"}
tags:
  - name: users
    description: Original
paths:
  /users:
    get:
      tags: [users]
      responses: {}
    post:
      responses: {}
"#;

    #[test]
    fn test_apply_tags_unions_names() {
        let openapi = apply_tags(
            &[tag("users", Some("Replacement")), tag("admin", None)],
            doc(USERS),
        );

        let get = openapi.paths.paths["/users"].as_item().unwrap().get.as_ref().unwrap();
        assert_eq!(get.tags, vec!["users", "admin"]);
        let post = openapi.paths.paths["/users"].as_item().unwrap().post.as_ref().unwrap();
        assert_eq!(post.tags, vec!["users", "admin"]);

        let names: Vec<&str> = openapi.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "admin"]);
        assert_eq!(openapi.tags[0].description.as_deref(), Some("Original"));
    }

    #[test]
    fn test_apply_tags_for_subset_still_registers_globally() {
        let sub = doc(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /users:
    post:
      responses: {}
"#,
        );
        let openapi = apply_tags_for(&operations_of(&sub), &[tag("write", None)], doc(USERS));

        let item = openapi.paths.paths["/users"].as_item().unwrap();
        assert_eq!(item.get.as_ref().unwrap().tags, vec!["users"]);
        assert_eq!(item.post.as_ref().unwrap().tags, vec!["write"]);
        assert!(openapi.tags.iter().any(|t| t.name == "write"));
    }

    #[test]
    fn test_apply_tags_without_operations() {
        let openapi = apply_tags(&[tag("lonely", None)], OpenAPI::default());
        assert_eq!(openapi.tags.len(), 1);
    }
}
