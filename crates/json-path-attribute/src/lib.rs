//! Declarative mapping of JSON documents onto typed records.
//!
//! A mapped type declares each of its fields as a path query into a
//! document, a target type, and whether the field holds a sequence. The
//! [`DocumentMapper`] evaluates every declaration against a document, casts
//! the matches and returns a [`Record`], or a typed struct through
//! [`MappedType`].
//!
//! # Example
//!
//! ```
//! use json_path_attribute::{AttrType, DocumentMapper, MappingRegistry};
//!
//! let mut registry = MappingRegistry::new();
//! registry
//!     .declare("User")
//!     .field("name", "name", AttrType::String)?;
//! registry
//!     .declare("Post")
//!     .field("title", "data.content.title", AttrType::String)?
//!     .field("author", "data.user", AttrType::mapped("User"))?
//!     .array_field("likes", "data.comments[*].likes", AttrType::Integer)?;
//!
//! let mapper = DocumentMapper::new(&registry);
//! let post = mapper.parse(
//!     "Post",
//!     r#"{"data": {
//!         "content": {"title": "T"},
//!         "user": {"name": "N"},
//!         "comments": [{"likes": 5}, {"likes": 15}]
//!     }}"#,
//! )?;
//!
//! assert_eq!(post.str("title"), Some("T"));
//! assert_eq!(post.record("author").and_then(|u| u.str("name")), Some("N"));
//! assert_eq!(post.list("likes").map(|l| l.len()), Some(2));
//! # Ok::<(), json_path_attribute::MapError>(())
//! ```

mod attr_type;
pub use attr_type::AttrType;

pub mod coerce;
pub use coerce::TypeCoercer;

mod definition;
pub use definition::AttributeDefinition;

pub mod document;
pub use document::{from_serialize, normalize, IntoDocument, NativeNode};

mod error;
pub use error::{MapError, Result};

mod mapped;
pub use mapped::{FromFieldValue, MappedType};

mod mapper;
pub use mapper::{DocumentMapper, MapperOptions};

mod path;
pub use path::{PathExpression, ARRAY_WILDCARD};

mod record;
pub use record::{FieldValue, Record};

mod registry;
pub use registry::{MappingRegistry, TypeDeclaration};
