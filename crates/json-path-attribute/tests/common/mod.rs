#![allow(dead_code)]

use json_path_attribute::{AttrType, MappedType, Record, Result, TypeDeclaration};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl MappedType for User {
    const NAME: &'static str = "User";

    fn declare(decl: &mut TypeDeclaration<'_>) -> Result<()> {
        decl.field("name", "name", AttrType::String)?
            .field("email", "email", AttrType::String)?;
        Ok(())
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            name: record.take_as("name")?,
            email: record.take_as("email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub body: Option<String>,
    pub likes: Option<i64>,
    pub commenter: Option<User>,
}

impl MappedType for Comment {
    const NAME: &'static str = "Comment";

    fn declare(decl: &mut TypeDeclaration<'_>) -> Result<()> {
        decl.field("body", "content.body", AttrType::String)?
            .field("likes", "likes", AttrType::Integer)?
            .mapped_field::<User>("commenter", "user")?;
        Ok(())
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            body: record.take_as("body")?,
            likes: record.take_as("likes")?,
            commenter: record.take_mapped("commenter")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<User>,
    pub comments: Vec<Comment>,
}

impl MappedType for Post {
    const NAME: &'static str = "Post";

    fn declare(decl: &mut TypeDeclaration<'_>) -> Result<()> {
        decl.field("title", "data.content.title", AttrType::String)?
            .field("body", "data.content.body", AttrType::String)?
            .mapped_field::<User>("author", "data.user")?
            .mapped_array_field::<Comment>("comments", "data.comments")?;
        Ok(())
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            title: record.take_as("title")?,
            body: record.take_as("body")?,
            author: record.take_mapped("author")?,
            comments: record.take_mapped_list("comments")?,
        })
    }
}

pub const FULL_POST: &str = r#"
{
  "data": {
    "content": {
      "title": "How to drive on snow?",
      "body": "Use a low gear and slowly build up the speed."
    },
    "user": {
      "name": "James May",
      "email": "jamesmay@example.com"
    },
    "comments": [
      {
        "content": {
          "body": "Thank you for the tip! It is very useful."
        },
        "likes": 5,
        "user": {
          "name": "Charles Careful",
          "email": "charlescareful@example.com"
        }
      },
      {
        "content": {
          "body": "I should have known this earlier. Just crashed my car!"
        },
        "likes": 15,
        "user": {
          "name": "Freddy Fast",
          "email": "freddyfast@example.com"
        }
      }
    ]
  }
}
"#;

pub const PARTIAL_POST: &str = r#"
{
  "data": {
    "content": {
      "title": "How to drive on snow?"
    },
    "user": {
      "name": "James May",
      "email": null
    }
  }
}
"#;

pub const COMMENTS: &str = r#"
[
  {
    "content": {
      "body": "Thank you for the tip! It is very useful."
    },
    "likes": 5,
    "user": {
      "name": "Charles Careful",
      "email": "charlescareful@example.com"
    }
  },
  {
    "content": {
      "body": "I should have known this earlier. Just crashed my car!"
    },
    "likes": 15,
    "user": {
      "name": "Freddy Fast",
      "email": "freddyfast@example.com"
    }
  }
]
"#;
