use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(id: &str, name: &str) -> Self {
        User {
            id: id.to_string(),
            name: name.to_string(),
            avatar: None,
        }
    }

    /// Display identity used when directory hydration comes up empty.
    pub fn placeholder(id: &str) -> Self {
        User {
            id: id.to_string(),
            name: String::from("someone"),
            avatar: None,
        }
    }
}
