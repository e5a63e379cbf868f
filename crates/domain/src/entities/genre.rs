use serde::{Deserialize, Serialize};

/// Entry of the upstream genre taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}
