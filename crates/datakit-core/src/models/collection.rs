use std::fmt;

/// Collection endpoints exposed by the data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Attractions,
    Categories,
    Concepts,
    Countries,
    Entities,
    Keywords,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Attractions,
        Collection::Categories,
        Collection::Concepts,
        Collection::Countries,
        Collection::Entities,
        Collection::Keywords,
    ];

    /// Resource path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Attractions => "v1/attractions",
            Collection::Categories => "v1/categories",
            Collection::Concepts => "v1/concepts",
            Collection::Countries => "v1/countries",
            Collection::Entities => "v1/entities",
            Collection::Keywords => "v1/keywords",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Attractions => "attractions",
            Collection::Categories => "categories",
            Collection::Concepts => "concepts",
            Collection::Countries => "countries",
            Collection::Entities => "entities",
            Collection::Keywords => "keywords",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
