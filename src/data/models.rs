//! Domain models for the catalog.

/// Kind of content an item carries. Records with any other media type
/// are dropped at the mapping boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Texts,
    Audio,
}

/// A catalog entry as it appears in search results and rails.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub creator: Option<String>,
    pub media_type: MediaType,
    pub cover_url: String,
}

/// A downloadable file belonging to an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFile {
    pub name: String,
    pub format: String,
    pub size: Option<u64>,
    pub download_url: String,
}

/// Full metadata for a single item, including its readable or playable
/// files.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub id: String,
    pub title: String,
    pub creator: Option<String>,
    pub description: String,
    pub media_type: MediaType,
    pub cover_url: String,
    pub files: Vec<ItemFile>,
}

/// A signed-in account. Anonymous sessions are filtered out before they
/// reach any screen.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub anonymous: bool,
}

/// One titled row of items on the homepage.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRail {
    pub title: String,
    pub items: Vec<Item>,
}

/// The homepage feed: featured rails plus recently opened items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Homepage {
    pub rails: Vec<ItemRail>,
    pub recent: Vec<Item>,
}

impl Homepage {
    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }
}

/// A single search facet restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    Creator(String),
    Subject(String),
    Collection(String),
}

/// A catalog search: free-text keyword plus optional facet filters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keyword: String,
    pub filters: Vec<SearchFilter>,
}

impl SearchQuery {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            filters: Vec::new(),
        }
    }

    /// Everything by one creator, the query behind "more by this author".
    pub fn by_creator(creator: impl Into<String>) -> Self {
        Self {
            keyword: String::new(),
            filters: vec![SearchFilter::Creator(creator.into())],
        }
    }

    pub fn by_collection(collection: impl Into<String>) -> Self {
        Self {
            keyword: String::new(),
            filters: vec![SearchFilter::Collection(collection.into())],
        }
    }

    /// Render the archive advanced-search expression. Only text and
    /// audio records are requested; the keyword matches title, creator,
    /// and subject.
    pub fn to_query_string(&self) -> String {
        let mut clauses = Vec::new();
        let keyword = self.keyword.trim();
        if !keyword.is_empty() {
            clauses.push(format!(
                "(title:({keyword}) OR creator:({keyword}) OR subject:({keyword}))"
            ));
        }
        for filter in &self.filters {
            match filter {
                SearchFilter::Creator(creator) => clauses.push(format!("creator:({creator})")),
                SearchFilter::Subject(subject) => clauses.push(format!("subject:({subject})")),
                SearchFilter::Collection(collection) => {
                    clauses.push(format!("collection:({collection})"));
                }
            }
        }
        clauses.push("mediatype:(texts OR audio)".to_string());
        clauses.join(" AND ")
    }
}
