pub mod error;
pub mod query;
pub mod types;

pub use error::{Error, ErrorKind};
pub use query::{tag_terms, ArticleQuery};
pub use types::{Article, ArticleId, FilterSet};

pub type Result<T> = std::result::Result<T, Error>;
