//! Subdocument mutators: pure add/remove semantics for likes, comments,
//! experience and education entries. Each operates on an in-memory copy of
//! the parent document; persistence afterwards is a single atomic column
//! replace issued by the store clients.

pub mod post_ops;
pub mod profile_ops;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutateError {
    #[error("user has already liked this post")]
    AlreadyLiked,

    #[error("the post has no likes from the user")]
    NotLiked,

    #[error("entry not found")]
    NotFound,

    #[error("user is not authorized")]
    Forbidden,

    #[error("text is required")]
    EmptyText,
}
