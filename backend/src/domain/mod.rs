//! Domain entities, ports, and services.
//!
//! Purpose: define strongly typed domain entities and the business rules for
//! creating, updating, voting on, and ranking products. Persistence and
//! transport stay behind the ports in [`ports`]; services receive their
//! repositories explicitly so tests can substitute doubles.

pub(crate) mod macros;

pub mod comment;
pub mod error;
pub mod patch;
pub mod ports;
pub mod product;
pub mod ranking;
pub mod user;
pub mod vote;

mod account_service;
mod catalogue_service;
mod comment_service;
mod ranking_service;
mod voting_service;

pub use self::account_service::AccountService;
pub use self::catalogue_service::CatalogueService;
pub use self::comment::{
    Comment, CommentId, CommentValidationError, NewComment, validate_comment_content,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode};
pub use self::patch::FieldPatch;
pub use self::product::{
    NewProduct, Product, ProductId, ProductPatch, ProductValidationError,
};
pub use self::ranking::{ProductWithVotes, Timeframe, TimeframeParseError};
pub use self::ranking_service::RankingService;
pub use self::user::{
    EmailAddress, NewUser, User, UserId, UserPatch, UserValidationError,
};
pub use self::vote::{Vote, VoteId};
pub use self::voting_service::VotingService;
