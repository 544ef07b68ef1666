//! Database repositories.

mod comment;
mod community;
mod poll;
mod post;
mod reply;
mod submission;
mod thread;
mod user;
mod vote;

pub use comment::CommentRepository;
pub use community::CommunityRepository;
pub use poll::{PollOptionRepository, PollRepository, PollVoteRepository};
pub use post::PostRepository;
pub use reply::ReplyRepository;
pub use submission::SubmissionRepository;
pub use thread::{ThreadRepository, ThreadSort};
pub use user::UserRepository;
pub use vote::VoteRepository;
