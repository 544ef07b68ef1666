//! Database entities.

#![allow(missing_docs)]

pub mod comment;
pub mod community;
pub mod community_member;
pub mod poll;
pub mod poll_option;
pub mod poll_vote;
pub mod post;
pub mod reply;
pub mod submission;
pub mod thread;
pub mod user;
pub mod vote;

pub use comment::Entity as Comment;
pub use community::Entity as Community;
pub use community_member::Entity as CommunityMember;
pub use poll::Entity as Poll;
pub use poll_option::Entity as PollOption;
pub use poll_vote::Entity as PollVote;
pub use post::Entity as Post;
pub use reply::Entity as Reply;
pub use submission::Entity as Submission;
pub use thread::Entity as Thread;
pub use user::Entity as User;
pub use vote::Entity as Vote;
