//! Business logic services.

#![allow(missing_docs)]

pub mod admin;
pub mod ballot;
pub mod comment;
pub mod community;
pub mod feedback;
pub mod poll;
pub mod post;
pub mod reply;
pub mod session;
pub mod thread;
pub mod user;

pub use admin::{AdminCollection, AdminListing, AdminOverview, AdminService};
pub use ballot::{BallotService, PollVotePlan, ensure_first_vote, plan_poll_vote};
pub use comment::CommentService;
pub use community::{CommunityService, CreateCommunityInput};
pub use feedback::{CreateSubmissionInput, FeedbackService};
pub use poll::{CreatePollInput, PollService, PollWithStatus, vote_share};
pub use post::{CreatePostInput, PostService};
pub use reply::{CreateReplyInput, ReplyService};
pub use session::{SessionContext, VoterId};
pub use thread::{CreateThreadInput, ThreadService, UpdateThreadInput};
pub use user::{CreateUserInput, UpdateProfileInput, UserService};
