//! Buzz server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use buzz_api::{middleware::AppState, router as api_router};
use buzz_common::Config;
use buzz_core::{
    AdminService, BallotService, CommentService, CommunityService, FeedbackService, PollService,
    PostService, ReplyService, ThreadService, UserService,
};
use buzz_db::repositories::{
    CommentRepository, CommunityRepository, PollOptionRepository, PollRepository,
    PollVoteRepository, PostRepository, ReplyRepository, SubmissionRepository, ThreadRepository,
    UserRepository, VoteRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buzz=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting buzz server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = buzz_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    buzz_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let thread_repo = ThreadRepository::new(Arc::clone(&db));
    let reply_repo = ReplyRepository::new(Arc::clone(&db));
    let vote_repo = VoteRepository::new(Arc::clone(&db));
    let community_repo = CommunityRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let poll_repo = PollRepository::new(Arc::clone(&db));
    let poll_option_repo = PollOptionRepository::new(Arc::clone(&db));
    let poll_vote_repo = PollVoteRepository::new(Arc::clone(&db));
    let submission_repo = SubmissionRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let thread_service = ThreadService::new(
        thread_repo.clone(),
        reply_repo.clone(),
        vote_repo.clone(),
    );
    let reply_service = ReplyService::new(
        reply_repo.clone(),
        thread_repo.clone(),
        vote_repo.clone(),
    );
    let ballot_service = BallotService::new(
        vote_repo.clone(),
        thread_repo.clone(),
        reply_repo.clone(),
        post_repo.clone(),
    );
    let community_service = CommunityService::new(community_repo.clone());
    let post_service = PostService::new(
        post_repo.clone(),
        community_repo.clone(),
        comment_repo.clone(),
        vote_repo.clone(),
    );
    let comment_service = CommentService::new(
        comment_repo.clone(),
        post_repo.clone(),
        community_repo.clone(),
    );
    let poll_service = PollService::new(
        poll_repo.clone(),
        poll_option_repo.clone(),
        poll_vote_repo.clone(),
    );
    let feedback_service = FeedbackService::new(submission_repo.clone());
    let admin_service = AdminService::new(
        user_repo,
        thread_repo,
        community_repo,
        poll_repo,
        submission_repo,
        thread_service.clone(),
        community_service.clone(),
        poll_service.clone(),
    );

    let state = AppState {
        user_service,
        thread_service,
        reply_service,
        ballot_service,
        community_service,
        post_service,
        comment_service,
        poll_service,
        feedback_service,
        admin_service,
    };

    // Build the application router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            buzz_api::middleware::auth_middleware,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
