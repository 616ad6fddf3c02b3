use clap::Args;
use jiff::Timestamp;
use worknest_app::auth::PgAuthService;

use crate::cli::{connect, find_user};

#[derive(Debug, Args)]
pub(crate) struct ListSessionsArgs {
    /// Email of the user whose sessions should be listed
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListSessionsArgs) -> Result<(), String> {
    let db = connect(&args.database_url).await?;
    let user = find_user(&db, &args.email).await?;

    let sessions = PgAuthService::new(db)
        .list_sessions(user.uuid)
        .await
        .map_err(|error| format!("failed to list sessions: {error}"))?;

    if sessions.is_empty() {
        println!("no sessions found for {}", user.email);
        return Ok(());
    }

    for session in sessions {
        println!("session_uuid: {}", session.uuid);
        println!("session_version: {}", session.version.as_i16());
        println!("created_at: {}", session.created_at);
        println!("last_used_at: {}", or_label(session.last_used_at, "never"));
        println!("expires_at: {}", or_label(session.expires_at, "none"));
        println!("revoked_at: {}", or_label(session.revoked_at, "active"));
        println!();
    }

    Ok(())
}

fn or_label(value: Option<Timestamp>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_string(), |value| value.to_string())
}
