use clap::{Parser, Subcommand};
use worknest_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, records::UserRecord},
};

mod db;
mod session;
mod user;

#[derive(Debug, Parser)]
#[command(name = "worknest-app", about = "WorkNest administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Session(session::SessionCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Session(command) => session::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}

async fn find_user(db: &Db, email: &str) -> Result<UserRecord, String> {
    PgUsersService::new(db.clone())
        .find_user_by_email(email)
        .await
        .map_err(|error| format!("failed to find user {email}: {error}"))
}
