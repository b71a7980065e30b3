pub mod help;
pub mod history;
pub mod analyze;
pub mod listings;
pub mod favorite;
pub mod alert;
pub mod session;
pub mod market;
pub mod admin;

use crate::api::pcdeals::PcDealsClient;
use crate::config::Config;
use crate::utils::{Session, SessionStore};

/// Everything a command needs, built once in `main`
pub struct AppContext {
    pub config: Config,
    pub client: PcDealsClient,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let client = PcDealsClient::new(config.api_url.clone());
        let sessions = SessionStore::new(config.session_file.clone());
        Self {
            config,
            client,
            sessions,
        }
    }

    /// The logged-in session, or a user-facing error asking to log in
    pub fn require_session(&self) -> Result<Session, String> {
        self.sessions
            .load()
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "Please log in first: `login <email> <password>`".to_string())
    }
}

/// Dispatch one command line. `args[0]` is the command name.
pub async fn handle_command(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let Some((&command, rest)) = args.split_first() else {
        return help::execute();
    };

    tracing::debug!("Dispatching command {} with args {:?}", command, rest);

    match command.to_lowercase().as_str() {
        "history" | "chart" => history::execute(ctx, rest).await,
        "analyze" | "analyse" => analyze::execute(ctx, rest).await,
        "listings" | "ls" => listings::execute(ctx, rest).await,
        "market" | "snapshot" => market::execute(ctx).await,
        "favorite" | "fav" => favorite::execute(ctx, rest).await,
        "alert" => alert::execute(ctx, rest).await,
        "login" => session::login(ctx, rest).await,
        "register" => session::register(ctx, rest).await,
        "logout" => session::logout(ctx),
        "admin" => admin::execute(ctx, rest).await,
        "help" | "--help" | "-h" => help::execute(),
        other => Err(format!("❌ Unknown command '{}'. Run `help` for usage.", other)),
    }
}

/// Turn a command error into the message shown to the user
pub fn user_message(error_msg: &str) -> String {
    if error_msg.contains("Rate Limited") {
        "⚠️ Rate Limited: the price API is busy. Please try again in a moment.".to_string()
    } else if error_msg.contains("Request Error") {
        "⚠️ Network Error: could not reach the price API. Is the backend running?".to_string()
    } else if error_msg.contains("Unauthorized") {
        "❌ Your session has expired or is invalid. Please log in again.".to_string()
    } else if error_msg.contains("Forbidden") {
        "❌ You don't have permission to do that.".to_string()
    } else if !error_msg.trim().is_empty() {
        error_msg.trim().to_string()
    } else {
        "❌ An error occurred while executing the command.".to_string()
    }
}
