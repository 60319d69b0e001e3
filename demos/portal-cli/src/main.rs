//! Minimal command-line front-end for the attendance portal.
//!
//! Demonstrates the whole client flow: restore a persisted session from
//! disk, log in if there isn't one, route by role, and hit a couple of
//! endpoints.
//!
//! Usage:
//!   portal-cli                         # restore and show the session
//!   portal-cli login <id> <password>   # authenticate and persist
//!   portal-cli logout
//!
//! The backend URL comes from `ROLLCALL_API` (defaults to the local dev
//! server) and the session file from `ROLLCALL_SESSION_FILE`.

use rollcall::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Navigator for a terminal front-end: there is no view tree to redirect,
/// so forced navigation just tells the user what happened.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn to_landing(&self) {
        println!("session ended, please log in again");
    }
}

fn describe(route: Route) -> &'static str {
    match route {
        Route::Landing => "landing (not logged in)",
        Route::Login => "login",
        Route::Student => "student dashboard",
        Route::Admin => "admin dashboard",
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url =
        std::env::var("ROLLCALL_API").unwrap_or_else(|_| "http://127.0.0.1:5000/api".into());
    let session_file =
        std::env::var("ROLLCALL_SESSION_FILE").unwrap_or_else(|_| "rollcall-session.json".into());

    let store = FileStore::open(&session_file)?;
    let portal = PortalBuilder::new()
        .base_url(base_url)
        .build(store, ConsoleNavigator)?;

    portal.start();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let [_, identifier, password] = args.as_slice() else {
                eprintln!("usage: portal-cli login <id> <password>");
                std::process::exit(2);
            };
            let user = portal.login(identifier, password).await?;
            info!(name = %user.name, role = %user.role, "logged in");
            println!("welcome, {} ({})", user.name, user.role);
        }
        Some("logout") => {
            portal.logout();
            println!("logged out");
        }
        Some(other) => {
            eprintln!("unknown command: {other}");
            std::process::exit(2);
        }
        None => {}
    }

    match portal.identity() {
        Some(user) => {
            println!("session: {} ({})", user.name, user.role);
            if let Some(expires_at_ms) = portal.current().expires_at_ms {
                println!("token expires at {expires_at_ms} (epoch ms)");
            }
        }
        None => println!("no active session"),
    }
    println!("next view: {}", describe(portal.home_route()));

    Ok(())
}
