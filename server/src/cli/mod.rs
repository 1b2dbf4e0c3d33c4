//! CLI module for varhub
//!
//! Provides command-line interface for the variable store server.
//! All operations are performed via the HTTP API.

use clap::Parser;

/// VarHub - Remote variable store for project-scoped clients
#[derive(Parser, Debug)]
#[command(name = "varhub")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    VARHUB_HOST             Bind address (default: 0.0.0.0)
    VARHUB_PORT             Listen port (default: 5000)
    VARHUB_LOG_LEVEL        Log level (default: info)
    VARHUB_DATABASE_URL     Database URL (default: sqlite:~/.varhub/varhub.db)
    VARHUB_ADMIN_KEY        Admin key for the cleanup API (cleanup is disabled if unset)
"#)]
pub struct Cli;
