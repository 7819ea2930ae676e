//! Author identity for tickets opened from the CLI.
//!
//! The resolution chain: `--author` flag > `HELPDESK_AUTHOR` env > `USER` env
//! (TTY only) > `"anonymous"`. Unlike mutations in a shared tracker, opening a
//! ticket never fails for lack of an identity.

use std::env;

/// Fallback when nothing else resolves.
pub const ANONYMOUS: &str = "anonymous";

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
    fn is_tty(&self) -> bool;
}

struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    fn is_tty(&self) -> bool {
        use std::io::IsTerminal;
        std::io::stdin().is_terminal()
    }
}

fn resolve_author_with(cli_flag: Option<&str>, env: &dyn EnvReader) -> String {
    if let Some(author) = cli_flag.map(str::trim).filter(|a| !a.is_empty()) {
        return author.to_string();
    }

    if let Some(val) = env.get("HELPDESK_AUTHOR") {
        return val;
    }

    if env.is_tty()
        && let Some(val) = env.get("USER")
    {
        return val;
    }

    ANONYMOUS.to_string()
}

/// Resolve the author name for a new ticket.
pub fn resolve_author(cli_flag: Option<&str>) -> String {
    resolve_author_with(cli_flag, &RealEnv)
}
