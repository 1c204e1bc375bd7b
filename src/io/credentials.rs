use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::io::config_io::config_dir;

/// Page where users look up their API key
pub const API_KEY_URL: &str = "https://trello.com/app-key";
/// Token authorization endpoint
pub const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
/// Application name shown on the authorization page
pub const APP_NAME: &str = "boardview";
/// Token lifetime used when the user just presses Enter
pub const DEFAULT_EXPIRATION: &str = "30days";

/// API key and access token, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub token: String,
}

/// Error type for credential loading and enrollment
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("incomplete credentials in {path}: {field} is empty")]
    Incomplete { path: PathBuf, field: &'static str },
    #[error("authorization was not accepted")]
    Declined,
    #[error("no {0} entered")]
    MissingInput(&'static str),
    #[error("invalid {field} {value:?}: only letters and digits are allowed")]
    InvalidInput { field: &'static str, value: String },
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Default credentials location: `<config dir>/boardview/credentials.json`
pub fn credentials_path() -> PathBuf {
    config_dir().join("credentials.json")
}

/// Read credentials from `path`. Returns `Ok(None)` if the file does not
/// exist; a file that exists but is malformed or has an empty field is an
/// error.
pub fn read_credentials(path: &Path) -> Result<Option<Credentials>, CredentialsError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|e| CredentialsError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let creds: Credentials =
        serde_json::from_str(&text).map_err(|e| CredentialsError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
    if creds.api_key.trim().is_empty() {
        return Err(CredentialsError::Incomplete {
            path: path.to_path_buf(),
            field: "api_key",
        });
    }
    if creds.token.trim().is_empty() {
        return Err(CredentialsError::Incomplete {
            path: path.to_path_buf(),
            field: "token",
        });
    }
    Ok(Some(creds))
}

/// Write credentials atomically, readable only by the owner.
pub fn write_credentials(path: &Path, creds: &Credentials) -> Result<(), CredentialsError> {
    let write_err = |e: io::Error| CredentialsError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let content = serde_json::to_vec_pretty(creds).map_err(|e| write_err(e.into()))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&content).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Authorization URL the user opens to grant a read-only token.
pub fn authorize_url(api_key: &str, expiration: &str) -> String {
    format!(
        "{}?expiration={}&name={}&scope=read&response_type=token&key={}",
        AUTHORIZE_URL, expiration, APP_NAME, api_key
    )
}

/// Interactive enrollment: prompt for an API key, an expiration and the
/// token granted on the authorization page.
pub fn enroll<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Credentials, CredentialsError> {
    writeln!(output, "Go here to get your API key: {}", API_KEY_URL)?;

    let api_key = prompt(input, output, "Your Trello API key: ")?;
    if api_key.is_empty() {
        return Err(CredentialsError::MissingInput("API key"));
    }
    check_url_safe("API key", &api_key)?;

    let mut expiration = prompt(input, output, &format!("Expiration [{}]: ", DEFAULT_EXPIRATION))?;
    if expiration.is_empty() {
        expiration = DEFAULT_EXPIRATION.to_string();
    }
    check_url_safe("expiration", &expiration)?;

    writeln!(output, "Go here to perform the authorization:")?;
    writeln!(output, "{}", authorize_url(&api_key, &expiration))?;

    let answer = prompt(input, output, "Did you accept the authorization? [y|n] ")?;
    if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
        return Err(CredentialsError::Declined);
    }

    let token = prompt(input, output, "Token: ")?;
    if token.is_empty() {
        return Err(CredentialsError::MissingInput("token"));
    }

    Ok(Credentials { api_key, token })
}

/// Load credentials from `path`, running the enrollment flow on stdin and
/// stdout and persisting the result if the file does not exist yet.
pub fn load_or_enroll(path: &Path) -> Result<Credentials, CredentialsError> {
    if let Some(creds) = read_credentials(path)? {
        return Ok(creds);
    }

    tracing::info!(path = %path.display(), "no credentials found, starting enrollment");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let creds = enroll(&mut input, &mut output)?;
    write_credentials(path, &creds)?;
    writeln!(output, "Saved credentials to {}", path.display())?;
    Ok(creds)
}

/// Values spliced into the authorization URL must not need escaping.
fn check_url_safe(field: &'static str, value: &str) -> Result<(), CredentialsError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(());
    }
    Err(CredentialsError::InvalidInput {
        field,
        value: value.to_string(),
    })
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String, CredentialsError> {
    write!(output, "{}", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
