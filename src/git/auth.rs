use crate::config::Auth;
use crate::error::{Result, ScanError};
use git2::{Cred, CredentialType, RemoteCallbacks};
use std::path::PathBuf;
use url::Url;

/// libgit2 keeps asking while credentials are rejected; give up after this many.
const MAX_CREDENTIAL_ATTEMPTS: usize = 5;

/// Default private keys tried when no explicit credentials are configured
const DEFAULT_SSH_KEYS: [&str; 3] = ["id_ed25519", "id_rsa", "id_ecdsa"];

/// Credentials resolved from a repository's `auth` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// SSH agent, default keys, then libgit2 defaults
    Ambient,
    /// Personal access token for HTTPS remotes
    Token(String),
    /// Path to a private SSH key
    SshKey(PathBuf),
}

impl Credentials {
    /// Read the configured environment variable and build credentials.
    ///
    /// # Returns
    /// * `Ok(Credentials::Ambient)` - No auth block, or one without a variable name
    /// * `Err` - Variable unset/empty, or unknown auth type
    pub fn from_config(auth: Option<&Auth>) -> Result<Self> {
        let auth = match auth {
            Some(auth) if !auth.env_variable.is_empty() => auth,
            _ => return Ok(Credentials::Ambient),
        };

        let secret = std::env::var(&auth.env_variable)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ScanError::auth(format!(
                    "authentication token not found in environment variable {}",
                    auth.env_variable
                ))
            })?;

        match auth.kind.as_str() {
            "token" => Ok(Credentials::Token(secret)),
            "ssh" => Ok(Credentials::SshKey(PathBuf::from(secret))),
            other => Err(ScanError::auth(format!(
                "unsupported authentication type: {}",
                other
            ))),
        }
    }

    /// URL to connect to; tokens are embedded in the user-info part.
    pub fn remote_url(&self, url: &str) -> String {
        match self {
            Credentials::Token(token) => authenticated_url(url, token),
            _ => url.to_string(),
        }
    }

    /// Build the libgit2 callbacks answering credential requests.
    pub fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let mut attempts = 0;
        let mut ambient = AmbientAttempts::default();

        callbacks.credentials(move |url, username_from_url, allowed_types| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("credentials rejected by remote"));
            }

            let username = username_from_url.unwrap_or("git");
            match self {
                Credentials::Token(token)
                    if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) =>
                {
                    let (user, password) = token_user_pass(url, token);
                    Cred::userpass_plaintext(&user, &password)
                }
                Credentials::SshKey(path) if allowed_types.contains(CredentialType::SSH_KEY) => {
                    Cred::ssh_key(username, None, path, None)
                }
                _ => ambient_credentials(username, allowed_types, &mut ambient),
            }
        });

        callbacks
    }
}

/// Next credential to offer when nothing explicit is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AmbientStep {
    Agent,
    Key(usize),
    Fallback,
}

/// Remembers what was already offered, so each default key is tried once
#[derive(Debug, Default)]
struct AmbientAttempts {
    agent_tried: bool,
    keys_offered: usize,
}

impl AmbientAttempts {
    fn next_step(&mut self, key_count: usize) -> AmbientStep {
        if !self.agent_tried {
            self.agent_tried = true;
            return AmbientStep::Agent;
        }
        if self.keys_offered < key_count {
            self.keys_offered += 1;
            return AmbientStep::Key(self.keys_offered - 1);
        }
        AmbientStep::Fallback
    }
}

/// Credentials tried in order: SSH agent, default keys under `~/.ssh`, libgit2 default.
fn ambient_credentials(
    username: &str,
    allowed_types: CredentialType,
    state: &mut AmbientAttempts,
) -> std::result::Result<Cred, git2::Error> {
    if allowed_types.contains(CredentialType::SSH_KEY) {
        let keys: Vec<PathBuf> = dirs::home_dir()
            .map(|home| {
                DEFAULT_SSH_KEYS
                    .iter()
                    .map(|key| home.join(".ssh").join(key))
                    .filter(|path| path.exists())
                    .collect()
            })
            .unwrap_or_default();

        loop {
            match state.next_step(keys.len()) {
                AmbientStep::Agent => {
                    if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                        return Ok(cred);
                    }
                }
                AmbientStep::Key(index) => {
                    if let Ok(cred) = Cred::ssh_key(username, None, &keys[index], None) {
                        return Ok(cred);
                    }
                }
                AmbientStep::Fallback => break,
            }
        }
    }

    if allowed_types.contains(CredentialType::DEFAULT) {
        return Cred::default();
    }

    Err(git2::Error::from_str("no usable credentials"))
}

fn is_gitlab(host: &str) -> bool {
    host.contains("gitlab.com")
}

/// Username/password pair presented for a token over HTTPS
fn token_user_pass(url: &str, token: &str) -> (String, String) {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();

    if is_gitlab(&host) {
        ("oauth2".to_string(), token.to_string())
    } else {
        (token.to_string(), String::new())
    }
}

/// Embed a token in a remote URL.
///
/// GitLab hosts get `oauth2:<token>@host`; GitHub and every other host get
/// `<token>@host`. URLs that do not parse (such as scp-like `git@host:path`)
/// are returned unchanged.
pub fn authenticated_url(repo_url: &str, token: &str) -> String {
    let mut url = match Url::parse(repo_url) {
        Ok(url) if url.has_host() => url,
        _ => return repo_url.to_string(),
    };

    let host = url.host_str().unwrap_or_default().to_string();
    let updated = if is_gitlab(&host) {
        url.set_username("oauth2")
            .and_then(|_| url.set_password(Some(token)))
    } else {
        url.set_username(token).and_then(|_| url.set_password(None))
    };

    match updated {
        Ok(()) => url.to_string(),
        Err(()) => repo_url.to_string(),
    }
}
