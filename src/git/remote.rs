use crate::error::{ChangelogError, Result};
use crate::git::{Remote, RemoteKind};
use regex::Regex;

const HTTPS_PATTERN: &str = r"^https://([^/]+)/(.+)$";
const SSH_PATTERN: &str = r"^[^@/\s]+@([^:/\s]+):(.+)$";

/// Resolve the single remote among candidate URLs.
///
/// Duplicates are collapsed by exact string comparison. Zero candidates or
/// more than one distinct URL are errors; the surviving URL is parsed by
/// protocol sniffing.
///
/// # Arguments
/// * `remote_urls` - Every fetch/push URL configured in the repository
///
/// # Returns
/// * `Ok(Remote)` - The parsed remote
/// * `Err` - `NoRemote`, `MultipleRemotes` naming the first two distinct URLs,
///   or a protocol/parse error
pub fn find_remote_from_urls<S: AsRef<str>>(remote_urls: &[S]) -> Result<Remote> {
    let first = remote_urls
        .first()
        .map(|url| url.as_ref())
        .ok_or(ChangelogError::NoRemote)?;

    if let Some(other) = remote_urls
        .iter()
        .map(|url| url.as_ref())
        .find(|url| *url != first)
    {
        return Err(ChangelogError::MultipleRemotes(
            first.to_string(),
            other.to_string(),
        ));
    }

    parse_remote_url(first)
}

/// Parse a raw remote URL into a [Remote]
pub fn parse_remote_url(url: &str) -> Result<Remote> {
    let (kind, pattern) = if url.starts_with("https://") {
        (RemoteKind::Https, HTTPS_PATTERN)
    } else if url.contains('@') && url.contains(':') && !url.contains("://") {
        (RemoteKind::Ssh, SSH_PATTERN)
    } else {
        return Err(ChangelogError::UnrecognizedProtocol(url.to_string()));
    };

    let captures = Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(url))
        .ok_or_else(|| ChangelogError::MalformedRemote(url.to_string()))?;

    let host = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let path = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    let repository_name = path.trim_end_matches('/').trim_end_matches(".git");

    if host.is_empty() || repository_name.is_empty() {
        return Err(ChangelogError::MalformedRemote(url.to_string()));
    }

    Ok(Remote {
        kind,
        host: host.to_string(),
        repository_name: repository_name.to_string(),
    })
}
