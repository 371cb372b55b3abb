//! Package name resolution.
//!
//! A source descriptor is either a URL-like string (`https://host/o/r.git`,
//! `git@host:o/r.git`, `host.tld/o/r`) or an `owner/repo` shorthand that is
//! expanded against the default host. Local installs are named
//! `local_<dirname>`, with a numeric suffix when that name is taken.

use anyhow::Result;
use std::path::Path;

use crate::error::GitgetError;
use crate::registry::Registry;

pub const DEFAULT_HOST: &str = "https://github.com";

const LOCAL_PREFIX: &str = "local_";

/// A remote repository ready to be cloned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// URL handed to the version-control adapter.
    pub url: String,
    /// Derived package name, `owner/repo`.
    pub name: String,
    /// Default directory name for the working copy.
    pub dir_name: String,
    /// URL used for the reachability check, `None` for `file://` sources.
    pub check_url: Option<String>,
}

impl RemoteSource {
    pub fn parse(descriptor: &str, default_host: &str) -> Result<Self> {
        let descriptor = descriptor.trim().trim_end_matches('/');
        let invalid = || GitgetError::InvalidSource {
            source_str: descriptor.to_string(),
        };

        if descriptor.is_empty() {
            return Err(invalid().into());
        }

        let (url, check_url) = if looks_like_url(descriptor) {
            let url = if descriptor.contains("://") || scp_host(descriptor).is_some() {
                descriptor.to_string()
            } else {
                format!("https://{}", descriptor)
            };
            let check_url = check_url_for(&url);
            (url, check_url)
        } else {
            let parts: Vec<&str> = descriptor.split('/').collect();
            if parts.len() != 2
                || parts
                    .iter()
                    .any(|p| p.is_empty() || p.contains(char::is_whitespace))
            {
                return Err(invalid().into());
            }
            let host = default_host.trim_end_matches('/');
            (format!("{}/{}", host, descriptor), check_url_for(host))
        };

        let segments: Vec<&str> = path_part(&url)
            .split(['/', ':'])
            .filter(|s| !s.is_empty())
            .collect();
        let [.., owner, repo] = segments[..] else {
            return Err(invalid().into());
        };
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(invalid().into());
        }

        Ok(Self {
            name: format!("{}/{}", owner, repo),
            dir_name: repo.to_string(),
            url,
            check_url,
        })
    }
}

impl std::fmt::Display for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Has a scheme, is scp-style, or starts with something that looks like a host.
fn looks_like_url(s: &str) -> bool {
    if s.contains("://") || scp_host(s).is_some() {
        return true;
    }
    let mut parts = s.split('/');
    match (parts.next(), parts.next()) {
        (Some(first), Some(_)) => first.contains('.') && !first.starts_with('.'),
        _ => false,
    }
}

/// `user@host:path` -> `host`
fn scp_host(s: &str) -> Option<&str> {
    let (left, right) = s.split_once(':')?;
    if left.contains('/') || right.is_empty() || right.starts_with("//") {
        return None;
    }
    let (_, host) = left.split_once('@')?;
    (!host.is_empty()).then_some(host)
}

/// Everything after the scheme, or the whole string for scp-style URLs.
fn path_part(url: &str) -> &str {
    url.split_once("://").map(|(_, rest)| rest).unwrap_or(url)
}

fn check_url_for(url: &str) -> Option<String> {
    if let Some(host) = scp_host(url) {
        return Some(format!("https://{}/", host));
    }
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split('/').next().unwrap_or_default();
    let authority = authority.rsplit_once('@').map(|(_, h)| h).unwrap_or(authority);
    if authority.is_empty() {
        return None;
    }
    match scheme {
        "file" => None,
        "http" => Some(format!("http://{}/", authority)),
        "https" => Some(format!("https://{}/", authority)),
        // ssh://host:2222 and git://host are checked over https on the bare host
        _ => {
            let host = authority.split(':').next().unwrap_or(authority);
            Some(format!("https://{}/", host))
        }
    }
}

/// Make sure `name` is free in the registry.
pub fn claim_name(registry: &Registry, name: &str) -> Result<()> {
    if registry.contains(name) {
        return Err(GitgetError::NameCollision {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Name for a remote install: the override if given, else the derived name.
pub fn resolve_remote_name(
    registry: &Registry,
    source: &RemoteSource,
    name_override: Option<&str>,
) -> Result<String> {
    let name = name_override.unwrap_or(&source.name);
    claim_name(registry, name)?;
    Ok(name.to_string())
}

/// Name for a local install.
///
/// An override must be free; otherwise `local_<dirname>` is used, followed
/// by `local_<dirname>_1`, `_2`, ... until an unused name is found.
pub fn resolve_local_name(
    registry: &Registry,
    path: &Path,
    name_override: Option<&str>,
) -> Result<String> {
    if let Some(name) = name_override {
        claim_name(registry, name)?;
        return Ok(name.to_string());
    }

    let dir_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());
    let base = format!("{}{}", LOCAL_PREFIX, dir_name);

    if !registry.contains(&base) {
        return Ok(base);
    }
    let name = (1u64..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !registry.contains(candidate))
        .unwrap_or(base);
    Ok(name)
}
