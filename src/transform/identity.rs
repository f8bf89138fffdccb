//! Record provenance: guids and source names

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use url::Url;

/// Source name used when neither the record nor its link names one
pub const UNKNOWN_SOURCE: &str = "未知来源";

/// Hex characters kept from the digest
const GUID_HEX_LEN: usize = 32;

/// Hash title and source (plus an optional salt) into a hex guid.
pub fn generate_guid(title: &str, source: &str, salt: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"_");
    hasher.update(source.as_bytes());
    if let Some(salt) = salt {
        hasher.update(b"_");
        hasher.update(salt.as_bytes());
    }
    let digest = hasher.finalize();

    let mut out = String::with_capacity(GUID_HEX_LEN);
    for b in digest.iter().take(GUID_HEX_LEN / 2) {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Host name of a link without a leading `www.`, e.g. `news.cctv.com`.
pub fn source_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
