//! Domain-separated content hashing.
//!
//! Algorithm: SHA-256 over `domain_prefix || data`. Results are carried as
//! `"sha256:<hex>"` strings so they can be printed, compared and embedded in
//! JSON without a second encoding step.

use sha2::{Digest, Sha256};

/// Typed domain separator for [`canonical_hash`].
///
/// Each variant maps to a unique, null-terminated prefix so digests of
/// different artifact kinds can never collide on identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashDomain {
    /// A complete search transcript (events + summary).
    SearchTranscript,
    /// A serialized search policy.
    SearchPolicy,
    /// A rendered solution path.
    SolutionPath,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[
        Self::SearchTranscript,
        Self::SearchPolicy,
        Self::SolutionPath,
    ];

    /// The raw prefix bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::SearchTranscript => b"WAYFIND::SEARCH_TRANSCRIPT::V1\0",
            Self::SearchPolicy => b"WAYFIND::SEARCH_POLICY::V1\0",
            Self::SolutionPath => b"WAYFIND::SOLUTION_PATH::V1\0",
        }
    }
}

/// A content-addressed hash with algorithm identifier.
///
/// Invariant: exactly one `:` separator with non-empty text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"`. Returns `None` on malformed input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon + 1 == s.len() || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Hash `data` under `domain`, producing `"sha256:<lowercase hex>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    let full = format!("sha256:{digest}");
    ContentHash { colon: 6, full }
}
