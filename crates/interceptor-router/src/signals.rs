// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic signal extraction.
//!
//! Derives a fixed bundle of descriptors from a file's byte size, declared name
//! and an MD5 digest of at most its first KiB. No decoding, no clock, no
//! randomness: the same descriptor always yields the same bundle.

use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

/// Upper bound on how much file content is hashed, regardless of upload size.
pub const DIGEST_PREFIX_BYTES: usize = 1024;

/// Extension reported for names without any `.`.
pub const UNKNOWN_EXTENSION: &str = "unknown";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Filename terms suggesting a re-encoded or size-reduced file (substring, case-insensitive).
const COMPRESSED_KEYWORDS: &[&str] = &["compress", "low", "small", "lite"];

/// Filename terms claiming high resolution.
const HD_KEYWORDS: &[&str] = &["hd", "1080", "720", "4k", "uhd"];

/// Filename terms pointing at phone capture or messenger forwarding.
const MOBILE_KEYWORDS: &[&str] = &["mobile", "phone", "whatsapp", "telegram"];

/// Filename terms pointing at social platform re-uploads.
const SOCIAL_KEYWORDS: &[&str] = &["instagram", "tiktok", "snapchat", "facebook"];

/// Case-insensitive alternations over the keyword lists, one per flag.
static KEYWORD_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        keyword_pattern(COMPRESSED_KEYWORDS),
        keyword_pattern(HD_KEYWORDS),
        keyword_pattern(MOBILE_KEYWORDS),
        keyword_pattern(SOCIAL_KEYWORDS),
    ]
});

fn keyword_pattern(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}")).expect("keyword lists are literal alternations")
}

/// Immutable per-request input: size, declared name and prefix digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    filename: String,
    size: u64,
    digest: Option<[u8; 16]>,
}

impl FileDescriptor {
    /// Descriptor with an explicit (or absent) prefix digest.
    pub fn new(filename: impl Into<String>, size: u64, digest: Option<[u8; 16]>) -> Self {
        Self {
            filename: filename.into(),
            size,
            digest,
        }
    }

    /// Descriptor for an in-memory upload. Only the first KiB is hashed.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(filename, bytes.len() as u64, Some(prefix_digest(bytes)))
    }

    /// Descriptor for a readable source whose total size is already known.
    ///
    /// Reads at most [`DIGEST_PREFIX_BYTES`]. A read failure leaves the digest
    /// absent so extraction falls back to the size-derived digest.
    pub fn from_reader<R: Read>(filename: impl Into<String>, size: u64, reader: R) -> Self {
        let filename = filename.into();
        let mut prefix = Vec::with_capacity(DIGEST_PREFIX_BYTES);
        let digest = match reader
            .take(DIGEST_PREFIX_BYTES as u64)
            .read_to_end(&mut prefix)
        {
            Ok(_) => Some(md5::compute(&prefix).0),
            Err(e) => {
                warn!(filename = %filename, error = %e, "prefix read failed, using size digest");
                None
            }
        };
        Self {
            filename,
            size,
            digest,
        }
    }

    /// Declared filename, untrusted.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Total size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Prefix digest, if the content could be read.
    pub fn digest(&self) -> Option<[u8; 16]> {
        self.digest
    }
}

/// MD5 over at most the first [`DIGEST_PREFIX_BYTES`] of `bytes`.
pub fn prefix_digest(bytes: &[u8]) -> [u8; 16] {
    let end = bytes.len().min(DIGEST_PREFIX_BYTES);
    md5::compute(&bytes[..end]).0
}

/// Stand-in digest derived only from the decimal byte size.
pub fn size_digest(size: u64) -> [u8; 16] {
    md5::compute(size.to_string()).0
}

/// Size bucket computed from the rounded megabyte figure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    fn from_mb(size_mb: f64) -> Self {
        if size_mb < 5.0 {
            SizeCategory::Small
        } else if size_mb < 20.0 {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }
}

/// Bitrate estimate computed from the raw byte count (decimal thresholds).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BitrateCategory {
    Low,
    Medium,
    High,
}

impl BitrateCategory {
    fn from_bytes(size: u64) -> Self {
        if size < 5_000_000 {
            BitrateCategory::Low
        } else if size < 20_000_000 {
            BitrateCategory::Medium
        } else {
            BitrateCategory::High
        }
    }
}

/// Hash-derived complexity indicator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Complexity {
    LowComplexity,
    HighComplexity,
}

impl Complexity {
    /// Compares the first hex character against `'8'` as a character, not a number.
    fn from_digest_hex(digest_hex: &str) -> Self {
        match digest_hex.bytes().next() {
            Some(first) if first < b'8' => Complexity::LowComplexity,
            _ => Complexity::HighComplexity,
        }
    }
}

/// Hash-derived quality estimate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityBand {
    Low,
    Medium,
    High,
}

impl QualityBand {
    /// Hex characters 2..4 of the digest are its second byte.
    fn from_digest(digest: &[u8; 16]) -> Self {
        match digest[1] % 3 {
            0 => QualityBand::Low,
            1 => QualityBand::Medium,
            _ => QualityBand::High,
        }
    }
}

/// Keyword hits in the declared filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilenameFlags {
    #[serde(rename = "has_compressed_keywords")]
    pub compressed_keyword: bool,
    #[serde(rename = "has_hd_keywords")]
    pub hd_keyword: bool,
    #[serde(rename = "has_mobile_keywords")]
    pub mobile_keyword: bool,
    #[serde(rename = "has_social_keywords")]
    pub social_keyword: bool,
}

impl FilenameFlags {
    /// Unanchored, Unicode case-folded search, so `nonhd.mp4` counts as an HD
    /// name and `ſmall.mp4` as a compressed one.
    pub fn scan(filename: &str) -> Self {
        let [compressed, hd, mobile, social] = &*KEYWORD_PATTERNS;
        Self {
            compressed_keyword: compressed.is_match(filename),
            hd_keyword: hd.is_match(filename),
            mobile_keyword: mobile.is_match(filename),
            social_keyword: social.is_match(filename),
        }
    }
}

/// Routing input derived from a [`FileDescriptor`].
///
/// Serializes to the `signals_used` JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    /// Size in MiB, rounded to two decimals.
    #[serde(rename = "file_size_mb")]
    pub size_mb: f64,
    #[serde(rename = "file_size_category")]
    pub size_category: SizeCategory,
    #[serde(rename = "estimated_bitrate_category")]
    pub bitrate_category: BitrateCategory,
    /// Lowercase hex of the prefix digest (or the size fallback).
    #[serde(rename = "file_hash")]
    pub digest_hex: String,
    #[serde(rename = "complexity_indicator")]
    pub complexity: Complexity,
    #[serde(rename = "filename_indicators")]
    pub filename_flags: FilenameFlags,
    /// Lowercased text after the last `.`, or `unknown`.
    #[serde(rename = "file_extension")]
    pub extension: String,
    #[serde(rename = "estimated_quality_band")]
    pub quality_band: QualityBand,
}

/// Compute the signal bundle for a file. Total and pure.
pub fn extract(descriptor: &FileDescriptor) -> SignalBundle {
    let digest = descriptor
        .digest()
        .unwrap_or_else(|| size_digest(descriptor.size()));
    let digest_hex = hex::encode(digest);
    let size_mb = round2(descriptor.size() as f64 / BYTES_PER_MB);

    let signals = SignalBundle {
        size_mb,
        size_category: SizeCategory::from_mb(size_mb),
        bitrate_category: BitrateCategory::from_bytes(descriptor.size()),
        complexity: Complexity::from_digest_hex(&digest_hex),
        filename_flags: FilenameFlags::scan(descriptor.filename()),
        extension: file_extension(descriptor.filename()),
        quality_band: QualityBand::from_digest(&digest),
        digest_hex,
    };

    debug!(
        size_mb = signals.size_mb,
        size_category = %signals.size_category,
        complexity = %signals.complexity,
        extension = signals.extension.as_str(),
        "signals extracted"
    );
    signals
}

fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => UNKNOWN_EXTENSION.to_string(),
    }
}

/// Two decimals, ties to even. `size / 2^20 * 100` is exact, so ties are real ties.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
