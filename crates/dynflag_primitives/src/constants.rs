#![forbid(unsafe_code)]

/// Domain tag prefixed to every flag PRF transcript.
pub const TAG_FLAG: &str = "dynflag.flag.v1";

/// Literal envelope around the encoded PRF output.
pub const FLAG_PREFIX: &str = "FORENSIC{";
pub const FLAG_SUFFIX: &str = "}";

/// Bytes of PRF output kept in a token (192 bits).
pub const FLAG_MAC_BYTES: usize = 24;
/// URL-safe base64 length of `FLAG_MAC_BYTES` without padding.
pub const FLAG_BODY_LEN: usize = 32;
pub const FLAG_TOKEN_LEN: usize = FLAG_PREFIX.len() + FLAG_BODY_LEN + FLAG_SUFFIX.len();

pub const DIGEST_LEN: usize = 32;
pub const SALT_LEN: usize = 32;

pub const LEN_U64: usize = 8;
