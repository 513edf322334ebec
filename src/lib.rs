use cid::Cid;
use serde::Serialize;
use slog::{debug, warn, Logger};

pub mod swhid;
pub mod codec;
pub mod hash;
pub mod content_id;
pub mod resolve;
pub mod error;
pub mod logging;

pub use swhid::{Swhid, ObjectType, InputToken};
pub use codec::{Codec, Support, DEFAULT_CODEC};
pub use resolve::{GitTarget, verify_block, verify_block_file};
pub use error::ConvertError;

/// What to do when one token of a batch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first failing token.
    #[default]
    FailFast,
    /// Process every token and report all failures.
    CollectAndReport,
}

/// A token converted to a CID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    input: String,
    object_type: Option<ObjectType>,
    codec: Codec,
    #[serde(rename = "cid")]
    base16: String,
    support: Support,
    #[serde(skip)]
    cid: Cid,
}

impl Conversion {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// The CID as base16 text, as printed on the command line.
    pub fn base16(&self) -> &str {
        &self.base16
    }

    pub fn support(&self) -> Support {
        self.support
    }

    pub fn is_best_effort(&self) -> bool {
        self.support == Support::BestEffort
    }
}

/// Per-token results of a batch, in input order.
#[derive(Debug)]
pub struct Batch<T> {
    pub outcomes: Vec<(String, Result<T, ConvertError>)>,
    /// Tokens left unprocessed after a fail-fast stop.
    pub skipped: usize,
}

impl<T> Batch<T> {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

#[derive(Clone)]
pub struct Converter {
    pub default_codec: Codec,
    pub error_mode: ErrorMode,
    logger: Logger,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            default_codec: DEFAULT_CODEC,
            error_mode: ErrorMode::default(),
            logger: logging::discard(),
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_codec(mut self, default_codec: Codec) -> Self {
        self.default_codec = default_codec;
        self
    }

    pub fn with_error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Convert a SWHID or bare hex hash into a version-1 CID.
    pub fn convert_token(&self, token: &str) -> Result<Conversion, ConvertError> {
        let parsed = InputToken::parse(token)?;
        let (codec, support) = Codec::select(parsed.object_type(), self.default_codec);
        if support == Support::BestEffort {
            warn!(self.logger, "encoding is not yet supported"; "token" => token, "codec" => codec.name());
        }

        let digest = hash::decode_hex(parsed.hash_hex())?;
        let multihash = hash::encode_sha1(&digest)?;
        let cid = content_id::build(codec, multihash);
        let base16 = content_id::to_base16(&cid)?;
        debug!(self.logger, "converted"; "token" => token, "cid" => &base16);

        Ok(Conversion {
            input: token.to_string(),
            object_type: parsed.object_type(),
            codec,
            base16,
            support,
            cid,
        })
    }

    /// Find the git hash and candidate SWHIDs behind a CID in any multibase.
    pub fn resolve_token(&self, token: &str) -> Result<GitTarget, ConvertError> {
        let cid = content_id::parse(token)?;
        let target = GitTarget::from_cid(&cid)?;
        debug!(self.logger, "resolved"; "cid" => token, "hash" => target.hash_hex());
        Ok(target)
    }

    pub fn convert_all<I, S>(&self, tokens: I) -> Batch<Conversion>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batch(tokens, |token| self.convert_token(token))
    }

    pub fn resolve_all<I, S>(&self, tokens: I) -> Batch<GitTarget>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batch(tokens, |token| self.resolve_token(token))
    }

    fn run_batch<T, I, S, F>(&self, tokens: I, f: F) -> Batch<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Result<T, ConvertError>,
    {
        let mut outcomes = Vec::new();
        let mut skipped = 0;
        let mut stopped = false;

        for token in tokens {
            if stopped {
                skipped += 1;
                continue;
            }
            let token = token.as_ref();
            let result = f(token);
            if result.is_err() && self.error_mode == ErrorMode::FailFast {
                stopped = true;
            }
            outcomes.push((token.to_string(), result));
        }

        Batch { outcomes, skipped }
    }
}
