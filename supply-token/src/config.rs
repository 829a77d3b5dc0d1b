//! Configuration for the issuance run.
//!
//! Settings come from, in increasing priority:
//! - built-in defaults (testnet endpoint, `MED`, limit `1000`, amount `500`)
//! - a TOML file, where `${VAR_NAME}` is replaced by the environment value
//! - command-line flags and their environment variables (applied by the binary)
//!
//! Seeds have no default and should be supplied through the environment.
//!
//! ```toml
//! [network]
//! rpc_url = "https://s.altnet.rippletest.net:51234/"
//!
//! [issuer]
//! seed = "${ISSUER_SEED}"
//!
//! [receiver]
//! seed = "${RECEIVER_SEED}"
//! address = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
//!
//! [token]
//! currency = "MED"
//! trust_limit = "1000"
//! issue_amount = "500"
//! ledger_offset = 10
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xrpl_primitives::{ClassicAddress, Seed};
use xrpl_rpc::types::TESTNET_URL;
use xrpl_rpc::RpcConfig;
use xrpl_transaction::{CurrencyCode, IssuedValue, TransactionError};

use crate::error::ConfigError;
use crate::flow::IssuancePlan;

/// Full configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Node endpoint settings.
    #[serde(default)]
    pub network: NetworkConfig,

    /// The issuing account.
    #[serde(default)]
    pub issuer: AccountConfig,

    /// The receiving account.
    #[serde(default)]
    pub receiver: AccountConfig,

    /// What to issue.
    #[serde(default)]
    pub token: TokenConfig,
}

/// Node endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// JSON-RPC URL.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Delay between polls while waiting for validation, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_rpc_url() -> String {
    TESTNET_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Credentials of one account.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Family seed (`s...`).
    #[serde(default, skip_serializing)]
    pub seed: Option<String>,

    /// Classic address. Resolved from the seed by the node when absent.
    #[serde(default)]
    pub address: Option<String>,
}

impl AccountConfig {
    /// Parse the seed and optional address.
    ///
    /// `role` names the section in error messages.
    pub fn credentials(
        &self,
        role: &'static str,
    ) -> Result<(Seed, Option<ClassicAddress>), ConfigError> {
        let seed = self
            .seed
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing(role_field(role, "seed")))?
            .parse::<Seed>()
            .map_err(|e| ConfigError::Invalid {
                field: role_field(role, "seed"),
                reason: e.to_string(),
            })?;

        let address = self
            .address
            .as_deref()
            .map(str::parse::<ClassicAddress>)
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                field: role_field(role, "address"),
                reason: e.to_string(),
            })?;

        Ok((seed, address))
    }
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("seed", &self.seed.as_ref().map(|_| "<redacted>"))
            .field("address", &self.address)
            .finish()
    }
}

fn role_field(role: &'static str, field: &'static str) -> &'static str {
    match (role, field) {
        ("issuer", "seed") => "issuer.seed",
        ("issuer", "address") => "issuer.address",
        ("receiver", "seed") => "receiver.seed",
        ("receiver", "address") => "receiver.address",
        (_, "seed") => "seed",
        _ => "address",
    }
}

/// What to issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Currency code: 3 characters or 40 hex digits.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Trust line limit set by the receiver.
    #[serde(default = "default_trust_limit")]
    pub trust_limit: String,

    /// Amount the issuer sends.
    #[serde(default = "default_issue_amount")]
    pub issue_amount: String,

    /// Ledgers after the current one both transactions stay valid for.
    #[serde(default = "default_ledger_offset")]
    pub ledger_offset: u32,
}

fn default_currency() -> String {
    "MED".to_string()
}

fn default_trust_limit() -> String {
    "1000".to_string()
}

fn default_issue_amount() -> String {
    "500".to_string()
}

fn default_ledger_offset() -> u32 {
    10
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            trust_limit: default_trust_limit(),
            issue_amount: default_issue_amount(),
            ledger_offset: default_ledger_offset(),
        }
    }
}

impl TokenConfig {
    /// Parse the token settings into an issuance plan.
    pub fn plan(&self) -> Result<IssuancePlan, ConfigError> {
        let invalid = |field: &'static str| {
            move |e: TransactionError| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            }
        };

        let currency: CurrencyCode = self.currency.parse().map_err(invalid("token.currency"))?;
        let trust_limit: IssuedValue =
            self.trust_limit.parse().map_err(invalid("token.trust_limit"))?;
        let issue_amount: IssuedValue =
            self.issue_amount.parse().map_err(invalid("token.issue_amount"))?;

        if trust_limit.is_negative() {
            return Err(ConfigError::Invalid {
                field: "token.trust_limit",
                reason: format!("{trust_limit} is negative"),
            });
        }
        if !issue_amount.is_positive() {
            return Err(ConfigError::Invalid {
                field: "token.issue_amount",
                reason: format!("{issue_amount} is not positive"),
            });
        }
        if self.ledger_offset == 0 {
            return Err(ConfigError::Invalid {
                field: "token.ledger_offset",
                reason: "must be at least one ledger".to_string(),
            });
        }

        Ok(IssuancePlan {
            currency,
            trust_limit,
            issue_amount,
            ledger_offset: self.ledger_offset,
        })
    }
}

impl Config {
    /// Load configuration from a TOML file, expanding `${VAR}` references.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a TOML string, expanding `${VAR}` references.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(toml)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.network.rpc_url.starts_with("http://")
            && !self.network.rpc_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                field: "network.rpc_url",
                reason: format!("{} is not an http(s) URL", self.network.rpc_url),
            });
        }
        if self.network.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "network.poll_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        let (issuer_seed, issuer_address) = self.issuer.credentials("issuer")?;
        let (receiver_seed, receiver_address) = self.receiver.credentials("receiver")?;
        if issuer_seed.expose_secret() == receiver_seed.expose_secret() {
            return Err(ConfigError::Invalid {
                field: "receiver.seed",
                reason: "issuer and receiver must be different accounts".to_string(),
            });
        }
        if let (Some(a), Some(b)) = (&issuer_address, &receiver_address) {
            if a == b {
                return Err(ConfigError::Invalid {
                    field: "receiver.address",
                    reason: "issuer and receiver must be different accounts".to_string(),
                });
            }
        }

        self.token.plan()?;
        Ok(())
    }

    /// Client settings for the configured node.
    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            url: self.network.rpc_url.clone(),
            poll_interval: Duration::from_millis(self.network.poll_interval_ms),
        }
    }
}

/// Replace `${VAR_NAME}` with the value of the environment variable.
///
/// Comment lines are copied verbatim so documentation inside the file may
/// mention placeholders without requiring them to be set.
pub fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(input.len());
    let mut offset = 0;

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            offset += line.len();
            continue;
        }

        let mut rest = line;
        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            let position = offset + (line.len() - rest.len()) + start;
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or(ConfigError::MalformedPlaceholder(position))?;
            let name = &after[..end];
            if name.is_empty() {
                return Err(ConfigError::MalformedPlaceholder(position));
            }
            let value = std::env::var(name).map_err(|_| ConfigError::MissingEnvVar {
                name: name.to_string(),
                position,
            })?;
            result.push_str(&value);
            rest = &after[end + 1..];
        }
        result.push_str(rest);
        offset += line.len();
    }

    Ok(result)
}
