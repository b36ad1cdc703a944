//! tx-sign: build, encode and sign a single transaction from the command line.
//!
//! The binary is a thin wrapper; argument parsing and report building live
//! here so they can be tested without spawning a process.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use primitive_types::U256;
use serde::Serialize;
use tracing::debug;
use tx_signer::{
    to_hex, AccessListTx, Address, FeeMarketTx, LegacyTx, PrivateKey, Quantity,
    Secp256k1Provider, SignerConfig, Transaction, TransactionSignerApi,
    TransactionSigningService, TxCommon,
};
use zeroize::Zeroize;

/// tx-sign: Ethereum transaction encoder and signer
#[derive(Parser, Debug)]
#[command(name = "tx-sign")]
#[command(about = "Encode and sign legacy, EIP-2930 and EIP-1559 transactions")]
pub struct Cli {
    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do with the transaction.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the unsigned encoding and signing hash
    Encode(TxArgs),
    /// Sign and print the raw transaction, its hash and the sender
    Sign {
        /// Hex-encoded 32-byte private key
        #[arg(long, env = "SIGNER_PRIVATE_KEY", hide_env_values = true, value_parser = parse_key)]
        key: PrivateKey,

        #[command(flatten)]
        tx: TxArgs,
    },
    /// Print the address controlled by a private key
    Address {
        /// Hex-encoded 32-byte private key
        #[arg(long, env = "SIGNER_PRIVATE_KEY", hide_env_values = true, value_parser = parse_key)]
        key: PrivateKey,
    },
}

/// Transaction kind selector.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Legacy with EIP-155 replay protection
    Legacy,
    /// EIP-2930 access-list transaction
    Eip2930,
    /// EIP-1559 fee-market transaction
    Eip1559,
}

/// Transaction fields. Quantities accept decimal or `0x` hex.
#[derive(Args, Debug)]
pub struct TxArgs {
    /// Transaction kind
    #[arg(long, value_enum, default_value = "eip1559")]
    pub kind: Kind,

    /// Chain id
    #[arg(long, default_value = "1")]
    pub chain_id: u64,

    /// Sender nonce
    #[arg(long, default_value = "0")]
    pub nonce: u64,

    /// Gas limit
    #[arg(long, default_value = "21000")]
    pub gas_limit: u64,

    /// Recipient address; omit to create a contract
    #[arg(long)]
    pub to: Option<String>,

    /// Value in wei
    #[arg(long, default_value = "0")]
    pub value: String,

    /// Gas price in wei (legacy, EIP-2930)
    #[arg(long, default_value = "0")]
    pub gas_price: String,

    /// Priority fee cap in wei (EIP-1559)
    #[arg(long, default_value = "0")]
    pub max_priority_fee: String,

    /// Total fee cap in wei (EIP-1559)
    #[arg(long, default_value = "0")]
    pub max_fee: String,

    /// Hex calldata
    #[arg(long, default_value = "0x")]
    pub data: String,
}

/// Parsed transaction fields with calldata owned by the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct TxFields {
    kind: Kind,
    chain_id: u64,
    nonce: u64,
    gas_limit: u64,
    to: Option<Address>,
    value: Quantity,
    gas_price: Quantity,
    max_priority_fee: Quantity,
    max_fee: Quantity,
    data: Vec<u8>,
}

impl TxFields {
    /// Parse and validate command-line fields.
    pub fn parse(args: &TxArgs) -> Result<Self> {
        let to = args
            .to
            .as_deref()
            .map(parse_address)
            .transpose()
            .context("--to")?;

        Ok(Self {
            kind: args.kind,
            chain_id: args.chain_id,
            nonce: args.nonce,
            gas_limit: args.gas_limit,
            to,
            value: parse_quantity(&args.value).context("--value")?,
            gas_price: parse_quantity(&args.gas_price).context("--gas-price")?,
            max_priority_fee: parse_quantity(&args.max_priority_fee)
                .context("--max-priority-fee")?,
            max_fee: parse_quantity(&args.max_fee).context("--max-fee")?,
            data: decode_hex(&args.data).context("--data")?,
        })
    }

    /// Borrow as a domain transaction.
    pub fn transaction(&self) -> Transaction<'_> {
        let common = TxCommon {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            to: self.to,
            value: self.value,
            data: &self.data,
        };
        match self.kind {
            Kind::Legacy => LegacyTx {
                common,
                gas_price: self.gas_price,
            }
            .into(),
            Kind::Eip2930 => AccessListTx {
                common,
                gas_price: self.gas_price,
            }
            .into(),
            Kind::Eip1559 => FeeMarketTx {
                common,
                max_priority_fee_per_gas: self.max_priority_fee,
                max_fee_per_gas: self.max_fee,
            }
            .into(),
        }
    }
}

/// Command output.
#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Transaction kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unsigned encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<String>,
    /// Signing hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_hash: Option<String>,
    /// Signed encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Transaction hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Recovery value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<u64>,
    /// Signer address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
}

impl Report {
    /// Render as `name: value` lines.
    pub fn to_text(&self) -> String {
        let rows: [(&str, Option<String>); 7] = [
            ("kind", self.kind.clone()),
            ("unsigned", self.unsigned.clone()),
            ("signing_hash", self.signing_hash.clone()),
            ("raw", self.raw.clone()),
            ("tx_hash", self.tx_hash.clone()),
            ("v", self.v.map(|v| v.to_string())),
            ("sender", self.sender.clone()),
        ];
        rows.into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{:<13}{}", format!("{}:", name), v)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Execute `command` against `service`.
pub fn run<S: TransactionSignerApi>(service: &S, command: &Command) -> Result<Report> {
    match command {
        Command::Encode(args) => {
            let fields = TxFields::parse(args)?;
            let tx = fields.transaction();
            debug!(kind = %tx.tx_type(), chain_id = tx.chain_id(), "encoding transaction");
            Ok(Report {
                kind: Some(tx.tx_type().to_string()),
                unsigned: Some(to_hex(&service.encode_unsigned(&tx)?)),
                signing_hash: Some(to_hex(&service.signing_hash(&tx)?)),
                ..Default::default()
            })
        }
        Command::Sign { key, tx } => {
            let fields = TxFields::parse(tx)?;
            let tx = fields.transaction();
            debug!(kind = %tx.tx_type(), chain_id = tx.chain_id(), "signing transaction");

            let signing_hash = service.signing_hash(&tx)?;
            let signed = service.sign(tx, key)?;
            Ok(Report {
                kind: Some(signed.tx_type().to_string()),
                signing_hash: Some(to_hex(&signing_hash)),
                raw: Some(to_hex(&service.encode_signed(&signed)?)),
                tx_hash: Some(to_hex(&service.tx_hash(&signed)?)),
                v: Some(signed.signature().v),
                sender: Some(to_hex(&service.recover_sender(&signed)?)),
                ..Default::default()
            })
        }
        Command::Address { key } => {
            debug!("deriving address");
            Ok(Report {
                sender: Some(to_hex(&service.address_of(key)?)),
                ..Default::default()
            })
        }
    }
}

/// Build the production service from environment configuration.
pub fn default_service() -> Result<TransactionSigningService<Secp256k1Provider>> {
    Ok(TransactionSigningService::new(
        Secp256k1Provider::new(),
        SignerConfig::from_env(),
    )?)
}

/// Decode hex with an optional `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let digits = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(digits)?)
}

/// Parse a decimal or `0x` hex quantity.
pub fn parse_quantity(s: &str) -> Result<Quantity> {
    let s = s.trim();
    if s.starts_with("0x") {
        let mut digits = s[2..].to_string();
        if digits.len() % 2 == 1 {
            digits.insert(0, '0');
        }
        let bytes = hex::decode(&digits)?;
        return Ok(Quantity::from_be_slice(&bytes)?);
    }
    let value = U256::from_dec_str(s).map_err(|e| anyhow!("invalid decimal '{}': {:?}", s, e))?;
    Ok(Quantity::from(value))
}

/// Parse a 20-byte hex address.
pub fn parse_address(s: &str) -> Result<Address> {
    let bytes = decode_hex(s)?;
    if bytes.len() != 20 {
        bail!("address must be 20 bytes, got {}", bytes.len());
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes);
    Ok(address)
}

/// Parse a 32-byte hex private key.
///
/// Used as the clap value parser, so the key is held only in its zeroizing
/// form after argument parsing.
pub fn parse_key(s: &str) -> Result<PrivateKey> {
    let mut bytes = decode_hex(s)?;
    let key = PrivateKey::from_slice(&bytes);
    bytes.zeroize();
    Ok(key?)
}
