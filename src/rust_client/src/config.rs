use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::{env, error::Error, fs, path::PathBuf, str::FromStr};

const URL_LOCAL: &str = "http://127.0.0.1:8899";
const DEFAULT_LOCK_SECONDS: i64 = 20;
const DEFAULT_DEPOSIT_LAMPORTS: u64 = 1_000_000_000;

/// Client settings, read from `TLW_*` environment variables
#[derive(Debug)]
pub struct Config {
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub program_id: Pubkey,
    pub lock_seconds: i64,
    pub deposit_lamports: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let rpc_url = env::var("TLW_RPC_URL").unwrap_or_else(|_| URL_LOCAL.to_string());

        let keypair_path = match env::var("TLW_KEYPAIR") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let home = env::var("HOME")?;
                PathBuf::from(home).join(".config/solana/id.json")
            }
        };

        let program_id = match env::var("TLW_PROGRAM_ID") {
            Ok(id) => Pubkey::from_str(&id)?,
            Err(_) => time_locked_wallet::id(),
        };

        let lock_seconds = match env::var("TLW_LOCK_SECONDS") {
            Ok(secs) => secs.parse()?,
            Err(_) => DEFAULT_LOCK_SECONDS,
        };

        let deposit_lamports = match env::var("TLW_DEPOSIT_LAMPORTS") {
            Ok(lamports) => lamports.parse()?,
            Err(_) => DEFAULT_DEPOSIT_LAMPORTS,
        };

        Ok(Config {
            rpc_url,
            keypair_path,
            program_id,
            lock_seconds,
            deposit_lamports,
        })
    }

    /// Loads the owner keypair, stored as a JSON array of secret key bytes
    pub fn read_keypair(&self) -> Result<Keypair, Box<dyn Error>> {
        let keypair_secret_json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&self.keypair_path)?)?;
        let keypair_secret = keypair_secret_json
            .as_array()
            .ok_or("keypair file is not a JSON array")?
            .iter()
            .map(|value| {
                value
                    .as_u64()
                    .and_then(|byte| u8::try_from(byte).ok())
                    .ok_or("keypair file holds a non-byte value")
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Keypair::from_bytes(&keypair_secret)?)
    }
}
