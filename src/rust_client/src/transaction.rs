use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use solana_client::{client_error::ClientError, rpc_client::RpcClient};
use solana_program::{
    clock::UnixTimestamp, instruction::InstructionError, program_pack::Pack, pubkey::Pubkey,
};
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::{Transaction, TransactionError},
};
use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use time_locked_wallet::{
    error::TimeLockedWalletError,
    instruction,
    state::{find_wallet_address, Wallet},
};

const LAMPORTS_PER_SOL: f64 = 1000000000.0;

/// Left on the owner after a deposit to pay for the remaining transactions
const FEE_RESERVE_LAMPORTS: u64 = 100_000_000;

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub fn check_balance(rpc_client: &RpcClient, public_key: &Pubkey) -> Result<f64, Box<dyn Error>> {
    Ok(rpc_client.get_balance(public_key)? as f64 / LAMPORTS_PER_SOL)
}

pub fn request_air_drop(
    rpc_client: &RpcClient,
    pub_key: &Pubkey,
    amount_sol: f64,
) -> Result<Signature, Box<dyn Error>> {
    let sig = rpc_client.request_airdrop(pub_key, (amount_sol * LAMPORTS_PER_SOL) as u64)?;
    loop {
        let confirmed = rpc_client.confirm_transaction(&sig)?;
        if confirmed {
            break;
        }
        sleep(CONFIRM_POLL_INTERVAL);
    }
    Ok(sig)
}

/// Whether `balance_lamports` cannot cover a deposit of `deposit_lamports` plus fees
pub fn needs_airdrop(balance_lamports: u64, deposit_lamports: u64) -> bool {
    balance_lamports < deposit_lamports.saturating_add(FEE_RESERVE_LAMPORTS)
}

/// What a caller needs to render a wallet
#[derive(Debug)]
pub struct WalletStatus {
    pub address: Pubkey,
    pub wallet: Wallet,
    pub lamports: u64,
    pub withdrawable: u64,
}

impl WalletStatus {
    pub fn release_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.wallet.release_time, 0).single()
    }

    pub fn seconds_remaining(&self, now: UnixTimestamp) -> i64 {
        self.wallet.release_time.saturating_sub(now).max(0)
    }
}

/// Fetches and decodes `owner`'s wallet, `None` if it does not exist
pub fn fetch_wallet(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    owner: &Pubkey,
) -> Result<Option<WalletStatus>, Box<dyn Error>> {
    let address = find_wallet_address(program_id, owner).0;
    let account = match rpc_client.get_account_with_commitment(&address, rpc_client.commitment())?.value {
        Some(account) if account.owner == *program_id => account,
        _ => return Ok(None),
    };

    if account.data.len() < Wallet::LEN {
        return Err(format!("wallet {} holds {} bytes", address, account.data.len()).into());
    }
    let wallet = Wallet::unpack_from_slice(&account.data)?;
    let rent = rpc_client.get_minimum_balance_for_rent_exemption(account.data.len())?;

    Ok(Some(WalletStatus {
        address,
        wallet,
        lamports: account.lamports,
        withdrawable: account.lamports.saturating_sub(rent),
    }))
}

/// Program error carried by a failed transaction, if any
pub fn program_error(err: &ClientError) -> Option<TimeLockedWalletError> {
    match err.get_transaction_error()? {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            TimeLockedWalletError::from_u32(code)
        }
        _ => None,
    }
}

fn send(
    rpc_client: &RpcClient,
    instructions: &[Instruction],
    owner: &Keypair,
) -> Result<Signature, ClientError> {
    let mut transaction = Transaction::new_with_payer(instructions, Some(&owner.pubkey()));

    let blockhash = rpc_client.get_latest_blockhash()?;
    transaction.sign(&[owner], blockhash);

    rpc_client.send_and_confirm_transaction(&transaction)
}

pub fn create_and_deposit(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    release_time: UnixTimestamp,
    lamports: u64,
    owner: &Keypair,
) -> Result<Signature, ClientError> {
    send(
        rpc_client,
        &[
            instruction::create_wallet(program_id, &owner.pubkey(), release_time),
            instruction::deposit(program_id, &owner.pubkey(), lamports),
        ],
        owner,
    )
}

pub fn withdraw(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    owner: &Keypair,
) -> Result<Signature, ClientError> {
    send(
        rpc_client,
        &[instruction::withdraw(program_id, &owner.pubkey())],
        owner,
    )
}

pub fn close_wallet(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    owner: &Keypair,
) -> Result<Signature, ClientError> {
    send(
        rpc_client,
        &[instruction::close_wallet(program_id, &owner.pubkey())],
        owner,
    )
}
