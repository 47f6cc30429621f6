use chrono::prelude::*;
use config::Config;
use solana_client::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::{signature::Keypair, signer::Signer};
use std::env;
use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use time_locked_wallet::error::TimeLockedWalletError;
use transaction::{
    check_balance, close_wallet, create_and_deposit, fetch_wallet, needs_airdrop, program_error,
    request_air_drop, withdraw,
};

mod config;
mod transaction;

const USAGE: &str = "usage: rust_client [demo|status|withdraw|close]";

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let rpc_client = RpcClient::new(config.rpc_url.clone());

    let owner = config.read_keypair()?;
    println!("Owner: {:?}", owner.pubkey());

    match env::args().nth(1).as_deref() {
        None | Some("demo") => demo(&rpc_client, &config, &owner),
        Some("status") => print_status(&rpc_client, &config.program_id, &owner.pubkey()),
        Some("withdraw") => {
            match withdraw(&rpc_client, &config.program_id, &owner) {
                Err(err) if program_error(&err) == Some(TimeLockedWalletError::TooEarly) => {
                    println!("Wallet is still locked.");
                }
                result => {
                    result?;
                    println!("Withdrew successfully!");
                }
            }
            print_status(&rpc_client, &config.program_id, &owner.pubkey())
        }
        Some("close") => {
            close_wallet(&rpc_client, &config.program_id, &owner)?;
            println!("Wallet closed.");
            println!(
                "Owner balance: {:?}",
                check_balance(&rpc_client, &owner.pubkey())?
            );
            Ok(())
        }
        Some(_) => Err(USAGE.into()),
    }
}

fn print_status(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    owner: &Pubkey,
) -> Result<(), Box<dyn Error>> {
    let status = match fetch_wallet(rpc_client, program_id, owner)? {
        Some(status) => status,
        None => {
            println!("No wallet for {:?}", owner);
            return Ok(());
        }
    };

    let now = Utc::now().timestamp();
    println!("Wallet: {:?}", status.address);
    println!("  owner:        {:?}", status.wallet.owner);
    match status.release_time() {
        Some(release_time) => println!("  release time: {}", release_time.to_rfc3339()),
        None => println!("  release time: {} (unix)", status.wallet.release_time),
    }
    println!("  locked for:   {}s", status.seconds_remaining(now));
    println!("  lamports:     {}", status.lamports);
    println!("  withdrawable: {}", status.withdrawable);

    Ok(())
}

/// Runs a wallet through its whole lifecycle
fn demo(rpc_client: &RpcClient, config: &Config, owner: &Keypair) -> Result<(), Box<dyn Error>> {
    let program_id = &config.program_id;
    let owner_key = owner.pubkey();

    if fetch_wallet(rpc_client, program_id, &owner_key)?.is_some() {
        print_status(rpc_client, program_id, &owner_key)?;
        return Err("a wallet already exists for this owner, close it first".into());
    }

    let balance = rpc_client.get_balance(&owner_key)?;
    if needs_airdrop(balance, config.deposit_lamports) {
        println!("Requesting airdrop...");
        request_air_drop(rpc_client, &owner_key, 2.0)?;
    }

    let release_time = Utc::now().timestamp() + config.lock_seconds;

    println!("Creating wallet and depositing {} lamports...", config.deposit_lamports);
    create_and_deposit(
        rpc_client,
        program_id,
        release_time,
        config.deposit_lamports,
        owner,
    )?;
    print_status(rpc_client, program_id, &owner_key)?;

    println!("Withdrawing before the release time...");
    match withdraw(rpc_client, program_id, owner) {
        Err(err) if program_error(&err) == Some(TimeLockedWalletError::TooEarly) => {
            println!("Rejected as expected: wallet is still locked.");
        }
        Err(err) => return Err(err.into()),
        Ok(_) => return Err("withdraw succeeded before the release time".into()),
    }

    let diff = release_time.saturating_sub(Utc::now().timestamp());
    if diff > 0 {
        // Cluster time can lag wall time by a few seconds.
        println!("Waiting for release time in {} seconds...", diff + 5);
        sleep(Duration::from_secs((diff + 5) as u64));
    }

    println!("Withdrawing.");
    withdraw(rpc_client, program_id, owner)?;
    print_status(rpc_client, program_id, &owner_key)?;
    println!("Owner balance: {:?}", check_balance(rpc_client, &owner_key)?);

    println!("Closing wallet.");
    close_wallet(rpc_client, program_id, owner)?;
    print_status(rpc_client, program_id, &owner_key)?;
    println!("Owner balance: {:?}", check_balance(rpc_client, &owner_key)?);

    Ok(())
}
