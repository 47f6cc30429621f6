//! Program instruction processor
use crate::{
    instruction::{CreateWallet, Deposit, TimeLockedWalletInstruction},
    pack_utils::{close_account, move_lamports, WithData},
    state::{find_wallet_address, Wallet, WALLET_ACCOUNT_SIZE, WALLET_SEED},
    validation_utils::*,
};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::UnixTimestamp,
    entrypoint::ProgramResult,
    msg,
    program::{invoke, invoke_signed},
    program_error::ProgramError,
    program_pack::Pack,
    pubkey::Pubkey,
    system_instruction, system_program,
    sysvar::{clock::Clock, rent::Rent, Sysvar},
};

/// Instruction processor
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = TimeLockedWalletInstruction::unpack(instruction_data)?;

    match instruction {
        TimeLockedWalletInstruction::CreateWallet(ctx) => create_wallet(program_id, accounts, ctx),
        TimeLockedWalletInstruction::Deposit(ctx) => deposit(program_id, accounts, ctx),
        TimeLockedWalletInstruction::Withdraw => withdraw(program_id, accounts),
        TimeLockedWalletInstruction::CloseWallet => close_wallet(program_id, accounts),
    }
}

/// Creates the owner's wallet account
pub fn create_wallet(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    ctx: CreateWallet,
) -> ProgramResult {
    msg!("TimeLockedWallet::CreateWallet");

    let CreateWallet { release_time } = ctx;

    let account_info_iter = &mut accounts.iter();
    let owner_info = next_account_info(account_info_iter)?;
    let wallet_info = next_account_info(account_info_iter)?;
    let system_account_info = next_account_info(account_info_iter)?;

    let (wallet_key, bump) = find_wallet_address(program_id, owner_info.key);

    assert_is_signer(owner_info)?;
    assert_is_writable(owner_info)?;
    assert_is_writable(wallet_info)?;
    assert_keys_equal(&wallet_key, wallet_info.key)?;
    assert_system_program(system_account_info)?;

    let signer_seeds: &[&[u8]] = &[WALLET_SEED, owner_info.key.as_ref(), &[bump]];
    let rent_lamports = Rent::get()?.minimum_balance(WALLET_ACCOUNT_SIZE);
    let system_accounts = [
        owner_info.clone(),
        wallet_info.clone(),
        system_account_info.clone(),
    ];

    if wallet_info.lamports() == 0 || *wallet_info.owner != system_program::id() {
        // The system program rejects this with AccountAlreadyInUse if the wallet exists.
        invoke_signed(
            &system_instruction::create_account(
                owner_info.key,
                wallet_info.key,
                rent_lamports,
                WALLET_ACCOUNT_SIZE as u64,
                program_id,
            ),
            &system_accounts,
            &[signer_seeds],
        )?;
    } else {
        // Someone already sent lamports to the address, so create_account would fail.
        let top_up = rent_lamports.saturating_sub(wallet_info.lamports());
        if top_up > 0 {
            invoke(
                &system_instruction::transfer(owner_info.key, wallet_info.key, top_up),
                &system_accounts,
            )?;
        }
        invoke_signed(
            &system_instruction::allocate(wallet_info.key, WALLET_ACCOUNT_SIZE as u64),
            &system_accounts,
            &[signer_seeds],
        )?;
        invoke_signed(
            &system_instruction::assign(wallet_info.key, program_id),
            &system_accounts,
            &[signer_seeds],
        )?;
    }

    let wallet = Wallet {
        owner: *owner_info.key,
        release_time,
        bump,
    };
    wallet.pack_into_slice(&mut wallet_info.try_borrow_mut_data()?);

    msg!(
        "Wallet {} created for {}, release time {}",
        wallet_info.key,
        owner_info.key,
        release_time
    );

    Ok(())
}

/// Move lamports from the owner into the wallet
pub fn deposit(program_id: &Pubkey, accounts: &[AccountInfo], ctx: Deposit) -> ProgramResult {
    msg!("TimeLockedWallet::Deposit");

    let Deposit { amount } = ctx;

    let account_info_iter = &mut accounts.iter();
    let owner_info = next_account_info(account_info_iter)?;
    let wallet_info = next_account_info(account_info_iter)?;
    let system_account_info = next_account_info(account_info_iter)?;

    assert_system_program(system_account_info)?;
    load_owned_wallet(program_id, wallet_info, owner_info)?;

    msg!("Depositing {} lamports into wallet {}", amount, wallet_info.key);

    invoke(
        &system_instruction::transfer(owner_info.key, wallet_info.key, amount),
        &[
            owner_info.clone(),
            wallet_info.clone(),
            system_account_info.clone(),
        ],
    )?;

    Ok(())
}

/// Move every lamport above the rent-exempt minimum back to the owner
pub fn withdraw(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("TimeLockedWallet::Withdraw");

    let account_info_iter = &mut accounts.iter();
    let wallet_info = next_account_info(account_info_iter)?;
    let owner_info = next_account_info(account_info_iter)?;

    let wallet = load_owned_wallet(program_id, wallet_info, owner_info)?;

    let now: UnixTimestamp = Clock::get()?.unix_timestamp;
    assert_can_withdraw(&wallet, now)?;

    let rent_lamports = Rent::get()?.minimum_balance(wallet_info.data_len());
    let withdraw_lamports = wallet_info.lamports().saturating_sub(rent_lamports);

    move_lamports(wallet_info, owner_info, withdraw_lamports)?;

    msg!(
        "Withdrew {} lamports from wallet {}",
        withdraw_lamports,
        wallet_info.key
    );

    Ok(())
}

/// Close the wallet, returning all of its lamports to the owner
pub fn close_wallet(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    msg!("TimeLockedWallet::CloseWallet");

    let account_info_iter = &mut accounts.iter();
    let wallet_info = next_account_info(account_info_iter)?;
    let owner_info = next_account_info(account_info_iter)?;

    load_owned_wallet(program_id, wallet_info, owner_info)?;

    let lamports = wallet_info.lamports();
    close_account(wallet_info, owner_info)?;

    msg!(
        "Wallet {} closed, {} lamports returned to {}",
        wallet_info.key,
        lamports,
        owner_info.key
    );

    Ok(())
}

/// Checks shared by every instruction that touches an existing wallet
fn load_owned_wallet(
    program_id: &Pubkey,
    wallet_info: &AccountInfo,
    owner_info: &AccountInfo,
) -> Result<Wallet, ProgramError> {
    assert_is_signer(owner_info)?;
    assert_is_writable(owner_info)?;
    assert_is_writable(wallet_info)?;
    assert_owned_by(wallet_info, program_id)?;

    wallet_info.with_immut_data(|wallet: Wallet| {
        assert_wallet_owner(&wallet, owner_info.key)?;
        assert_wallet_address(program_id, &wallet, wallet_info.key)?;
        Ok(wallet)
    })
}
