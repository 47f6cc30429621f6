//! The definitions for TimeLockedWallet instructions

use arrayref::array_ref;
use borsh::{
    io::{Result as IoResult, Write},
    BorshDeserialize, BorshSerialize,
};
use solana_program::{
    clock::UnixTimestamp,
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

use crate::{error::TimeLockedWalletError, state::find_wallet_address};

const DISCRIMINATOR_LEN: usize = 8;

/// First 8 bytes of `sha256("global:create_wallet")`
pub const CREATE_WALLET_DISCRIMINATOR: [u8; 8] = [82, 172, 128, 18, 161, 207, 88, 63];
/// First 8 bytes of `sha256("global:deposit")`
pub const DEPOSIT_DISCRIMINATOR: [u8; 8] = [242, 35, 198, 137, 82, 225, 242, 182];
/// First 8 bytes of `sha256("global:withdraw")`
pub const WITHDRAW_DISCRIMINATOR: [u8; 8] = [183, 18, 70, 156, 148, 109, 161, 34];
/// First 8 bytes of `sha256("global:close_wallet")`
pub const CLOSE_WALLET_DISCRIMINATOR: [u8; 8] = [35, 212, 234, 224, 244, 208, 31, 204];

/// CreateWallet instruction data
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct CreateWallet {
    /// Unix timestamp from which withdrawals are allowed
    pub release_time: UnixTimestamp,
}

/// Deposit instruction data
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct Deposit {
    /// The number of lamports to move from the owner into the wallet
    pub amount: u64,
}

/// A TimeLockedWallet instruction
///
/// On the wire every instruction is an 8 byte discriminator followed by its
/// borsh encoded arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeLockedWalletInstruction {
    /// Create the owner's wallet account
    /// Requires that no account exists at the owner's wallet address.
    /// The release time is stored as given, past timestamps included.
    ///
    /// # Account references
    ///   0. `[SIGNER, WRITE]` Owner account
    ///   1. `[WRITE]` Wallet account
    ///   2. `[]` System program account
    CreateWallet(CreateWallet),

    /// Move lamports from the owner into the wallet
    /// Allowed at any time, before or after the release time.
    ///
    /// # Account references
    ///   0. `[SIGNER, WRITE]` Owner account
    ///   1. `[WRITE]` Wallet account
    ///   2. `[]` System program account
    Deposit(Deposit),

    /// Move every lamport above the rent-exempt minimum back to the owner
    /// Requires that the current time is greater than or equal to the release time.
    /// The wallet record is left untouched, so this can be repeated.
    ///
    /// # Account references
    ///   0. `[WRITE]` Wallet account
    ///   1. `[SIGNER, WRITE]` Owner account
    Withdraw,

    /// Close the wallet, returning all of its lamports to the owner
    /// Allowed at any time. The wallet address can be created again afterwards.
    ///
    /// # Account references
    ///   0. `[WRITE]` Wallet account
    ///   1. `[SIGNER, WRITE]` Owner account
    CloseWallet,
}

impl TimeLockedWalletInstruction {
    /// The discriminator prefixed to this instruction's data
    pub fn discriminator(&self) -> [u8; 8] {
        match self {
            Self::CreateWallet(_) => CREATE_WALLET_DISCRIMINATOR,
            Self::Deposit(_) => DEPOSIT_DISCRIMINATOR,
            Self::Withdraw => WITHDRAW_DISCRIMINATOR,
            Self::CloseWallet => CLOSE_WALLET_DISCRIMINATOR,
        }
    }

    /// Decodes instruction data
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        if input.len() < DISCRIMINATOR_LEN {
            return Err(TimeLockedWalletError::InstructionMissing.into());
        }
        let (tag, args) = input.split_at(DISCRIMINATOR_LEN);

        let instruction = match *array_ref![tag, 0, DISCRIMINATOR_LEN] {
            CREATE_WALLET_DISCRIMINATOR => Self::CreateWallet(unpack_args(args)?),
            DEPOSIT_DISCRIMINATOR => Self::Deposit(unpack_args(args)?),
            WITHDRAW_DISCRIMINATOR if args.is_empty() => Self::Withdraw,
            CLOSE_WALLET_DISCRIMINATOR if args.is_empty() => Self::CloseWallet,
            WITHDRAW_DISCRIMINATOR | CLOSE_WALLET_DISCRIMINATOR => {
                return Err(TimeLockedWalletError::InstructionDidNotDeserialize.into())
            }
            _ => return Err(TimeLockedWalletError::InstructionFallbackNotFound.into()),
        };

        Ok(instruction)
    }
}

fn unpack_args<T: BorshDeserialize>(args: &[u8]) -> Result<T, ProgramError> {
    T::try_from_slice(args).map_err(|_| TimeLockedWalletError::InstructionDidNotDeserialize.into())
}

impl BorshSerialize for TimeLockedWalletInstruction {
    fn serialize<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_all(&self.discriminator())?;
        match self {
            Self::CreateWallet(args) => args.serialize(writer),
            Self::Deposit(args) => args.serialize(writer),
            Self::Withdraw | Self::CloseWallet => Ok(()),
        }
    }
}

/// Creates a `CreateWallet` instruction for `owner`'s wallet
pub fn create_wallet(program_id: &Pubkey, owner: &Pubkey, release_time: UnixTimestamp) -> Instruction {
    let wallet = find_wallet_address(program_id, owner).0;
    Instruction::new_with_borsh(
        *program_id,
        &TimeLockedWalletInstruction::CreateWallet(CreateWallet { release_time }),
        vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(wallet, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// Creates a `Deposit` instruction for `owner`'s wallet
pub fn deposit(program_id: &Pubkey, owner: &Pubkey, amount: u64) -> Instruction {
    let wallet = find_wallet_address(program_id, owner).0;
    Instruction::new_with_borsh(
        *program_id,
        &TimeLockedWalletInstruction::Deposit(Deposit { amount }),
        vec![
            AccountMeta::new(*owner, true),
            AccountMeta::new(wallet, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// Creates a `Withdraw` instruction for `owner`'s wallet
pub fn withdraw(program_id: &Pubkey, owner: &Pubkey) -> Instruction {
    let wallet = find_wallet_address(program_id, owner).0;
    Instruction::new_with_borsh(
        *program_id,
        &TimeLockedWalletInstruction::Withdraw,
        vec![AccountMeta::new(wallet, false), AccountMeta::new(*owner, true)],
    )
}

/// Creates a `CloseWallet` instruction for `owner`'s wallet
pub fn close_wallet(program_id: &Pubkey, owner: &Pubkey) -> Instruction {
    let wallet = find_wallet_address(program_id, owner).0;
    Instruction::new_with_borsh(
        *program_id,
        &TimeLockedWalletInstruction::CloseWallet,
        vec![AccountMeta::new(wallet, false), AccountMeta::new(*owner, true)],
    )
}
