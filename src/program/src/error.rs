//! Error types

use thiserror::Error;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use solana_program::{
    decode_error::DecodeError,
    msg,
    program_error::{PrintProgramError, ProgramError},
};

/// Errors raised by the time-locked wallet program.
///
/// The numeric codes line up with the ones clients of the original deployment
/// already decode: account constraint failures in the 100..=3999 range and the
/// single domain error, `TooEarly`, at 6000.
#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum TimeLockedWalletError {
    /// Instruction data is shorter than a discriminator
    #[error("InstructionMissing")]
    InstructionMissing = 100,
    /// Discriminator does not name any instruction
    #[error("InstructionFallbackNotFound")]
    InstructionFallbackNotFound = 101,
    /// Instruction arguments could not be decoded
    #[error("InstructionDidNotDeserialize")]
    InstructionDidNotDeserialize = 102,
    /// An account that must be writable was passed read-only
    #[error("ConstraintMut")]
    ConstraintMut = 2000,
    /// The signer is not the owner recorded in the wallet
    #[error("ConstraintHasOne")]
    ConstraintHasOne = 2001,
    /// The wallet address does not match its derivation seeds
    #[error("ConstraintSeeds")]
    ConstraintSeeds = 2006,
    /// The account data does not start with the wallet discriminator
    #[error("AccountDiscriminatorMismatch")]
    AccountDiscriminatorMismatch = 3002,
    /// The account data is too short to hold a wallet record
    #[error("AccountDidNotDeserialize")]
    AccountDidNotDeserialize = 3003,
    /// The wallet account is not owned by this program
    #[error("AccountOwnedByWrongProgram")]
    AccountOwnedByWrongProgram = 3007,
    /// The wallet account holds no data
    #[error("AccountNotInitialized")]
    AccountNotInitialized = 3012,
    /// Withdraw attempted before the release time
    #[error("TooEarly")]
    TooEarly = 6000,
}

impl From<TimeLockedWalletError> for ProgramError {
    fn from(e: TimeLockedWalletError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for TimeLockedWalletError {
    fn type_of() -> &'static str {
        "Time Locked Wallet Error"
    }
}

impl PrintProgramError for TimeLockedWalletError {
    fn print<E>(&self)
    where
        E: 'static + std::error::Error + DecodeError<E> + PrintProgramError + FromPrimitive,
    {
        match self {
            TimeLockedWalletError::InstructionMissing => {
                msg!("Error: Instruction data is missing its 8 byte discriminator.")
            }
            TimeLockedWalletError::InstructionFallbackNotFound => {
                msg!("Error: Unknown instruction discriminator.")
            }
            TimeLockedWalletError::InstructionDidNotDeserialize => {
                msg!("Error: Could not deserialize instruction arguments.")
            }
            TimeLockedWalletError::ConstraintMut => {
                msg!("Error: An account required to be writable was passed read-only.")
            }
            TimeLockedWalletError::ConstraintHasOne => {
                msg!("Error: The signer is not the owner of this wallet.")
            }
            TimeLockedWalletError::ConstraintSeeds => {
                msg!("Error: Wallet address does not match the owner's derived address.")
            }
            TimeLockedWalletError::AccountDiscriminatorMismatch => {
                msg!("Error: Account is not a wallet account.")
            }
            TimeLockedWalletError::AccountDidNotDeserialize => {
                msg!("Error: There was an issue deserializing wallet account data.")
            }
            TimeLockedWalletError::AccountOwnedByWrongProgram => {
                msg!("Error: Wallet account is owned by another program.")
            }
            TimeLockedWalletError::AccountNotInitialized => {
                msg!("Error: Wallet account is not initialized.")
            }
            TimeLockedWalletError::TooEarly => msg!("Error: It's too early to withdraw."),
        }
    }
}
