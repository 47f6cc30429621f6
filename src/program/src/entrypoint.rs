//! Program entrypoint, compiled out with the `no-entrypoint` feature

#![cfg(not(feature = "no-entrypoint"))]

use solana_program::{
    account_info::AccountInfo, entrypoint, entrypoint::ProgramResult,
    program_error::PrintProgramError, pubkey::Pubkey,
};

use crate::{error::TimeLockedWalletError, processor};

entrypoint!(process_instruction);
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::process_instruction(program_id, accounts, instruction_data).map_err(|err| {
        // Custom codes decode to TimeLockedWalletError, everything else prints as is.
        err.print::<TimeLockedWalletError>();
        err
    })
}
