use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
    program_pack::Pack, system_program,
};

use crate::{error::TimeLockedWalletError, state::Wallet};

/// Read access to the record stored in an account
pub trait WithData<T> {
    fn with_immut_data<R>(
        &self,
        f: impl FnOnce(T) -> Result<R, ProgramError>,
    ) -> Result<R, ProgramError>;
}

impl WithData<Wallet> for AccountInfo<'_> {
    fn with_immut_data<R>(
        &self,
        f: impl FnOnce(Wallet) -> Result<R, ProgramError>,
    ) -> Result<R, ProgramError> {
        let wallet = {
            let data = self.try_borrow_data()?;
            match data.len() {
                0 => return Err(TimeLockedWalletError::AccountNotInitialized.into()),
                len if len < Wallet::LEN => {
                    return Err(TimeLockedWalletError::AccountDidNotDeserialize.into())
                }
                _ => Wallet::unpack_from_slice(&data)?,
            }
        };
        f(wallet)
    }
}

/// Moves lamports between two accounts, the source must be owned by this program
pub fn move_lamports(from: &AccountInfo, to: &AccountInfo, lamports: u64) -> ProgramResult {
    let from_lamports = from
        .lamports()
        .checked_sub(lamports)
        .ok_or(ProgramError::InsufficientFunds)?;
    let to_lamports = to
        .lamports()
        .checked_add(lamports)
        .ok_or(ProgramError::ArithmeticOverflow)?;

    **from.try_borrow_mut_lamports()? = from_lamports;
    **to.try_borrow_mut_lamports()? = to_lamports;

    Ok(())
}

/// Drains `account` into `destination` and hands it back to the system program
pub fn close_account(account: &AccountInfo, destination: &AccountInfo) -> ProgramResult {
    move_lamports(account, destination, account.lamports())?;

    account.assign(&system_program::id());
    account.realloc(0, false)?;

    Ok(())
}
