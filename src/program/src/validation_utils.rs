use solana_program::{
    account_info::AccountInfo, clock::UnixTimestamp, entrypoint::ProgramResult, msg,
    program_error::ProgramError, pubkey::Pubkey, system_program,
};

use crate::{
    error::TimeLockedWalletError,
    state::{create_wallet_address, Wallet},
};

pub fn assert_is_signer(account: &AccountInfo) -> ProgramResult {
    if account.is_signer {
        Ok(())
    } else {
        Err(ProgramError::MissingRequiredSignature)
    }
}

pub fn assert_is_writable(account: &AccountInfo) -> ProgramResult {
    if account.is_writable {
        Ok(())
    } else {
        Err(TimeLockedWalletError::ConstraintMut.into())
    }
}

pub fn assert_keys_equal(key1: &Pubkey, key2: &Pubkey) -> ProgramResult {
    if key1 != key2 {
        Err(TimeLockedWalletError::ConstraintSeeds.into())
    } else {
        Ok(())
    }
}

pub fn assert_owned_by(account: &AccountInfo, owner: &Pubkey) -> ProgramResult {
    if account.owner != owner {
        Err(TimeLockedWalletError::AccountOwnedByWrongProgram.into())
    } else {
        Ok(())
    }
}

pub fn assert_system_program(account: &AccountInfo) -> ProgramResult {
    if *account.key != system_program::id() {
        Err(ProgramError::IncorrectProgramId)
    } else {
        Ok(())
    }
}

/// The signer must be the owner recorded in the wallet
pub fn assert_wallet_owner(wallet: &Wallet, signer: &Pubkey) -> ProgramResult {
    if wallet.owner != *signer {
        msg!("Wallet owner: {}, signer: {}", wallet.owner, signer);
        Err(TimeLockedWalletError::ConstraintHasOne.into())
    } else {
        Ok(())
    }
}

/// The wallet account must sit at the address derived from its owner and stored bump
pub fn assert_wallet_address(
    program_id: &Pubkey,
    wallet: &Wallet,
    wallet_key: &Pubkey,
) -> ProgramResult {
    let expected = create_wallet_address(program_id, &wallet.owner, wallet.bump)
        .map_err(|_| ProgramError::from(TimeLockedWalletError::ConstraintSeeds))?;
    assert_keys_equal(&expected, wallet_key)
}

pub fn assert_can_withdraw(wallet: &Wallet, now: UnixTimestamp) -> ProgramResult {
    if wallet.is_unlocked(now) {
        Ok(())
    } else {
        msg!("Release time: {}, Now: {}", wallet.release_time, now);
        Err(TimeLockedWalletError::TooEarly.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::find_wallet_address;

    fn wallet_for(owner: Pubkey) -> (Pubkey, Wallet) {
        let (address, bump) = find_wallet_address(&crate::id(), &owner);
        (
            address,
            Wallet {
                owner,
                release_time: 100,
                bump,
            },
        )
    }

    #[test]
    fn time_gate() {
        let (_, wallet) = wallet_for(Pubkey::new_unique());
        assert_eq!(
            assert_can_withdraw(&wallet, 99),
            Err(TimeLockedWalletError::TooEarly.into())
        );
        assert_eq!(assert_can_withdraw(&wallet, 100), Ok(()));
    }

    #[test]
    fn owner_relation() {
        let owner = Pubkey::new_unique();
        let (_, wallet) = wallet_for(owner);
        assert_eq!(assert_wallet_owner(&wallet, &owner), Ok(()));
        assert_eq!(
            assert_wallet_owner(&wallet, &Pubkey::new_unique()),
            Err(TimeLockedWalletError::ConstraintHasOne.into())
        );
    }

    #[test]
    fn wallet_address() {
        let (address, wallet) = wallet_for(Pubkey::new_unique());
        assert_eq!(assert_wallet_address(&crate::id(), &wallet, &address), Ok(()));

        let (other_address, _) = wallet_for(Pubkey::new_unique());
        assert_eq!(
            assert_wallet_address(&crate::id(), &wallet, &other_address),
            Err(TimeLockedWalletError::ConstraintSeeds.into())
        );
    }
}
