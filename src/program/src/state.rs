//! Program state
#![deny(missing_docs)]

use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};
use solana_program::{
    clock::UnixTimestamp,
    program_error::ProgramError,
    program_pack::{Pack, Sealed},
    pubkey::{Pubkey, PubkeyError},
};

use crate::error::TimeLockedWalletError;

/// Seed tag prefixed to the owner key when deriving a wallet address
pub const WALLET_SEED: &[u8] = b"wallet";

/// First 8 bytes of `sha256("account:Wallet")`
pub const WALLET_DISCRIMINATOR: [u8; 8] = [24, 89, 59, 139, 81, 154, 232, 95];

/// The size of a wallet account
pub const WALLET_ACCOUNT_SIZE: usize = DISCRIMINATOR_LEN + OWNER_LEN + RELEASE_TIME_LEN + BUMP_LEN;

const DISCRIMINATOR_LEN: usize = 8;
const OWNER_LEN: usize = 32;
const RELEASE_TIME_LEN: usize = 8;
const BUMP_LEN: usize = 1;

/// A time-locked wallet record.
///
/// The lamports held in custody are not tracked here; they are the lamports of
/// the account the record lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wallet {
    /// The only key allowed to deposit, withdraw or close
    pub owner: Pubkey,
    /// Withdrawals are rejected while the cluster clock is before this time
    pub release_time: UnixTimestamp,
    /// Bump seed found when the wallet address was derived
    pub bump: u8,
}

impl Wallet {
    /// Whether funds may leave the wallet at `now`
    pub fn is_unlocked(&self, now: UnixTimestamp) -> bool {
        now >= self.release_time
    }
}

impl Sealed for Wallet {}
impl Pack for Wallet {
    const LEN: usize = WALLET_ACCOUNT_SIZE;

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, WALLET_ACCOUNT_SIZE];
        let (discriminator_dst, owner_dst, release_time_dst, bump_dst) =
            mut_array_refs![dst, DISCRIMINATOR_LEN, OWNER_LEN, RELEASE_TIME_LEN, BUMP_LEN];

        *discriminator_dst = WALLET_DISCRIMINATOR;
        owner_dst.copy_from_slice(self.owner.as_ref());
        *release_time_dst = self.release_time.to_le_bytes();
        bump_dst[0] = self.bump;
    }

    fn unpack_from_slice(src: &[u8]) -> Result<Self, ProgramError> {
        let src = array_ref![src, 0, WALLET_ACCOUNT_SIZE];
        let (discriminator_src, owner_src, release_time_src, bump_src) =
            array_refs![src, DISCRIMINATOR_LEN, OWNER_LEN, RELEASE_TIME_LEN, BUMP_LEN];

        if *discriminator_src != WALLET_DISCRIMINATOR {
            return Err(TimeLockedWalletError::AccountDiscriminatorMismatch.into());
        }

        Ok(Wallet {
            owner: Pubkey::new_from_array(*owner_src),
            release_time: UnixTimestamp::from_le_bytes(*release_time_src),
            bump: bump_src[0],
        })
    }
}

/// Finds the wallet address of `owner` and its bump seed
pub fn find_wallet_address(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[WALLET_SEED, owner.as_ref()], program_id)
}

/// Re-derives the wallet address of `owner` from a stored bump seed
pub fn create_wallet_address(
    program_id: &Pubkey,
    owner: &Pubkey,
    bump: u8,
) -> Result<Pubkey, PubkeyError> {
    Pubkey::create_program_address(&[WALLET_SEED, owner.as_ref(), &[bump]], program_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_49_bytes() {
        assert_eq!(Wallet::LEN, 49);
    }

    #[test]
    fn packs_fields_at_fixed_offsets() {
        let owner = Pubkey::new_unique();
        let wallet = Wallet {
            owner,
            release_time: -2,
            bump: 254,
        };

        let mut data = [0u8; WALLET_ACCOUNT_SIZE];
        wallet.pack_into_slice(&mut data);

        assert_eq!(data[..8], WALLET_DISCRIMINATOR);
        assert_eq!(data[8..40], owner.to_bytes());
        assert_eq!(data[40..48], (-2i64).to_le_bytes());
        assert_eq!(data[48], 254);

        assert_eq!(Wallet::unpack_from_slice(&data).unwrap(), wallet);
    }

    #[test]
    fn rejects_foreign_discriminator() {
        let mut data = [0u8; WALLET_ACCOUNT_SIZE];
        Wallet {
            owner: Pubkey::new_unique(),
            release_time: 0,
            bump: 1,
        }
        .pack_into_slice(&mut data);
        data[0] ^= 0xff;

        assert_eq!(
            Wallet::unpack_from_slice(&data),
            Err(TimeLockedWalletError::AccountDiscriminatorMismatch.into())
        );
    }

    #[test]
    fn stored_bump_reproduces_address() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let (address, bump) = find_wallet_address(&program_id, &owner);
        assert_eq!(find_wallet_address(&program_id, &owner), (address, bump));
        assert_eq!(
            create_wallet_address(&program_id, &owner, bump).unwrap(),
            address
        );

        let other = find_wallet_address(&program_id, &Pubkey::new_unique()).0;
        assert_ne!(address, other);
    }

    #[test]
    fn unlocks_at_release_time() {
        let wallet = Wallet {
            owner: Pubkey::new_unique(),
            release_time: 1_000,
            bump: 255,
        };
        assert!(!wallet.is_unlocked(999));
        assert!(wallet.is_unlocked(1_000));
        assert!(wallet.is_unlocked(1_001));
    }
}
