//! A program that holds an owner's lamports until a unix timestamp
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod entrypoint;
pub mod error;
pub mod instruction;
mod pack_utils;
pub mod processor;
pub mod state;
mod validation_utils;

solana_program::declare_id!("HyhjkEEXwfRrjupW2Bq4ALpGPe2fEDTDuPKK2HVFFn6m");
