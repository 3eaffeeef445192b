//! Money movement services
//!
//! The services own the validate-then-mutate step: they run the
//! transaction's validation and, only on success, apply the balance
//! mutations. Business-rule rejections come back as failure results,
//! never as errors.

pub mod transfer;
pub mod withdrawal;

pub use transfer::TransferService;
pub use withdrawal::WithdrawalService;
