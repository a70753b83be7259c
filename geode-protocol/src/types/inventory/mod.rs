pub mod action;
pub mod transaction;

pub use action::{ChangedSlots, InventorySource, NetworkInventoryAction};
pub use transaction::{
    NormalTransactionData, ReleaseItemAction, ReleaseItemTransactionData, TransactionData,
    UseItemAction, UseItemOnEntityAction, UseItemOnEntityTransactionData, UseItemTransactionData,
};
