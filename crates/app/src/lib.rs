//! Crumb storefront client: persisted stores, storefront API services and the
//! checkout orchestrator.

pub mod api;
pub mod checkout;
pub mod context;
pub mod domain;
pub mod gateway;
pub mod storage;
pub mod stores;

#[cfg(test)]
mod test;
