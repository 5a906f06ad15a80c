//! Core relay logic for Parley.
//!
//! Defines the seams — [`store::MessageStore`] for persistence and
//! [`upstream::UpstreamProvider`] for the remote chat API — plus the
//! transcript builder and the [`relay::RelayService`] orchestrator that ties
//! them together. Concrete implementations live in `parley-infra`.

pub mod relay;
pub mod store;
pub mod transcript;
pub mod upstream;

#[cfg(test)]
pub(crate) mod testsupport;
