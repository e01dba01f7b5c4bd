//! Decision logic — pure functions over the fused sensor snapshot.
//!
//! Nothing in here touches hardware or time; the
//! [`SiloService`](crate::app::service::SiloService) feeds snapshots in and
//! applies the decisions through port traits.

pub mod alert;
pub mod fan;
pub mod snapshot;
