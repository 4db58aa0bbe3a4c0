//! curator-core
//!
//! Core building blocks for curating a catalog of subscription sources across
//! update cycles.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskDescriptor, ConfigRecord, Catalog, Origin, PatternSet, errors）
//! - **reconcile**: 純粋なルール（matcher, dedup, merge, liveness, expiry）
//! - **ports**: 外部コラボレータの抽象（PushChannel）
//! - **impls**: 実装（MemoryPushChannel, LocalPushChannel, JSON store）
//! - **app**: サイクルのドライバ（CatalogRefresher）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod reconcile;

pub use crate::app::{CatalogRefresher, RefreshOutcome, SkipReason};
pub use crate::domain::{
    AlivenessMap, Catalog, ConfigRecord, CuratorError, Origin, PatternSet, SubRef, TaskDescriptor,
    UpdateConfig,
};
