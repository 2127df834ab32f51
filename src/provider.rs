use crate::pools::{CpmmPool, PoolWrapper};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Pool not found: {0}")]
    PoolNotFound(Address),
    #[error("Connectivity error: {0}")]
    Connectivity(String),
}

/// Static description of a pair contract, enough to rebuild its pool once
/// reserves are known.
#[derive(Clone, Debug)]
pub struct PairDescriptor {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
}

/// Boundary to whatever supplies live reserve data. The search itself only
/// ever sees the resulting immutable snapshot.
#[async_trait]
pub trait ReserveProvider: Sync + Send {
    async fn get_reserves(&self, pool: Address) -> Result<(U256, U256), ProviderError>;
}

/// Fetch reserves for every descriptor and assemble the pool snapshot. A pair
/// whose data cannot be obtained is dropped with a warning; the snapshot is
/// built from whatever remains.
pub async fn build_pool_snapshot<P: ReserveProvider>(provider: &P, pairs: &[PairDescriptor]) -> Vec<PoolWrapper> {
    let mut pools = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match provider.get_reserves(pair.address).await {
            Ok((reserve0, reserve1)) => {
                pools.push(PoolWrapper::from(CpmmPool::new(pair.token0, pair.token1, reserve0, reserve1, pair.address)));
            }
            Err(e) => {
                warn!("Dropping pool {:#}: {e}", pair.address);
            }
        }
    }
    debug!("Built snapshot with {}/{} pools", pools.len(), pairs.len());
    pools
}
