use crate::pools::pool_id::PoolId;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// A pricing failure on a single hop. These are contained within the search:
/// the offending branch is abandoned and the failure never reaches the caller.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Token not part of pool: {0}")]
    UnknownToken(Address),
}

/// A two-asset liquidity pool holding a point-in-time reserve snapshot.
/// Pools are undirected and read-only for the duration of one search.
#[typetag::serde(tag = "type")]
pub trait Pool: Sync + Send {
    fn get_address(&self) -> Address;

    fn get_pool_id(&self) -> PoolId;

    /// The proportional trading fee as (numerator, denominator).
    fn get_fee(&self) -> (u32, u32);

    fn get_tokens(&self) -> Vec<Address>;

    fn get_swap_directions(&self) -> Vec<(Address, Address)>;

    /// Current reserve of the given token, or None if the token is not part of the pool.
    fn get_reserve(&self, token: &Address) -> Option<U256>;

    /// A pool is usable only when both reserves are positive.
    fn has_liquidity(&self) -> bool;

    /// Output amount for an exact input, fee deducted from the input, truncating.
    fn calculate_out_amount(&self, token_in: &Address, amount_in: U256) -> Result<U256, CalculationError>;

    /// Minimum input amount for an exact output, rounded up so the pool
    /// invariant is never violated in the caller's favor.
    fn calculate_in_amount(&self, token_out: &Address, amount_out: U256) -> Result<U256, CalculationError>;
}

#[derive(Serialize, Deserialize)]
pub struct PoolWrapper {
    pub pool: Arc<dyn Pool>,
}

impl PartialOrd for PoolWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for PoolWrapper {}

impl Ord for PoolWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get_pool_id().cmp(&other.get_pool_id())
    }
}

impl Display for PoolWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (fee_numerator, fee_denominator) = self.get_fee();
        write!(f, "Pool(fee={fee_numerator}/{fee_denominator})@{}", self.get_pool_id())
    }
}

impl Debug for PoolWrapper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl Hash for PoolWrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get_pool_id().hash(state)
    }
}

impl PartialEq for PoolWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.pool.get_pool_id() == other.pool.get_pool_id()
    }
}

impl PoolWrapper {
    pub fn new(pool: Arc<dyn Pool>) -> Self {
        PoolWrapper { pool }
    }

    /// The other token of the pool, given one of its two tokens.
    pub fn get_other_token(&self, token: &Address) -> Option<Address> {
        let tokens = self.get_tokens();
        match tokens.as_slice() {
            [token0, token1] if token0 == token => Some(*token1),
            [token0, token1] if token1 == token => Some(*token0),
            _ => None,
        }
    }
}

impl Clone for PoolWrapper {
    fn clone(&self) -> Self {
        Self { pool: self.pool.clone() }
    }
}

impl Deref for PoolWrapper {
    type Target = dyn Pool;

    fn deref(&self) -> &Self::Target {
        self.pool.deref()
    }
}

impl<T: 'static + Pool + Clone> From<T> for PoolWrapper {
    fn from(pool: T) -> Self {
        Self { pool: Arc::new(pool) }
    }
}
