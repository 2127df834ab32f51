use super::route_hash::RouteHash;
use crate::pools::{PoolId, PoolWrapper};
use crate::token::Token;
use alloy_primitives::Address;
use eyre::{Result, eyre};

use sha2::digest::Update;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An ordered, non-empty sequence of pools converting an input token to an
/// output token. Consecutive pools share exactly one intermediate token and
/// no token repeats within the route.
#[derive(Clone, Debug, Default, Eq)]
pub struct Route {
    // hash of the route, stable across processes
    pub route_hash: RouteHash,
    // internal lookup for faster contains_pool
    pub pools_map: HashSet<PoolId>,
    // The token sequence of the route e.g. tokenIn -> mid -> tokenOut
    pub tokens: Vec<Arc<Token>>,
    // The pools of the route e.g. pool0 -> pool1
    pub pools: Vec<PoolWrapper>,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Route(pools={:?}, tokens={:?})",
            self.pools.iter().map(|p| format!("{:#}", p.get_address())).collect::<Vec<String>>(),
            self.tokens.iter().map(|t| format!("{:#}", t.get_address())).collect::<Vec<String>>()
        )
    }
}

impl Route {
    /// Create a route from a token sequence and the pools connecting it,
    /// validating the route invariants.
    pub fn new<T: Into<Arc<Token>>, P: Into<PoolWrapper>>(tokens: Vec<T>, pools: Vec<P>) -> Result<Self> {
        let tokens: Vec<Arc<Token>> = tokens.into_iter().map(|i| i.into()).collect();
        let pools: Vec<PoolWrapper> = pools.into_iter().map(|i| i.into()).collect();

        if pools.is_empty() || tokens.len() != pools.len() + 1 {
            return Err(eyre!("Route needs n pools and n+1 tokens, got {} and {}", pools.len(), tokens.len()));
        }

        let mut route = Route::first_hop(tokens[0].clone(), tokens[1].clone(), pools[0].clone())?;
        for (token, pool) in tokens.iter().skip(2).zip(pools.iter().skip(1)) {
            route.push_hop(token.clone(), pool.clone())?;
        }
        Ok(route)
    }

    /// Create a new route with only one hop. The pool must connect both tokens.
    pub fn first_hop(token_from: Arc<Token>, token_to: Arc<Token>, pool: PoolWrapper) -> Result<Self> {
        if token_from == token_to {
            return Err(eyre!("Route cannot start and end on the same token: {:#}", token_from.get_address()));
        }
        if pool.get_other_token(&token_from.get_address()) != Some(token_to.get_address()) {
            return Err(eyre!("Pool {} does not connect {:#} and {:#}", pool, token_from.get_address(), token_to.get_address()));
        }

        let pool_id = pool.get_pool_id();
        let tokens = vec![token_from, token_to];
        let pools = vec![pool];
        let route_hash = generate_route_hash(&tokens, &pools);

        Ok(Route { route_hash, tokens, pools, pools_map: HashSet::from([pool_id]) })
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.pools.is_empty()
    }

    pub fn tokens_count(&self) -> usize {
        self.tokens.len()
    }

    /// The hop count of the route.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// The input token of the route.
    pub fn token_in(&self) -> Option<&Arc<Token>> {
        self.tokens.first()
    }

    /// The output token of the route.
    pub fn token_out(&self) -> Option<&Arc<Token>> {
        self.tokens.last()
    }

    /// The bare ordered address path, input first and output last.
    pub fn path(&self) -> Vec<Address> {
        self.tokens.iter().map(|token| token.get_address()).collect()
    }

    /// Invert the route.
    pub fn invert(&self) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.reverse();
        let mut pools = self.pools.clone();
        pools.reverse();
        let route_hash = generate_route_hash(&tokens, &pools);

        Route { route_hash, tokens, pools, pools_map: self.pools_map.clone() }
    }

    /// Push a new pool hop to the route. The pool must connect the current
    /// last token to `token_to`, must not already be part of the route, and
    /// `token_to` must not have been visited before.
    pub fn push_hop(&mut self, token_to: Arc<Token>, pool: PoolWrapper) -> Result<&mut Self> {
        let Some(last_token) = self.tokens.last() else {
            return Err(eyre!("Route is empty"));
        };

        if pool.get_other_token(&last_token.get_address()) != Some(token_to.get_address()) {
            return Err(eyre!("Pool {} does not connect {:#} and {:#}", pool, last_token.get_address(), token_to.get_address()));
        }
        if self.pools_map.contains(&pool.get_pool_id()) {
            return Err(eyre!("Pool {} already used in route", pool));
        }
        if self.contains_token(&token_to) {
            return Err(eyre!("Token {:#} already visited in route", token_to.get_address()));
        }

        self.pools_map.insert(pool.get_pool_id());
        self.tokens.push(token_to);
        self.pools.push(pool);

        self.route_hash = generate_route_hash(&self.tokens, &self.pools);

        Ok(self)
    }

    /// Check if the route contains a pool.
    pub fn contains_pool(&self, pool: &PoolWrapper) -> bool {
        self.pools_map.contains(&pool.get_pool_id())
    }

    /// Check if the route already visits a token.
    pub fn contains_token(&self, token: &Token) -> bool {
        self.tokens.iter().any(|t| t.as_ref() == token)
    }
}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
        self.pools.hash(state);
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens && self.pools == other.pools
    }
}

/// Hash all the addresses of the tokens and pools in the route to a sha256
/// hash, to have a stable reproducible identity across processes.
pub fn generate_route_hash(tokens: &[Arc<Token>], pools: &[PoolWrapper]) -> RouteHash {
    let mut hasher = Sha256::new();

    for token in tokens.iter() {
        Update::update(&mut hasher, token.get_address().as_slice());
    }
    for pool in pools.iter() {
        Update::update(&mut hasher, pool.get_address().as_slice());
    }

    let hash_slice: [u8; 32] = hasher.finalize().into();
    RouteHash(hash_slice)
}
