use crate::pools::{PoolId, PoolWrapper};
use crate::token::Token;
use ahash::RandomState;
use alloy_primitives::Address;
use eyre::eyre;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::sync::Arc;

pub type FastHasher = RandomState;
/// FastHashMap using ahash
pub type FastHashMap<K, V> = HashMap<K, V, FastHasher>;

/// Undirected multigraph of tokens (nodes) and pools (edges). An edge holds
/// every pool connecting the same token pair, keyed by pool id in a BTreeMap
/// so traversal order is deterministic and results are reproducible.
#[derive(Debug, Clone, Default)]
pub struct TokenGraph {
    pub graph: UnGraph<TokenNode, BTreeMap<PoolId, PoolEdge>, usize>,
    // pool id -> pool
    pub pools: HashMap<PoolId, PoolWrapper>,
    // token_address -> token (Keep reference for fast access of token details)
    pub tokens: HashMap<Address, Arc<Token>>,
    // token -> node index
    pub token_index: FastHashMap<Address, NodeIndex<usize>>,
    // pool -> edge index (an edge is a map of pools sharing the token pair)
    pub pool_index: FastHashMap<PoolId, EdgeIndex<usize>>,
}

impl TokenGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            pools: HashMap::new(),
            tokens: HashMap::default(),
            token_index: FastHashMap::default(),
            pool_index: FastHashMap::default(),
        }
    }

    /// Enable or disable a pool without removing it from the graph. Disabled
    /// pools are skipped during traversal.
    pub fn set_pool_active(&mut self, pool_id: PoolId, is_active: bool) -> eyre::Result<()> {
        if let Some(edge_index) = self.pool_index.get(&pool_id) {
            let Some(edge) = self.graph.edge_weight_mut(*edge_index) else {
                return Err(eyre!("Edge not found in graph: {:?}", pool_id));
            };
            let Some(pool) = edge.get_mut(&pool_id) else {
                return Err(eyre!("Pool not found in edge: {:?}", pool_id));
            };
            pool.is_active = is_active;
        } else {
            return Err(eyre!("Pool not found in graph: {:?}", pool_id));
        }
        Ok(())
    }

    pub fn add_or_get_token_idx_by_token(&mut self, arc_token: Arc<Token>) -> NodeIndex<usize> {
        *self.token_index.entry(arc_token.get_address()).or_insert_with(|| {
            let node = TokenNode::new(arc_token.clone());
            let idx = self.graph.add_node(node);
            self.tokens.insert(arc_token.get_address(), arc_token);
            idx
        })
    }

    /// Add a new pool as an edge to the graph. Both of its tokens must have
    /// been registered before.
    pub fn add_pool<T: Into<PoolWrapper>>(&mut self, pool: T) -> eyre::Result<()> {
        let pool_wrapper = pool.into();
        let pool_edge = PoolEdge::new(pool_wrapper.clone());

        let swap_directions = pool_wrapper.get_swap_directions();

        for (from_token, to_token) in swap_directions {
            let node_from = self.token_index.get(&from_token).ok_or_else(|| eyre!("Token not found in graph: {:?}", from_token))?;
            let node_to = self.token_index.get(&to_token).ok_or_else(|| eyre!("Token not found in graph: {:?}", to_token))?;

            if let Some(edge_index) = self.graph.find_edge(*node_from, *node_to) {
                let pools = self.graph.edge_weight_mut(edge_index).ok_or_else(|| eyre!("Edge weight missing: {:?}", edge_index))?;
                if pools.contains_key(&pool_wrapper.get_pool_id()) {
                    continue;
                }
                pools.insert(pool_wrapper.get_pool_id(), pool_edge.clone());
                self.pool_index.insert(pool_wrapper.get_pool_id(), edge_index);
            } else {
                let mut pools = BTreeMap::new();
                pools.insert(pool_wrapper.get_pool_id(), pool_edge.clone());
                let edge_index = self.graph.add_edge(*node_from, *node_to, pools);
                self.pool_index.insert(pool_wrapper.get_pool_id(), edge_index);
            }
        }

        self.pools.insert(pool_wrapper.get_pool_id(), pool_wrapper);

        Ok(())
    }

    pub fn node_index(&self, address: &Address) -> Option<NodeIndex<usize>> {
        self.token_index.get(address).copied()
    }

    pub fn token_by_node(&self, node: NodeIndex<usize>) -> Option<&Arc<Token>> {
        self.graph.node_weight(node).map(|n| &n.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenNode {
    pub token: Arc<Token>,
}

impl Display for TokenNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.token.get_address())
    }
}

impl TokenNode {
    pub fn new(token: Arc<Token>) -> Self {
        Self { token }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolEdge {
    pub is_active: bool,
    pub inner: PoolWrapper,
}

impl Display for PoolEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.inner.get_address())
    }
}

impl PoolEdge {
    pub fn new(pool_wrapper: PoolWrapper) -> Self {
        Self { is_active: true, inner: pool_wrapper }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::CpmmPool;
    use alloy_primitives::U256;

    fn pool_between(token0: &Token, token1: &Token, address: Address) -> PoolWrapper {
        PoolWrapper::from(CpmmPool::new(
            token0.get_address(),
            token1.get_address(),
            U256::from(1_000u64),
            U256::from(1_000u64),
            address,
        ))
    }

    #[test]
    fn test_add_pool() -> eyre::Result<()> {
        let token1 = Arc::new(Token::random());
        let token2 = Arc::new(Token::random());

        let mut token_graph = TokenGraph::new();
        token_graph.add_or_get_token_idx_by_token(token1.clone());
        token_graph.add_or_get_token_idx_by_token(token2.clone());

        let pool = pool_between(&token1, &token2, Address::repeat_byte(9));
        token_graph.add_pool(pool.clone())?;

        assert_eq!(token_graph.graph.node_count(), 2);
        assert_eq!(token_graph.graph.edge_count(), 1);
        assert!(token_graph.pools.contains_key(&pool.get_pool_id()));

        Ok(())
    }

    #[test]
    fn test_parallel_pools_share_one_edge() -> eyre::Result<()> {
        let token1 = Arc::new(Token::random());
        let token2 = Arc::new(Token::random());

        let mut token_graph = TokenGraph::new();
        token_graph.add_or_get_token_idx_by_token(token1.clone());
        token_graph.add_or_get_token_idx_by_token(token2.clone());

        token_graph.add_pool(pool_between(&token1, &token2, Address::repeat_byte(8)))?;
        token_graph.add_pool(pool_between(&token1, &token2, Address::repeat_byte(9)))?;

        assert_eq!(token_graph.graph.edge_count(), 1);
        let edge_index = token_graph.graph.find_edge(
            token_graph.node_index(&token1.get_address()).unwrap(),
            token_graph.node_index(&token2.get_address()).unwrap(),
        );
        let pools = token_graph.graph.edge_weight(edge_index.unwrap()).unwrap();
        assert_eq!(pools.len(), 2);

        Ok(())
    }

    #[test]
    fn test_add_pool_with_unknown_token_fails() {
        let token1 = Arc::new(Token::random());
        let token2 = Arc::new(Token::random());

        let mut token_graph = TokenGraph::new();
        token_graph.add_or_get_token_idx_by_token(token1.clone());
        // token2 never registered

        let result = token_graph.add_pool(pool_between(&token1, &token2, Address::repeat_byte(9)));
        assert!(result.is_err());
    }

    #[test]
    fn test_set_pool_active() -> eyre::Result<()> {
        let token1 = Arc::new(Token::random());
        let token2 = Arc::new(Token::random());

        let mut token_graph = TokenGraph::new();
        token_graph.add_or_get_token_idx_by_token(token1.clone());
        token_graph.add_or_get_token_idx_by_token(token2.clone());

        let pool = pool_between(&token1, &token2, Address::repeat_byte(9));
        token_graph.add_pool(pool.clone())?;

        token_graph.set_pool_active(pool.get_pool_id(), false)?;
        let edge_index = token_graph.pool_index.get(&pool.get_pool_id()).unwrap();
        let edge = token_graph.graph.edge_weight(*edge_index).unwrap();
        assert!(!edge.get(&pool.get_pool_id()).unwrap().is_active);

        assert!(token_graph.set_pool_active(PoolId::Address(Address::repeat_byte(7)), false).is_err());

        Ok(())
    }
}
