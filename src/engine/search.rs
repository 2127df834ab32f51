use crate::engine::options::{BestPathOptions, SearchConfig};
use crate::engine::trade::Trade;
use crate::errors::RouteError;
use crate::graph::{Route, TokenGraph};
use crate::pools::PoolWrapper;
use crate::token::Token;
use alloy_primitives::{Address, U256};
use petgraph::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

/// Cooperative cancellation signal, checked between node expansions. A
/// cancelled search stops promptly and discards partial results.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// State of the depth-first search over the token graph.
#[derive(Debug)]
struct SearchState {
    node: NodeIndex<usize>,
    route: Route,
    // exact-in: output accumulated so far; exact-out: input required so far
    amount: U256,
    hops: u8,
}

/// Find the best trades converting an exact `amount_in` of `token_in` into
/// `token_out`, best first. An empty result means no route exists; it is not
/// an error.
pub fn best_trade_exact_in(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_in: U256,
    options: &BestPathOptions,
) -> Result<Vec<Trade>, RouteError> {
    best_trade_exact_in_with_cancel(pools, token_in, token_out, amount_in, options, &CancelToken::new())
}

pub fn best_trade_exact_in_with_cancel(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_in: U256,
    options: &BestPathOptions,
    cancel: &CancelToken,
) -> Result<Vec<Trade>, RouteError> {
    let config = validate_request(token_in, token_out, amount_in, options)?;

    let graph = build_search_graph(pools, token_in, token_out, &config);
    let (Some(start), Some(target)) = (graph.node_index(&token_in.get_address()), graph.node_index(&token_out.get_address()))
    else {
        return Ok(vec![]);
    };

    let mut candidates: Vec<Trade> = Vec::new();
    let mut stack: VecDeque<SearchState> = VecDeque::new();
    stack.push_back(SearchState { node: start, route: Route::default(), amount: amount_in, hops: 0 });

    while let Some(SearchState { node, route, amount, hops }) = stack.pop_back() {
        if cancel.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        let current_token = if route.is_empty() { token_in.clone() } else { route.tokens.last().cloned().unwrap_or_default() };
        let current_address = current_token.get_address();

        for edge in graph.graph.edges(node) {
            let Some(to_token) = graph.token_by_node(edge.target()) else {
                continue;
            };
            let is_target = edge.target() == target;
            // no token cycles within one route
            if !is_target && (route.contains_token(to_token) || to_token.as_ref() == token_in.as_ref()) {
                continue;
            }

            for pool_edge in edge.weight().values() {
                if !pool_edge.is_active {
                    continue;
                }
                // no pool reused within one route
                if route.contains_pool(&pool_edge.inner) {
                    continue;
                }

                // A hop that fails pricing is abandoned silently.
                let hop_out = match pool_edge.inner.calculate_out_amount(&current_address, amount) {
                    Ok(out) => out,
                    Err(e) => {
                        trace!("Pruned hop via {}: {e}", pool_edge.inner);
                        continue;
                    }
                };

                let new_route = if route.is_empty() {
                    match Route::first_hop(current_token.clone(), to_token.clone(), pool_edge.inner.clone()) {
                        Ok(first) => first,
                        Err(_) => continue,
                    }
                } else {
                    let mut extended = route.clone();
                    if extended.push_hop(to_token.clone(), pool_edge.inner.clone()).is_err() {
                        continue;
                    }
                    extended
                };

                if is_target {
                    candidates.push(Trade::exact_in(new_route, amount_in, hop_out));
                } else if hops + 1 < config.max_hops {
                    stack.push_back(SearchState { node: edge.target(), route: new_route, amount: hop_out, hops: hops + 1 });
                }
            }
        }
    }

    debug!("Exact-in search found {} candidate routes", candidates.len());

    // best first: larger output, then fewer hops; the stable sort keeps
    // discovery order among full ties for reproducibility
    candidates.sort_by(|a, b| b.output_amount.cmp(&a.output_amount).then(a.hops().cmp(&b.hops())));
    candidates.truncate(config.max_num_results);
    Ok(candidates)
}

/// Find the best trades producing an exact `amount_out` of `token_out` from
/// `token_in`, best first (smallest required input).
pub fn best_trade_exact_out(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_out: U256,
    options: &BestPathOptions,
) -> Result<Vec<Trade>, RouteError> {
    best_trade_exact_out_with_cancel(pools, token_in, token_out, amount_out, options, &CancelToken::new())
}

pub fn best_trade_exact_out_with_cancel(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_out: U256,
    options: &BestPathOptions,
    cancel: &CancelToken,
) -> Result<Vec<Trade>, RouteError> {
    let config = validate_request(token_in, token_out, amount_out, options)?;

    let graph = build_search_graph(pools, token_in, token_out, &config);
    let (Some(start), Some(target)) = (graph.node_index(&token_out.get_address()), graph.node_index(&token_in.get_address()))
    else {
        return Ok(vec![]);
    };

    // Walk backwards from the output token; routes are built reversed and
    // inverted once they reach the input token.
    let mut candidates: Vec<Trade> = Vec::new();
    let mut stack: VecDeque<SearchState> = VecDeque::new();
    stack.push_back(SearchState { node: start, route: Route::default(), amount: amount_out, hops: 0 });

    while let Some(SearchState { node, route, amount, hops }) = stack.pop_back() {
        if cancel.is_cancelled() {
            return Err(RouteError::Cancelled);
        }

        let current_token = if route.is_empty() { token_out.clone() } else { route.tokens.last().cloned().unwrap_or_default() };
        let current_address = current_token.get_address();

        for edge in graph.graph.edges(node) {
            let Some(to_token) = graph.token_by_node(edge.target()) else {
                continue;
            };
            let is_target = edge.target() == target;
            if !is_target && (route.contains_token(to_token) || to_token.as_ref() == token_out.as_ref()) {
                continue;
            }

            for pool_edge in edge.weight().values() {
                if !pool_edge.is_active {
                    continue;
                }
                if route.contains_pool(&pool_edge.inner) {
                    continue;
                }

                // required input of the neighbor token for `amount` of the current token
                let hop_in = match pool_edge.inner.calculate_in_amount(&current_address, amount) {
                    Ok(amount_in) => amount_in,
                    Err(e) => {
                        trace!("Pruned hop via {}: {e}", pool_edge.inner);
                        continue;
                    }
                };

                let new_route = if route.is_empty() {
                    match Route::first_hop(current_token.clone(), to_token.clone(), pool_edge.inner.clone()) {
                        Ok(first) => first,
                        Err(_) => continue,
                    }
                } else {
                    let mut extended = route.clone();
                    if extended.push_hop(to_token.clone(), pool_edge.inner.clone()).is_err() {
                        continue;
                    }
                    extended
                };

                if is_target {
                    candidates.push(Trade::exact_out(new_route.invert(), hop_in, amount_out));
                } else if hops + 1 < config.max_hops {
                    stack.push_back(SearchState { node: edge.target(), route: new_route, amount: hop_in, hops: hops + 1 });
                }
            }
        }
    }

    debug!("Exact-out search found {} candidate routes", candidates.len());

    candidates.sort_by(|a, b| a.input_amount.cmp(&b.input_amount).then(a.hops().cmp(&b.hops())));
    candidates.truncate(config.max_num_results);
    Ok(candidates)
}

fn validate_request(
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount: U256,
    options: &BestPathOptions,
) -> Result<SearchConfig, RouteError> {
    let config = options.resolve()?;
    if amount.is_zero() {
        return Err(RouteError::InvalidConfiguration("amount must be positive".to_string()));
    }
    if token_in.as_ref() == token_out.as_ref() {
        return Err(RouteError::InvalidConfiguration("token_in and token_out must differ".to_string()));
    }
    Ok(config)
}

/// Build the traversal graph from the supplied pool snapshot. Only pools
/// whose both endpoints are the input token, the output token, or a member
/// of the effective base set are eligible; zero-reserve pools are excluded.
fn build_search_graph(pools: &[PoolWrapper], token_in: &Arc<Token>, token_out: &Arc<Token>, config: &SearchConfig) -> TokenGraph {
    let mut graph = TokenGraph::new();
    graph.add_or_get_token_idx_by_token(token_in.clone());
    graph.add_or_get_token_idx_by_token(token_out.clone());
    for base in &config.bases {
        graph.add_or_get_token_idx_by_token(base.clone());
    }

    let allowed: HashSet<Address> = graph.tokens.keys().copied().collect();

    for pool in pools {
        let tokens = pool.get_tokens();
        if !tokens.iter().all(|token| allowed.contains(token)) {
            trace!("Skipping pool {} outside the base set", pool);
            continue;
        }
        if !pool.has_liquidity() {
            debug!("Skipping pool {} without liquidity", pool);
            continue;
        }
        if let Err(e) = graph.add_pool(pool.clone()) {
            debug!("Skipping pool {}: {e}", pool);
        }
    }

    graph
}
