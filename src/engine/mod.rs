pub mod options;
pub mod search;
pub mod trade;

pub use options::{BestPathOptions, SearchConfig};
pub use search::{
    CancelToken, best_trade_exact_in, best_trade_exact_in_with_cancel, best_trade_exact_out,
    best_trade_exact_out_with_cancel,
};
pub use trade::{Trade, TradeKind};

use crate::errors::RouteError;
use crate::pools::PoolWrapper;
use crate::token::Token;
use alloy_primitives::{Address, U256};
use std::sync::Arc;

/// Address-level view of the best exact-in route: the token addresses along
/// the winning route, input first. Empty when no route exists.
pub fn find_best_path_exact_in(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_in: U256,
    options: &BestPathOptions,
) -> Result<Vec<Address>, RouteError> {
    let trades = best_trade_exact_in(pools, token_in, token_out, amount_in, options)?;
    Ok(trades.first().map(|trade| trade.route.path()).unwrap_or_default())
}

/// Address-level view of the best exact-out route, input first.
pub fn find_best_path_exact_out(
    pools: &[PoolWrapper],
    token_in: &Arc<Token>,
    token_out: &Arc<Token>,
    amount_out: U256,
    options: &BestPathOptions,
) -> Result<Vec<Address>, RouteError> {
    let trades = best_trade_exact_out(pools, token_in, token_out, amount_out, options)?;
    Ok(trades.first().map(|trade| trade.route.path()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHAIN_ID_DEFAULT;
    use crate::pools::CpmmPool;

    fn token(byte: u8, symbol: &str) -> Arc<Token> {
        Arc::new(Token::new_with_data(
            CHAIN_ID_DEFAULT,
            Address::repeat_byte(byte),
            Some(symbol.to_string()),
            None,
            Some(18),
        ))
    }

    fn eth(units: u64) -> U256 {
        U256::from(units) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_find_best_path_returns_addresses() -> Result<(), RouteError> {
        let token_a = token(1, "AAA");
        let token_b = token(2, "BBB");
        let weth = token(3, "WETH");

        let pools = vec![
            PoolWrapper::from(CpmmPool::new(
                token_a.get_address(),
                weth.get_address(),
                eth(1_000),
                eth(1_000),
                Address::repeat_byte(5),
            )),
            PoolWrapper::from(CpmmPool::new(
                weth.get_address(),
                token_b.get_address(),
                eth(1_000),
                eth(1_000),
                Address::repeat_byte(6),
            )),
        ];

        let options = BestPathOptions {
            bases: Some(vec![weth.as_ref().clone()]),
            ..BestPathOptions::default()
        };
        let path = find_best_path_exact_in(&pools, &token_a, &token_b, eth(1), &options)?;
        assert_eq!(path, vec![token_a.get_address(), weth.get_address(), token_b.get_address()]);

        let path = find_best_path_exact_out(&pools, &token_a, &token_b, eth(1), &options)?;
        assert_eq!(path, vec![token_a.get_address(), weth.get_address(), token_b.get_address()]);

        Ok(())
    }

    #[test]
    fn test_find_best_path_empty_when_unroutable() -> Result<(), RouteError> {
        let token_a = token(1, "AAA");
        let token_b = token(2, "BBB");

        let options = BestPathOptions { bases: Some(vec![]), ..BestPathOptions::default() };
        let path = find_best_path_exact_in(&[], &token_a, &token_b, eth(1), &options)?;
        assert!(path.is_empty());

        Ok(())
    }
}
