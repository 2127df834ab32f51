use crate::token::Token;
use alloy_primitives::{Address, address};
use std::sync::Arc;

/// The default chain id (Polygon).
pub const CHAIN_ID_DEFAULT: u64 = 137;

/// Polygon's Mumbai testnet chain id.
pub const CHAIN_ID_MUMBAI: u64 = 80001;

/// The maximum number of hops to make when converting one token to another.
pub const MAX_HOPS_DEFAULT: u8 = 3;

/// The maximum number of results to retrieve when finding the best path.
pub const MAX_NUM_RESULTS_DEFAULT: usize = 1;

#[non_exhaustive]
pub struct PolygonTokenAddress;

impl PolygonTokenAddress {
    pub const WBTC: Address = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");
    pub const BNB: Address = address!("3BA4c387f786bFEE076A58914F5Bd38d668B42c3");
    pub const USDC: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    pub const USDT: Address = address!("c2132D05D31c914a87C6611C10748AEb04B58e8F");
    pub const WETH: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");
    pub const MATIC: Address = address!("0000000000000000000000000000000000001010");
}

#[non_exhaustive]
pub struct MumbaiTokenAddress;

impl MumbaiTokenAddress {
    pub const USDC: Address = address!("e11A86849d99F524cAC3E7A0Ec1241828e332C62");
    pub const MATIC: Address = address!("0000000000000000000000000000000000001010");
}

/// Default base tokens used to bridge illiquid direct pairs when finding the
/// best path. The more base tokens the more accurate the pricing.
/// Unknown chains have no default bases.
pub fn default_bases(chain_id: u64) -> Vec<Arc<Token>> {
    match chain_id {
        CHAIN_ID_DEFAULT => vec![
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::WBTC,
                Some("WBTC".to_string()),
                Some("(PoS) Wrapped BTC".to_string()),
                Some(8),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::BNB,
                Some("BNB".to_string()),
                Some("BNB (PoS)".to_string()),
                Some(18),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::USDC,
                Some("USDC".to_string()),
                Some("USD Coin (PoS)".to_string()),
                Some(6),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::USDT,
                Some("USDT".to_string()),
                Some("(PoS) Tether USD".to_string()),
                Some(6),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::WETH,
                Some("WETH".to_string()),
                Some("Wrapped Ether".to_string()),
                Some(18),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                PolygonTokenAddress::MATIC,
                Some("MATIC".to_string()),
                Some("Matic Token".to_string()),
                Some(18),
            )),
        ],
        CHAIN_ID_MUMBAI => vec![
            Arc::new(Token::new_with_data(
                chain_id,
                MumbaiTokenAddress::USDC,
                Some("USDC".to_string()),
                Some("USDC".to_string()),
                Some(6),
            )),
            Arc::new(Token::new_with_data(
                chain_id,
                MumbaiTokenAddress::MATIC,
                Some("MATIC".to_string()),
                Some("Matic Token".to_string()),
                Some(18),
            )),
        ],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bases_per_chain() {
        assert_eq!(default_bases(CHAIN_ID_DEFAULT).len(), 6);
        assert_eq!(default_bases(CHAIN_ID_MUMBAI).len(), 2);
        assert!(default_bases(1).is_empty());
    }

    #[test]
    fn test_default_bases_carry_chain_id() {
        for base in default_bases(CHAIN_ID_MUMBAI) {
            assert_eq!(base.get_chain_id(), CHAIN_ID_MUMBAI);
        }
    }
}
