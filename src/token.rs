use crate::constants::CHAIN_ID_DEFAULT;
use alloy_primitives::utils::Unit;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::default::Default;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An ERC20-style token on a specific network. Two tokens are the same entity
/// iff chain id and address match; symbol, name and decimals are descriptive only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    chain_id: u64,
    address: Address,
    decimals: u8,
    name: Option<String>,
    symbol: Option<String>,
}

pub type TokenWrapper = Arc<Token>;

impl Default for Token {
    fn default() -> Self {
        Token { chain_id: CHAIN_ID_DEFAULT, address: Address::ZERO, decimals: 18, name: None, symbol: None }
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chain_id.cmp(&other.chain_id).then(self.address.cmp(&other.address))
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Token {
    pub fn new(chain_id: u64, address: Address) -> Token {
        Token { chain_id, address, ..Token::default() }
    }

    pub fn new_with_data(
        chain_id: u64,
        address: Address,
        symbol: Option<String>,
        name: Option<String>,
        decimals: Option<u8>,
    ) -> Token {
        Token { chain_id, address, symbol, name, decimals: decimals.unwrap_or(18) }
    }

    // For testing purposes
    pub fn random() -> Token {
        Token::new(CHAIN_ID_DEFAULT, Address::random())
    }

    // For testing purposes
    pub fn repeat_byte(byte: u8) -> Token {
        Token::new(CHAIN_ID_DEFAULT, Address::repeat_byte(byte))
    }

    pub fn get_chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn get_symbol(&self) -> String {
        self.symbol.clone().unwrap_or(self.address.to_string())
    }

    pub fn get_name(&self) -> String {
        self.name.clone().unwrap_or(self.address.to_string())
    }

    pub fn get_decimals(&self) -> u8 {
        self.decimals
    }

    pub fn get_exp(&self) -> U256 {
        if self.decimals == 18 { Unit::ETHER.wei() } else { U256::from(10).pow(U256::from(self.decimals)) }
    }

    pub fn get_address(&self) -> Address {
        self.address
    }

    /// Lossy conversion of a raw amount to token units. Reporting only, never pricing.
    pub fn to_float(&self, value: U256) -> f64 {
        if self.decimals == 0 {
            // raw amount and token units coincide
            u64::try_from(value).map(|v| v as f64).unwrap_or(0f64)
        } else {
            let divider = self.get_exp();
            let ret = value.div_rem(divider);

            let div = u64::try_from(ret.0);
            let rem = u64::try_from(ret.1);

            if div.is_err() || rem.is_err() {
                0f64
            } else {
                div.unwrap_or_default() as f64 + ((rem.unwrap_or_default() as f64) / (10u64.pow(self.decimals as u32) as f64))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::PolygonTokenAddress;

    #[test]
    fn test_identity_is_chain_and_address() {
        let weth = Token::new_with_data(137, PolygonTokenAddress::WETH, Some("WETH".to_string()), None, Some(18));
        let same_address_other_name =
            Token::new_with_data(137, PolygonTokenAddress::WETH, Some("WETH9".to_string()), Some("Wrapped Ether".to_string()), Some(6));
        let other_chain = Token::new_with_data(80001, PolygonTokenAddress::WETH, Some("WETH".to_string()), None, Some(18));

        assert_eq!(weth, same_address_other_name);
        assert_ne!(weth, other_chain);
    }

    #[test]
    fn test_serialize() {
        let weth_token = Token::new_with_data(137, PolygonTokenAddress::WETH, Some("WETH".to_string()), None, Some(18));

        let serialized = serde_json::to_string(&weth_token).unwrap();
        assert_eq!(
            serialized,
            "{\"chain_id\":137,\"address\":\"0x7ceb23fd6bc0add59e62ac25578270cff1b9f619\",\"decimals\":18,\"name\":null,\"symbol\":\"WETH\"}"
        );
    }

    #[test]
    fn test_to_float() {
        let usdc = Token::new_with_data(137, PolygonTokenAddress::USDC, Some("USDC".to_string()), None, Some(6));
        assert_eq!(usdc.to_float(U256::from(1_500_000u64)), 1.5);
    }

    #[test]
    fn test_to_float_zero_decimals() {
        let whole = Token::new_with_data(137, PolygonTokenAddress::USDT, Some("NFT".to_string()), None, Some(0));
        assert_eq!(whole.to_float(U256::from(5u64)), 5.0);
    }
}
