use crate::pools::pool::{CalculationError, Pool};
use crate::pools::pool_id::PoolId;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Uniswap-V2 style 0.3% fee.
pub const DEFAULT_FEE_NUMERATOR: u32 = 3;
pub const DEFAULT_FEE_DENOMINATOR: u32 = 1000;

/// Constant-product pool with a fixed reserve snapshot. All pricing is done
/// in unbounded integer arithmetic; no floating point is used anywhere so
/// rounding direction stays unambiguous.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CpmmPool {
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
    pub fee_numerator: u32,
    pub fee_denominator: u32,
    pub address: Address,
}

impl CpmmPool {
    pub fn new(token0: Address, token1: Address, reserve0: U256, reserve1: U256, address: Address) -> Self {
        Self::with_fee(token0, token1, reserve0, reserve1, DEFAULT_FEE_NUMERATOR, DEFAULT_FEE_DENOMINATOR, address)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_fee(
        token0: Address,
        token1: Address,
        reserve0: U256,
        reserve1: U256,
        fee_numerator: u32,
        fee_denominator: u32,
        address: Address,
    ) -> Self {
        Self { token0, token1, reserve0, reserve1, fee_numerator, fee_denominator, address }
    }

    /// Returns (reserve of `token`, reserve of the other token).
    fn reserves_for(&self, token: &Address) -> Result<(U256, U256), CalculationError> {
        if *token == self.token0 {
            Ok((self.reserve0, self.reserve1))
        } else if *token == self.token1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(CalculationError::UnknownToken(*token))
        }
    }

    fn fee_kept(&self) -> U256 {
        U256::from(self.fee_denominator - self.fee_numerator)
    }
}

#[typetag::serde]
impl Pool for CpmmPool {
    fn get_address(&self) -> Address {
        self.address
    }

    fn get_pool_id(&self) -> PoolId {
        PoolId::Address(self.address)
    }

    fn get_fee(&self) -> (u32, u32) {
        (self.fee_numerator, self.fee_denominator)
    }

    fn get_tokens(&self) -> Vec<Address> {
        vec![self.token0, self.token1]
    }

    fn get_swap_directions(&self) -> Vec<(Address, Address)> {
        vec![(self.token0, self.token1), (self.token1, self.token0)]
    }

    fn get_reserve(&self, token: &Address) -> Option<U256> {
        self.reserves_for(token).ok().map(|(reserve, _)| reserve)
    }

    fn has_liquidity(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }

    fn calculate_out_amount(&self, token_in: &Address, amount_in: U256) -> Result<U256, CalculationError> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(CalculationError::InsufficientLiquidity);
        }

        let amount_in_with_fee = amount_in.checked_mul(self.fee_kept()).ok_or(CalculationError::Overflow)?;
        let numerator = amount_in_with_fee.checked_mul(reserve_out).ok_or(CalculationError::Overflow)?;
        let denominator = reserve_in
            .checked_mul(U256::from(self.fee_denominator))
            .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
            .ok_or(CalculationError::Overflow)?;

        let amount_out = numerator / denominator;
        if amount_out >= reserve_out {
            return Err(CalculationError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }

    fn calculate_in_amount(&self, token_out: &Address, amount_out: U256) -> Result<U256, CalculationError> {
        let (reserve_out, reserve_in) = self.reserves_for(token_out)?;
        if amount_out.is_zero() || reserve_in.is_zero() || amount_out >= reserve_out {
            return Err(CalculationError::InsufficientLiquidity);
        }

        let numerator = reserve_in
            .checked_mul(amount_out)
            .and_then(|product| product.checked_mul(U256::from(self.fee_denominator)))
            .ok_or(CalculationError::Overflow)?;
        let denominator = (reserve_out - amount_out).checked_mul(self.fee_kept()).ok_or(CalculationError::Overflow)?;

        // Ceiling division so the quoted input always satisfies the invariant.
        (numerator / denominator).checked_add(U256::ONE).ok_or(CalculationError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weth_usdc_pool() -> CpmmPool {
        // 10 WETH (18 decimals) vs 30_000 USDC (6 decimals), 0.3% fee
        CpmmPool::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            U256::from(10u64) * U256::from(10u64).pow(U256::from(18u64)),
            U256::from(30_000u64) * U256::from(10u64).pow(U256::from(6u64)),
            Address::repeat_byte(3),
        )
    }

    #[test]
    fn test_out_amount_known_value() {
        let pool = weth_usdc_pool();
        let one_weth = U256::from(10u64).pow(U256::from(18u64));

        let out = pool.calculate_out_amount(&Address::repeat_byte(1), one_weth).unwrap();

        // (1e18 * 997 * 3e10) / (10e18 * 1000 + 1e18 * 997), truncated
        assert_eq!(out, U256::from(2_719_832_681u64));
    }

    #[test]
    fn test_in_amount_rounds_up() {
        let pool = weth_usdc_pool();
        let desired_out = U256::from(2_719_832_681u64);

        let required_in = pool.calculate_in_amount(&Address::repeat_byte(2), desired_out).unwrap();

        // The inverse quote must always satisfy the invariant: feeding it
        // forward produces at least the desired output.
        let out_for_required = pool.calculate_out_amount(&Address::repeat_byte(1), required_in).unwrap();
        assert!(out_for_required >= desired_out);
    }

    #[test]
    fn test_round_trip_never_creates_value() {
        let pool = weth_usdc_pool();
        for raw_amount in [1_000_000_000_000u64, 123_456_789_000_000_000, 10u64.pow(18)] {
            let amount_in = U256::from(raw_amount);
            let Ok(out) = pool.calculate_out_amount(&Address::repeat_byte(1), amount_in) else {
                continue;
            };
            if out.is_zero() {
                continue;
            }
            // swap back the whole output in the reverse direction
            let cycled = pool.calculate_out_amount(&Address::repeat_byte(2), out).unwrap();
            assert!(cycled < amount_in, "round trip created value: {cycled} >= {amount_in}");
        }
    }

    #[test]
    fn test_zero_amount_is_insufficient_liquidity() {
        let pool = weth_usdc_pool();
        assert_eq!(
            pool.calculate_out_amount(&Address::repeat_byte(1), U256::ZERO),
            Err(CalculationError::InsufficientLiquidity)
        );
        assert_eq!(
            pool.calculate_in_amount(&Address::repeat_byte(2), U256::ZERO),
            Err(CalculationError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_output_exceeding_reserve_is_insufficient_liquidity() {
        let pool = weth_usdc_pool();
        let whole_reserve = U256::from(30_000u64) * U256::from(10u64).pow(U256::from(6u64));
        assert_eq!(
            pool.calculate_in_amount(&Address::repeat_byte(2), whole_reserve),
            Err(CalculationError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_zero_reserve_pool_has_no_liquidity() {
        let pool = CpmmPool::new(
            Address::repeat_byte(1),
            Address::repeat_byte(2),
            U256::ZERO,
            U256::from(1_000u64),
            Address::repeat_byte(3),
        );
        assert!(!pool.has_liquidity());
        assert_eq!(
            pool.calculate_out_amount(&Address::repeat_byte(2), U256::from(10u64)),
            Err(CalculationError::InsufficientLiquidity)
        );
    }

    #[test]
    fn test_unknown_token() {
        let pool = weth_usdc_pool();
        assert_eq!(
            pool.calculate_out_amount(&Address::repeat_byte(9), U256::from(1u64)),
            Err(CalculationError::UnknownToken(Address::repeat_byte(9)))
        );
    }
}
