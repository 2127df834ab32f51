use crate::graph::Route;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum_macros::{Display, EnumString};

/// Which side of the trade was fixed by the caller.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    ExactIn,
    ExactOut,
}

/// The priced outcome of executing a route for one fixed amount. Immutable
/// once constructed.
#[derive(Clone, Debug)]
pub struct Trade {
    pub route: Route,
    pub kind: TradeKind,
    pub input_amount: U256,
    pub output_amount: U256,
    /// Deviation of the execution price from the route's compounded pre-trade
    /// mid-price, in basis points.
    pub price_impact_bps: u64,
}

impl Trade {
    pub fn exact_in(route: Route, input_amount: U256, output_amount: U256) -> Self {
        let price_impact_bps = price_impact_exact_in(&route, input_amount, output_amount);
        Trade { route, kind: TradeKind::ExactIn, input_amount, output_amount, price_impact_bps }
    }

    pub fn exact_out(route: Route, input_amount: U256, output_amount: U256) -> Self {
        let price_impact_bps = price_impact_exact_out(&route, input_amount, output_amount);
        Trade { route, kind: TradeKind::ExactOut, input_amount, output_amount, price_impact_bps }
    }

    /// The hop count of the underlying route.
    pub fn hops(&self) -> usize {
        self.route.len()
    }

    /// Output token units received per input token unit. Reporting only,
    /// never pricing.
    pub fn execution_price(&self) -> Option<f64> {
        let token_in = self.route.token_in()?;
        let token_out = self.route.token_out()?;
        let amount_in = token_in.to_float(self.input_amount);
        if amount_in == 0f64 {
            return None;
        }
        Some(token_out.to_float(self.output_amount) / amount_in)
    }
}

impl Display for Trade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let amount_in = self.route.token_in().map(|t| t.to_float(self.input_amount)).unwrap_or_default();
        let amount_out = self.route.token_out().map(|t| t.to_float(self.output_amount)).unwrap_or_default();
        write!(
            f,
            "Trade({} {amount_in} -> {amount_out}, hops={}, impact={}bps)",
            self.kind,
            self.hops(),
            self.price_impact_bps
        )
    }
}

/// Quote `amount_in` along the route at the pre-trade mid-price (no fee, no
/// slippage), compounding each hop's reserve ratio. None when a reserve is
/// missing or the quote overflows.
fn mid_quote_out(route: &Route, amount_in: U256) -> Option<U256> {
    let mut amount = amount_in;
    for (i, pool) in route.pools.iter().enumerate() {
        let reserve_in = pool.get_reserve(&route.tokens[i].get_address())?;
        let reserve_out = pool.get_reserve(&route.tokens[i + 1].get_address())?;
        if reserve_in.is_zero() {
            return None;
        }
        amount = amount.checked_mul(reserve_out)? / reserve_in;
    }
    Some(amount)
}

/// Mirror of `mid_quote_out`: the mid-price input required for an exact output.
fn mid_quote_in(route: &Route, amount_out: U256) -> Option<U256> {
    let mut amount = amount_out;
    for (i, pool) in route.pools.iter().enumerate().rev() {
        let reserve_in = pool.get_reserve(&route.tokens[i].get_address())?;
        let reserve_out = pool.get_reserve(&route.tokens[i + 1].get_address())?;
        if reserve_out.is_zero() {
            return None;
        }
        amount = amount.checked_mul(reserve_in)? / reserve_out;
    }
    Some(amount)
}

/// `diff * 10_000 / total` without panicking; `diff` must be below `total`.
fn ratio_bps(diff: U256, total: U256) -> u64 {
    let impact = match diff.checked_mul(U256::from(10_000u64)) {
        Some(scaled) => scaled / total,
        // scale the denominator down instead when the numerator overflows
        None => diff / (total / U256::from(10_000u64) + U256::ONE),
    };
    u64::try_from(impact).unwrap_or(u64::MAX)
}

fn price_impact_exact_in(route: &Route, amount_in: U256, amount_out: U256) -> u64 {
    let Some(spot_out) = mid_quote_out(route, amount_in) else {
        return 0;
    };
    if spot_out.is_zero() || amount_out >= spot_out {
        return 0;
    }
    ratio_bps(spot_out - amount_out, spot_out)
}

fn price_impact_exact_out(route: &Route, amount_in: U256, amount_out: U256) -> u64 {
    let Some(spot_in) = mid_quote_in(route, amount_out) else {
        return 0;
    };
    if amount_in.is_zero() || spot_in >= amount_in {
        return 0;
    }
    ratio_bps(amount_in - spot_in, amount_in)
}
