pub mod config_loader;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod pools;
pub mod provider;
pub mod token;

pub use engine::{
    BestPathOptions, CancelToken, SearchConfig, Trade, TradeKind, best_trade_exact_in,
    best_trade_exact_in_with_cancel, best_trade_exact_out, best_trade_exact_out_with_cancel,
    find_best_path_exact_in, find_best_path_exact_out,
};
pub use errors::RouteError;
pub use graph::{Route, RouteHash, TokenGraph};
pub use pools::{CalculationError, CpmmPool, Pool, PoolId, PoolWrapper};
pub use provider::{PairDescriptor, ProviderError, ReserveProvider, build_pool_snapshot};
pub use token::{Token, TokenWrapper};
