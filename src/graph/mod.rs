pub mod route;
pub mod route_hash;
pub mod token_graph;

pub use route::{Route, generate_route_hash};
pub use route_hash::RouteHash;
pub use token_graph::{FastHashMap, FastHasher, PoolEdge, TokenGraph, TokenNode};
