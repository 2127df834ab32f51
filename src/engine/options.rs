use crate::constants::{CHAIN_ID_DEFAULT, MAX_HOPS_DEFAULT, MAX_NUM_RESULTS_DEFAULT, default_bases};
use crate::errors::RouteError;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Caller-facing best path options. All fields are optional and merged over
/// the defaults once, before any search work begins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BestPathOptions {
    pub selected_chain_id: Option<u64>,
    pub max_hops: Option<u8>,
    pub max_num_results: Option<usize>,
    /// Replaces the default base token list for the selected chain entirely.
    /// Takes precedence over `additional_bases`.
    pub bases: Option<Vec<Token>>,
    /// Appended to the default base token list for the selected chain.
    pub additional_bases: Option<Vec<Token>>,
}

/// Fully-populated configuration resolved from `BestPathOptions`. The search
/// never re-reads defaults after this point.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub chain_id: u64,
    pub max_hops: u8,
    pub max_num_results: usize,
    pub bases: Vec<Arc<Token>>,
}

impl BestPathOptions {
    pub fn resolve(&self) -> Result<SearchConfig, RouteError> {
        let chain_id = self.selected_chain_id.unwrap_or(CHAIN_ID_DEFAULT);
        let max_hops = self.max_hops.unwrap_or(MAX_HOPS_DEFAULT);
        let max_num_results = self.max_num_results.unwrap_or(MAX_NUM_RESULTS_DEFAULT);

        if max_hops == 0 {
            return Err(RouteError::InvalidConfiguration("max_hops must be positive".to_string()));
        }
        if max_num_results == 0 {
            return Err(RouteError::InvalidConfiguration("max_num_results must be positive".to_string()));
        }

        let bases = match &self.bases {
            Some(bases) => bases.iter().cloned().map(Arc::new).collect(),
            None => {
                let mut bases = default_bases(chain_id);
                if let Some(additional) = &self.additional_bases {
                    bases.extend(additional.iter().cloned().map(Arc::new));
                }
                bases
            }
        };

        Ok(SearchConfig { chain_id, max_hops, max_num_results, bases })
    }
}
