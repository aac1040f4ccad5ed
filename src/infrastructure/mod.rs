//! Infrastructure layer - HTTP clients and time sources

pub mod api_clients;
pub mod timing;

pub use api_clients::{BitcoinDataApi, ContractExplorerApi, HiroClient, MaestroClient, ReadOnlyCallResult};
pub use timing::{Clock, Pacer, SystemClock, TokioPacer};
