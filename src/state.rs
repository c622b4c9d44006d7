use crate::config::settings::AppConfig;
use crate::middleware::origin::OriginGate;
use crate::modules::movie::repository::MovieStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub movies: MovieStore,
    pub origins: OriginGate,
}

impl AppState {
    pub fn new(config: AppConfig, movies: MovieStore, origins: OriginGate) -> Self {
        Self {
            config,
            movies,
            origins,
        }
    }
}
