use async_trait::async_trait;
use connectors::{
    destination::{DataDestination, postgres::PgDestination},
    error::{DestinationError, SourceError},
    source::{DataSource, mock::MockDataSource, odbc::OdbcDataSource},
};
use engine_config::config::RunConfig;
use std::sync::Arc;
use tracing::info;

/// Build the configured source connector: deterministic mock or live ODBC.
pub fn create_source(config: &RunConfig) -> Result<Arc<dyn DataSource>, SourceError> {
    if config.use_mock_source {
        info!("using the mock source connector");
        Ok(Arc::new(MockDataSource))
    } else {
        info!("using the live source connector");
        Ok(Arc::new(OdbcDataSource::new(
            &config.source_connection_string,
        )?))
    }
}

/// Opens destination connections on demand. Each task gets its own
/// connection for its lifetime; tests substitute in-memory providers.
#[async_trait]
pub trait DestinationProvider: Send + Sync {
    async fn connect(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn DataDestination>, DestinationError>;
}

pub struct PgDestinationProvider;

#[async_trait]
impl DestinationProvider for PgDestinationProvider {
    async fn connect(
        &self,
        connection_string: &str,
    ) -> Result<Box<dyn DataDestination>, DestinationError> {
        let destination = PgDestination::connect(connection_string).await?;
        Ok(Box::new(destination))
    }
}
