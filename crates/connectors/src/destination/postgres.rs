use crate::{
    destination::{
        DataDestination,
        params::PgParamStore,
        sql::{build_create_table, build_insert},
    },
    error::DestinationError,
};
use async_trait::async_trait;
use model::{core::value::Value, records::buffer::Column};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, config::SslMode};
use tracing::{debug, error, warn};

/// Live Postgres destination. One client per task; dropping it releases the
/// connection on every exit path.
pub struct PgDestination {
    client: Client,
}

impl PgDestination {
    pub async fn connect(connection_string: &str) -> Result<Self, DestinationError> {
        let config = connection_string
            .parse::<Config>()
            .map_err(|e| DestinationError::Connection(e.to_string()))?;

        let client = match config.get_ssl_mode() {
            SslMode::Disable => connect_without_tls(config).await?,
            SslMode::Require => connect_with_tls(config).await?,
            SslMode::Prefer => match connect_with_tls(config.clone()).await {
                Ok(client) => client,
                Err(err) => {
                    warn!("destination TLS handshake failed, retrying without TLS: {err}");
                    connect_without_tls(config).await?
                }
            },
            _ => connect_with_tls(config).await?,
        };

        Ok(PgDestination { client })
    }
}

async fn connect_with_tls(config: Config) -> Result<Client, DestinationError> {
    let connector = TlsConnector::builder()
        .build()
        .map_err(|e| DestinationError::Connection(e.to_string()))?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config
        .connect(tls)
        .await
        .map_err(|e| DestinationError::Connection(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!("destination connection error: {err}");
        }
    });
    Ok(client)
}

async fn connect_without_tls(config: Config) -> Result<Client, DestinationError> {
    let (client, connection) = config
        .connect(NoTls)
        .await
        .map_err(|e| DestinationError::Connection(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!("destination connection error: {err}");
        }
    });
    Ok(client)
}

#[async_trait]
impl DataDestination for PgDestination {
    async fn ensure_table(
        &self,
        table: &str,
        columns: &[Column],
    ) -> Result<(), DestinationError> {
        let sql = build_create_table(table, columns);
        debug!("ensuring destination table: {sql}");
        self.client
            .batch_execute(&sql)
            .await
            .map_err(|e| DestinationError::Schema(e.to_string()))
    }

    async fn write_batch(
        &self,
        table: &str,
        columns: &[Column],
        rows: &[Vec<Option<Value>>],
    ) -> Result<(), DestinationError> {
        if rows.is_empty() {
            return Ok(());
        }

        let sql = build_insert(table, columns, rows.len());
        let bindings = PgParamStore::from_rows(columns, rows);
        self.client
            .execute(&sql, &bindings.as_refs())
            .await
            .map_err(|e| DestinationError::Write(e.to_string()))?;
        Ok(())
    }
}
