use stakeboard_db::DatabaseError;
use stakeboard_subgraph::DataSourceError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Persistence(#[from] DatabaseError),
}
