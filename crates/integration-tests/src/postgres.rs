//! Throwaway PostgreSQL instances for the database-backed tests. Needs a
//! running Docker daemon.

use storage_adapters::PostgresStore;
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::runners::AsyncRunner;
use testcontainers_modules::testcontainers::ContainerAsync;

/// A migrated, empty store. The container is removed when the returned
/// handle is dropped, so keep it alive for the whole test.
pub async fn start() -> (ContainerAsync<Postgres>, PostgresStore) {
    let container = Postgres::default()
        .start()
        .await
        .expect("start postgres container");
    let host = container.get_host().await.expect("container host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("container port");
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

    let store = PostgresStore::connect(&url, 4)
        .await
        .expect("connect to postgres");
    store.migrate().await.expect("apply migrations");
    (container, store)
}
