use crate::config::ClickhouseConfig;

pub fn get_clickhouse_client(config: &ClickhouseConfig) -> clickhouse::Client {
    clickhouse::Client::default()
        .with_url(config.url.clone())
        .with_user(config.user.clone())
        .with_password(config.password.clone())
        .with_database(config.database.clone())
}
