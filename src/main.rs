use cobrand::http;
use cobrand::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt::init();

    let addr = format!("{}:{}", config.addr, config.port);
    let app = http::app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
