use std::net::SocketAddr;

use axum::{
    routing::{get, post, put},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use bon::Builder;
use log::info;

use crate::{
    routes::{
        accept_endpoint, add_friend_endpoint, block_endpoint, delete_friend_endpoint,
        register_endpoint, summary_endpoint, websocket_endpoint,
    },
    state::{FriendsState, StateType},
};

#[derive(Builder)]
pub struct FriendsConfig<T: StateType> {
    pub state: FriendsState<T>,
    pub addr: SocketAddr,
    pub tls_config: Option<RustlsConfig>,
}

pub fn router<T: StateType>(state: FriendsState<T>) -> Router {
    Router::new()
        .route("/hello", get(|| async { "Hello From Friends Server" }))
        .route("/friends/api/v1/{account_id}", put(register_endpoint::<T>))
        .route(
            "/friends/api/v1/{account_id}/summary",
            get(summary_endpoint::<T>),
        )
        .route(
            "/friends/api/v1/{account_id}/friends/{friend_id}",
            post(add_friend_endpoint::<T>).delete(delete_friend_endpoint::<T>),
        )
        .route(
            "/friends/api/v1/{account_id}/incoming/{friend_id}/accept",
            post(accept_endpoint::<T>),
        )
        .route(
            "/friends/api/v1/{account_id}/blocklist/{friend_id}",
            post(block_endpoint::<T>),
        )
        .route(
            "/friends/api/v1/{account_id}/websocket",
            get(websocket_endpoint::<T>),
        )
        .with_state(state)
}

pub async fn start_server<T: StateType>(config: FriendsConfig<T>) -> Result<(), std::io::Error> {
    let app = router(config.state);

    info!(
        "Starting Friends Server on http{}://{}",
        if config.tls_config.is_some() { "s" } else { "" },
        config.addr
    );
    if let Some(tls_config) = config.tls_config {
        axum_server::bind_rustls(config.addr, tls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
    } else {
        axum_server::bind(config.addr)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
    };

    Ok(())
}
