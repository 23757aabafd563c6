// src/handlers/servers.rs
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error};
use crate::config::Config;
use crate::storage::memory::ServerStore;
use crate::utils::{client_ip, RequestError};
use super::ClientRateLimiter;

pub async fn get_servers(
    storage: web::Data<ServerStore>,
    rate_limiter: web::Data<ClientRateLimiter>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, RequestError> {
    let peer_ip = client_ip(&req, config.trust_forwarded_for)?;

    // Rate Limiting
    if rate_limiter.check_key(&peer_ip).is_err() {
        error!("Rate limit exceeded for server list for ip: {}", peer_ip);
        return Err(RequestError::RateLimitExceeded);
    }

    let servers = storage.get_servers();
    debug!("Building server list response with {} servers", servers.len());

    match serde_json::to_vec(&servers) {
        Ok(body) => Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body(body)),
        Err(e) => {
            error!("Failed to serialize server list: {}", e);
            Ok(HttpResponse::Ok().content_type("text/plain").body("error"))
        }
    }
}
