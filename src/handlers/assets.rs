// src/handlers/assets.rs
use std::path::Path;
use actix_web::{web, HttpResponse};
use log::error;
use crate::config::Config;

async fn serve(config: &Config, file: &str, content_type: &str) -> HttpResponse {
    let path = Path::new(&config.web_root).join(file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => HttpResponse::Ok().content_type(content_type).body(bytes),
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            HttpResponse::NotFound().content_type("text/plain").body("error")
        }
    }
}

pub async fn index(config: web::Data<Config>) -> HttpResponse {
    serve(&config, "index.html", "text/html").await
}

pub async fn style(config: web::Data<Config>) -> HttpResponse {
    serve(&config, "style.css", "text/css").await
}

pub async fn script(config: web::Data<Config>) -> HttpResponse {
    serve(&config, "stats.js", "application/javascript").await
}
