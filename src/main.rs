//! 소셜 네트워크 백엔드 메인 애플리케이션
//!
//! 설정을 읽고, MongoDB에 연결하고, 서비스를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use env_logger::Env;
use log::{error, info, warn};
use social_network_backend::config::{AppConfig, CorsConfig, Environment};
use social_network_backend::core::registry::ServiceRegistry;
use social_network_backend::db::Database;
use social_network_backend::repositories::ensure_indexes;
use social_network_backend::routes::configure_all_routes;
use social_network_backend::utils::display_terminal::{
    print_boxed_title, print_step_complete, print_step_start,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let environment = Environment::current();
    let env_loaded = dotenv::from_filename(environment.env_file());
    init_logging();

    match env_loaded {
        Ok(path) => info!("{} 파일 로드 됨", path.display()),
        Err(e) => warn!("{} 파일 로드 실패: {}", environment.env_file(), e),
    }

    print_boxed_title("SOCIAL NETWORK BACKEND");
    info!("🚀 서버 시작중... ({:?})", environment);

    let config = AppConfig::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    print_step_start(1, "Connecting data stores");
    let registry = initialize_registry(&config).await?;
    print_step_complete(1, "Data stores ready", 5);

    print_step_start(2, "Registering services");
    registry.print_summary();

    start_http_server(config, registry).await
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 `info,actix_web=info`를 사용합니다.
///
/// ```bash
/// RUST_LOG=social_network_backend::middlewares=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 저장소를 준비하고 서비스를 조립합니다
///
/// `MONGO_URI=memory`이면 MongoDB 없이 인메모리 저장소를 사용합니다.
async fn initialize_registry(config: &AppConfig) -> io::Result<ServiceRegistry> {
    if config.database.is_in_memory() {
        warn!("⚠️ 인메모리 저장소로 실행합니다. 재시작하면 데이터가 사라집니다.");
        return Ok(ServiceRegistry::in_memory(config));
    }

    info!("📡 데이터베이스 연결 중...");
    let database = Database::connect(&config.database).await.map_err(|e| {
        error!("데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    if let Err(e) = ensure_indexes(&database).await {
        error!("인덱스 생성 실패: {}", e);
        return Err(io::Error::other(e.to_string()));
    }

    Ok(ServiceRegistry::with_mongo(config, &database))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화 미들웨어를 포함합니다.
async fn start_http_server(config: AppConfig, registry: ServiceRegistry) -> io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second,
        config.rate_limit.burst_size
    );

    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        let registry = registry.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&cors_config))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| registry.configure(cfg))
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(config.server.workers)
        .run()
        .await
}

/// CORS 설정을 구성합니다
///
/// 설정된 단일 Origin만 허용하고 자격 증명 전송을 허용합니다.
fn configure_cors(config: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_origin(&config.origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
