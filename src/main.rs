use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use gymtrack::{auth, db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/gymtrack.db".to_string());
    if let Some(parent) = std::path::Path::new(&database_path).parent() {
        std::fs::create_dir_all(parent).expect("Failed to create data directory");
    }

    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);
    db::seed_defaults(&pool);

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            // Root redirect — to the session's dashboard, or /login
            .route("/", web::get().to(handlers::auth_handlers::root))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Admin dashboard and mutations
                    .route("/admin", web::get().to(handlers::admin_handlers::dashboard))
                    .route("/admin/api/charts", web::get().to(handlers::admin_handlers::charts_data))
                    .route("/admin/machines", web::post().to(handlers::admin_handlers::machine_create))
                    .route("/admin/machines/{id}/status", web::post().to(handlers::admin_handlers::machine_status))
                    .route("/admin/machines/{id}/delete", web::post().to(handlers::admin_handlers::machine_delete))
                    .route("/admin/users/{id}/status", web::post().to(handlers::admin_handlers::user_status))
                    // Instructor dashboard and quality review
                    .route("/instructor", web::get().to(handlers::instructor_handlers::dashboard))
                    .route("/instructor/api/charts", web::get().to(handlers::instructor_handlers::charts_data))
                    .route("/instructor/sessions/{id}/review", web::post().to(handlers::instructor_handlers::review_session))
                    // Member dashboard and workout logging
                    .route("/member", web::get().to(handlers::member_handlers::dashboard))
                    .route("/member/workouts", web::post().to(handlers::member_handlers::workout_create))
                    // CSV report downloads (staff only)
                    .route("/reports/usage.csv", web::get().to(handlers::report_handlers::usage))
                    .route("/reports/member-progress.csv", web::get().to(handlers::report_handlers::member_progress))
                    .route("/reports/data-quality.csv", web::get().to(handlers::report_handlers::data_quality))
                    .route("/reports/system.csv", web::get().to(handlers::report_handlers::system)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
