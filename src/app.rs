use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::client::WaitlistClient;
use crate::controller::landing;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, waitlist_client: WaitlistClient) -> anyhow::Result<Server> {
    // Wrap application data
    let waitlist_client = web::Data::new(waitlist_client);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(waitlist_client.clone())
            .service(health_check)
            .service(landing::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
