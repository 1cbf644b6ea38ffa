use std::time::Instant;

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error,
};
use tracing::info;

/// Log every request on arrival and again once the response is ready.
pub async fn log_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().to_string();
    let url = req.uri().to_string();
    let client_ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("-")
        .to_string();

    info!(%method, %url, %client_ip, "Incoming request");
    let started = Instant::now();

    let res = next.call(req).await?;

    info!(
        %method,
        %url,
        status_code = res.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Response"
    );

    Ok(res)
}
