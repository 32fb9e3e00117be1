use rocket::serde::{json::Json, Serialize};

/// liveness probe body; load balancers only look at the status code, the
/// timestamp is for humans reading the response by hand
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Health {
    status: &'static str,
    timestamp: String,
}

#[get("/health")]
pub fn health() -> Json<Health> {
    Json(Health {
        status: "OK",
        timestamp: chrono::offset::Local::now().to_rfc3339(),
    })
}
