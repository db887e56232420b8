use serde::Serialize;

/// Reachability payload returned by both services' `/healthz` routes.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
