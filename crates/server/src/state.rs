use sea_orm::DatabaseConnection;

use service::agents::AgentsDal;

/// Context handed to every agents-service handler; constructed once at
/// startup, no global handles.
#[derive(Clone)]
pub struct AgentsState {
    pub dal: AgentsDal,
}

/// Context for the users service.
#[derive(Clone)]
pub struct UsersState {
    pub db: DatabaseConnection,
}
